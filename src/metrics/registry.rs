//! Central metric registry: registration and snapshot enumeration.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::metrics::counter::{Counter, CounterVec};
use crate::metrics::desc::{Desc, HistogramOpts, MetricKind, Opts};
use crate::metrics::error::{MetricsError, Result};
use crate::metrics::gauge::{Gauge, GaugeVec};
use crate::metrics::histogram::{self, HistogramSnapshot, HistogramVec};

/// Owns the registered metric families.
///
/// Registration is the only operation that mutates the family set; cell
/// updates go through the family handles returned at registration. Cloning
/// shares the underlying registry.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    families: RwLock<Vec<MetricFamily>>,
}

#[derive(Clone, Debug)]
enum MetricFamily {
    Counter(CounterVec),
    Gauge(GaugeVec),
    Histogram(HistogramVec),
}

impl MetricFamily {
    fn name(&self) -> &str {
        match self {
            MetricFamily::Counter(v) => &v.desc().name,
            MetricFamily::Gauge(v) => &v.desc().name,
            MetricFamily::Histogram(v) => &v.desc().name,
        }
    }

    fn snapshot(&self) -> MetricFamilySnapshot {
        match self {
            MetricFamily::Counter(v) => v.snapshot(),
            MetricFamily::Gauge(v) => v.snapshot(),
            MetricFamily::Histogram(v) => v.snapshot(),
        }
    }
}

/// Point-in-time view of one family, as handed to the encoder.
#[derive(Debug, Clone)]
pub struct MetricFamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub label_names: Vec<String>,
    pub samples: Vec<Sample>,
}

/// One label-cell combination inside a family snapshot.
#[derive(Debug, Clone)]
pub struct Sample {
    pub label_values: Vec<String>,
    pub value: SampleValue,
}

#[derive(Debug, Clone)]
pub enum SampleValue {
    Counter(f64),
    Gauge(f64),
    Histogram(HistogramSnapshot),
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers a labeled counter family.
    pub fn register_counter_vec(&self, opts: Opts, label_names: &[&str]) -> Result<CounterVec> {
        let desc = Desc::new(opts, MetricKind::Counter, label_names)?;
        let vec = CounterVec::new(desc);
        self.insert(MetricFamily::Counter(vec.clone()))?;
        Ok(vec)
    }

    /// Registers a label-less counter and returns its single cell.
    pub fn register_counter(&self, opts: Opts) -> Result<Counter> {
        let vec = self.register_counter_vec(opts, &[])?;
        vec.with_label_values(&[])
    }

    /// Registers a labeled gauge family.
    pub fn register_gauge_vec(&self, opts: Opts, label_names: &[&str]) -> Result<GaugeVec> {
        let desc = Desc::new(opts, MetricKind::Gauge, label_names)?;
        let vec = GaugeVec::new(desc);
        self.insert(MetricFamily::Gauge(vec.clone()))?;
        Ok(vec)
    }

    /// Registers a label-less gauge and returns its single cell.
    pub fn register_gauge(&self, opts: Opts) -> Result<Gauge> {
        let vec = self.register_gauge_vec(opts, &[])?;
        vec.with_label_values(&[])
    }

    /// Registers a labeled histogram family with the boundaries from `opts`.
    pub fn register_histogram_vec(
        &self,
        opts: HistogramOpts,
        label_names: &[&str],
    ) -> Result<HistogramVec> {
        histogram::validate_buckets(&opts.buckets)?;
        let desc = Desc::new(opts.common, MetricKind::Histogram, label_names)?;
        let vec = HistogramVec::new(desc, opts.buckets.into());
        self.insert(MetricFamily::Histogram(vec.clone()))?;
        Ok(vec)
    }

    fn insert(&self, family: MetricFamily) -> Result<()> {
        let mut families = self.inner.families.write();
        if families.iter().any(|f| f.name() == family.name()) {
            return Err(MetricsError::DuplicateName(family.name().to_string()));
        }
        families.push(family);
        Ok(())
    }

    /// Snapshots every registered family in registration order.
    ///
    /// Restartable and side-effect free. No lock is held across cell reads
    /// other than each cell's own critical section, so a scrape may observe
    /// different cells at slightly different instants.
    pub fn gather(&self) -> Vec<MetricFamilySnapshot> {
        let families: Vec<MetricFamily> = self.inner.families.read().clone();
        families.iter().map(MetricFamily::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected_without_altering_state() {
        let registry = Registry::new();
        registry
            .register_counter_vec(Opts::new("requests_total", "first"), &["route"])
            .unwrap();
        let second = registry.register_counter_vec(Opts::new("requests_total", "second"), &[]);
        assert!(matches!(second, Err(MetricsError::DuplicateName(_))));

        let families = registry.gather();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].help, "first");
        assert_eq!(families[0].label_names, vec!["route"]);
    }

    #[test]
    fn duplicate_check_spans_metric_kinds() {
        let registry = Registry::new();
        registry.register_gauge(Opts::new("shared_name", "gauge")).unwrap();
        let counter = registry.register_counter(Opts::new("shared_name", "counter"));
        assert!(matches!(counter, Err(MetricsError::DuplicateName(_))));
    }

    #[test]
    fn gather_preserves_registration_order() {
        let registry = Registry::new();
        registry.register_gauge(Opts::new("zz_last_alphabetically", "z")).unwrap();
        registry.register_gauge(Opts::new("aa_first_alphabetically", "a")).unwrap();
        let names: Vec<_> = registry.gather().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["zz_last_alphabetically", "aa_first_alphabetically"]);
    }

    #[test]
    fn gather_is_restartable_and_side_effect_free() {
        let registry = Registry::new();
        let counter = registry.register_counter(Opts::new("hits_total", "hits")).unwrap();
        counter.inc();
        let first = registry.gather();
        let second = registry.gather();
        assert_eq!(first.len(), second.len());
        assert_eq!(counter.get(), 1.0);
    }

    #[test]
    fn families_without_cells_still_enumerate() {
        let registry = Registry::new();
        registry
            .register_counter_vec(Opts::new("lazy_total", "no cells yet"), &["kind"])
            .unwrap();
        let families = registry.gather();
        assert_eq!(families.len(), 1);
        assert!(families[0].samples.is_empty());
    }

    #[test]
    fn invalid_buckets_fail_registration() {
        let registry = Registry::new();
        let result = registry.register_histogram_vec(
            HistogramOpts::new("latency_seconds", "latency").buckets(vec![1.0, 0.5]),
            &[],
        );
        assert!(matches!(result, Err(MetricsError::InvalidBuckets(_))));
        assert!(registry.gather().is_empty());
    }
}
