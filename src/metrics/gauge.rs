//! Gauge metric: a point-in-time value that can move in either direction.

use std::sync::Arc;

use crate::metrics::desc::Desc;
use crate::metrics::error::Result;
use crate::metrics::registry::{MetricFamilySnapshot, Sample, SampleValue};
use crate::metrics::value::AtomicF64;
use crate::metrics::vec::LabelIndex;

/// A single gauge cell. Cloning shares the underlying value.
#[derive(Clone, Debug)]
pub struct Gauge {
    value: Arc<AtomicF64>,
}

impl Gauge {
    pub(crate) fn new() -> Self {
        Gauge {
            value: Arc::new(AtomicF64::new(0.0)),
        }
    }

    /// Replaces the current value unconditionally.
    pub fn set(&self, value: f64) {
        self.value.set(value);
    }

    pub fn inc(&self) {
        self.value.add(1.0);
    }

    pub fn dec(&self) {
        self.value.add(-1.0);
    }

    /// Adds `delta`, which may be negative.
    pub fn add(&self, delta: f64) {
        self.value.add(delta);
    }

    pub fn sub(&self, delta: f64) {
        self.value.add(-delta);
    }

    /// Last written value.
    pub fn get(&self) -> f64 {
        self.value.get()
    }
}

/// A family of gauges partitioned by label values.
#[derive(Clone, Debug)]
pub struct GaugeVec {
    desc: Arc<Desc>,
    cells: Arc<LabelIndex<Gauge>>,
}

impl GaugeVec {
    pub(crate) fn new(desc: Desc) -> Self {
        GaugeVec {
            desc: Arc::new(desc),
            cells: Arc::new(LabelIndex::new()),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// Returns the gauge for the given label values, creating it on first
    /// access.
    pub fn with_label_values(&self, values: &[&str]) -> Result<Gauge> {
        self.cells.get_or_create(&self.desc, values, Gauge::new)
    }

    pub(crate) fn snapshot(&self) -> MetricFamilySnapshot {
        MetricFamilySnapshot {
            name: self.desc.name.clone(),
            help: self.desc.help.clone(),
            kind: self.desc.kind,
            label_names: self.desc.label_names.clone(),
            samples: self
                .cells
                .snapshot()
                .into_iter()
                .map(|(label_values, cell)| Sample {
                    label_values,
                    value: SampleValue::Gauge(cell.get()),
                })
                .collect(),
        }
    }
}
