//! Histogram metric: a latency/size distribution over fixed buckets.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::metrics::desc::Desc;
use crate::metrics::error::{MetricsError, Result};
use crate::metrics::registry::{MetricFamilySnapshot, Sample, SampleValue};
use crate::metrics::vec::LabelIndex;

/// A single histogram cell.
///
/// One mutex guards buckets, sum, and count together, so a snapshot never
/// mixes fields from different points in time.
#[derive(Clone, Debug)]
pub struct Histogram {
    inner: Arc<HistogramCore>,
}

#[derive(Debug)]
struct HistogramCore {
    /// Strictly ascending, finite upper bounds. The `+Inf` bucket is implicit.
    boundaries: Arc<[f64]>,
    state: Mutex<HistogramState>,
}

#[derive(Debug)]
struct HistogramState {
    /// Per-bucket observation counts (not cumulative; cumulated on snapshot).
    buckets: Vec<u64>,
    count: u64,
    sum: f64,
}

/// Point-in-time view of one histogram cell, as exposed on a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper_bound, cumulative_count)` per finite boundary, ascending.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

impl Histogram {
    pub(crate) fn new(boundaries: Arc<[f64]>) -> Self {
        let buckets = vec![0; boundaries.len()];
        Histogram {
            inner: Arc::new(HistogramCore {
                boundaries,
                state: Mutex::new(HistogramState {
                    buckets,
                    count: 0,
                    sum: 0.0,
                }),
            }),
        }
    }

    /// Records one observation.
    ///
    /// Never fails. NaN observations are dropped; infinite values are
    /// observed (`+Inf` lands only in the overflow bucket, `-Inf` in the
    /// first bucket) and `sum` follows IEEE arithmetic.
    pub fn observe(&self, value: f64) {
        if value.is_nan() {
            return;
        }
        let bucket = self.inner.boundaries.partition_point(|&b| b < value);
        let mut state = self.inner.state.lock();
        if bucket < state.buckets.len() {
            state.buckets[bucket] += 1;
        }
        state.count += 1;
        state.sum += value;
    }

    /// Number of observations so far.
    pub fn count(&self) -> u64 {
        self.inner.state.lock().count
    }

    /// Running total of observed values.
    pub fn sum(&self) -> f64 {
        self.inner.state.lock().sum
    }

    /// Consistent view of buckets, sum, and count at a single point in time.
    pub fn snapshot(&self) -> HistogramSnapshot {
        let state = self.inner.state.lock();
        let mut cumulative = 0;
        let buckets = self
            .inner
            .boundaries
            .iter()
            .zip(state.buckets.iter())
            .map(|(&bound, &count)| {
                cumulative += count;
                (bound, cumulative)
            })
            .collect();
        HistogramSnapshot {
            buckets,
            sum: state.sum,
            count: state.count,
        }
    }
}

/// Checks that boundaries are non-empty, finite, and strictly ascending.
pub(crate) fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(MetricsError::InvalidBuckets(
            "boundaries must not be empty".to_string(),
        ));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(MetricsError::InvalidBuckets(
            "boundaries must be finite".to_string(),
        ));
    }
    if buckets.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(MetricsError::InvalidBuckets(
            "boundaries must be strictly ascending".to_string(),
        ));
    }
    Ok(())
}

/// A family of histograms partitioned by label values. All cells share the
/// boundaries fixed at registration.
#[derive(Clone, Debug)]
pub struct HistogramVec {
    desc: Arc<Desc>,
    boundaries: Arc<[f64]>,
    cells: Arc<LabelIndex<Histogram>>,
}

impl HistogramVec {
    pub(crate) fn new(desc: Desc, boundaries: Arc<[f64]>) -> Self {
        HistogramVec {
            desc: Arc::new(desc),
            boundaries,
            cells: Arc::new(LabelIndex::new()),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// Returns the histogram for the given label values, creating it on
    /// first access.
    pub fn with_label_values(&self, values: &[&str]) -> Result<Histogram> {
        let boundaries = self.boundaries.clone();
        self.cells
            .get_or_create(&self.desc, values, move || Histogram::new(boundaries))
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
                    value: SampleValue::Histogram(cell.snapshot()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(bounds: &[f64]) -> Histogram {
        Histogram::new(bounds.to_vec().into())
    }

    #[test]
    fn cumulative_buckets_count_observations_at_or_below_each_boundary() {
        let h = histogram(&[0.1, 0.5, 1.0]);
        for v in [0.05, 0.3, 0.7, 2.0] {
            h.observe(v);
        }
        let snapshot = h.snapshot();
        assert_eq!(
            snapshot.buckets,
            vec![(0.1, 1), (0.5, 2), (1.0, 3)],
        );
        assert_eq!(snapshot.count, 4);
        assert!((snapshot.sum - 3.05).abs() < 1e-9);
    }

    #[test]
    fn boundary_values_fall_into_their_own_bucket() {
        let h = histogram(&[0.1, 0.5, 1.0, 2.0, 5.0]);
        h.observe(0.5);
        let snapshot = h.snapshot();
        assert_eq!(
            snapshot.buckets,
            vec![(0.1, 0), (0.5, 1), (1.0, 1), (2.0, 1), (5.0, 1)],
        );
    }

    #[test]
    fn overflow_bucket_equals_count() {
        let h = histogram(&[0.1, 0.5, 1.0, 2.0, 5.0]);
        for v in [0.01, 0.2, 0.9, 1.5, 4.0, 100.0] {
            h.observe(v);
        }
        let snapshot = h.snapshot();
        // The +Inf bucket is implicit: everything beyond the last boundary
        // only shows up in `count`.
        assert_eq!(snapshot.count, 6);
        assert_eq!(snapshot.buckets.last().unwrap().1, 5);
    }

    #[test]
    fn nan_observations_are_dropped() {
        let h = histogram(&[1.0]);
        h.observe(f64::NAN);
        h.observe(0.5);
        let snapshot = h.snapshot();
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.sum, 0.5);
    }

    #[test]
    fn infinite_observations_only_hit_the_overflow_bucket() {
        let h = histogram(&[1.0]);
        h.observe(f64::INFINITY);
        let snapshot = h.snapshot();
        assert_eq!(snapshot.buckets, vec![(1.0, 0)]);
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.sum, f64::INFINITY);
    }

    #[test]
    fn bucket_validation_rejects_bad_boundaries() {
        assert!(validate_buckets(&[]).is_err());
        assert!(validate_buckets(&[0.1, 0.1]).is_err());
        assert!(validate_buckets(&[0.5, 0.1]).is_err());
        assert!(validate_buckets(&[0.1, f64::INFINITY]).is_err());
        assert!(validate_buckets(&[0.1, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn concurrent_observations_stay_internally_consistent() {
        let h = histogram(&[0.1, 0.5, 1.0]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let h = h.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        h.observe(0.3);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let snapshot = h.snapshot();
        assert_eq!(snapshot.count, 1000);
        assert_eq!(snapshot.buckets, vec![(0.1, 0), (0.5, 1000), (1.0, 1000)]);
        assert!((snapshot.sum - 300.0).abs() < 1e-6);
    }
}
