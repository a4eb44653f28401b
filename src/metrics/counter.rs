//! Counter metric: a monotonically non-decreasing value.

use std::sync::Arc;

use crate::metrics::desc::Desc;
use crate::metrics::error::{MetricsError, Result};
use crate::metrics::registry::{MetricFamilySnapshot, Sample, SampleValue};
use crate::metrics::value::AtomicF64;
use crate::metrics::vec::LabelIndex;

/// A single counter cell. Cloning shares the underlying value.
#[derive(Clone, Debug)]
pub struct Counter {
    value: Arc<AtomicF64>,
}

impl Counter {
    pub(crate) fn new() -> Self {
        Counter {
            value: Arc::new(AtomicF64::new(0.0)),
        }
    }

    /// Adds 1.
    pub fn inc(&self) {
        self.value.add(1.0);
    }

    /// Adds `delta`. Fails with `InvalidDelta` for negative or NaN deltas,
    /// leaving the value unchanged.
    pub fn inc_by(&self, delta: f64) -> Result<()> {
        if delta.is_nan() || delta < 0.0 {
            return Err(MetricsError::InvalidDelta(delta));
        }
        self.value.add(delta);
        Ok(())
    }

    /// Current accumulated total.
    pub fn get(&self) -> f64 {
        self.value.get()
    }
}

/// A family of counters partitioned by label values.
#[derive(Clone, Debug)]
pub struct CounterVec {
    desc: Arc<Desc>,
    cells: Arc<LabelIndex<Counter>>,
}

impl CounterVec {
    pub(crate) fn new(desc: Desc) -> Self {
        CounterVec {
            desc: Arc::new(desc),
            cells: Arc::new(LabelIndex::new()),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// Returns the counter for the given label values, creating it on first
    /// access.
    pub fn with_label_values(&self, values: &[&str]) -> Result<Counter> {
        self.cells.get_or_create(&self.desc, values, Counter::new)
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
                    value: SampleValue::Counter(cell.get()),
                })
                .collect(),
        }
    }
}
