//! Composite-key index from label-value tuples to metric cells.
//!
//! Each metric family owns one of these. The ordered label-value vector is
//! the key; a cell is created lazily on first access and lives for the
//! registry's lifetime.

use dashmap::DashMap;

use crate::metrics::desc::Desc;
use crate::metrics::error::{MetricsError, Result};

/// Maps ordered label-value tuples to cells of type `C`.
///
/// `get_or_create` goes through dashmap's entry API, so concurrent first
/// accesses with the same tuple resolve to exactly one cell.
#[derive(Debug)]
pub(crate) struct LabelIndex<C> {
    cells: DashMap<Vec<String>, C>,
}

impl<C: Clone> LabelIndex<C> {
    pub fn new() -> Self {
        LabelIndex {
            cells: DashMap::new(),
        }
    }

    /// Returns the cell for `values`, creating it with `make` on first access.
    ///
    /// Fails with `LabelCardinality` when the tuple length does not match the
    /// descriptor's declared label names.
    pub fn get_or_create(
        &self,
        desc: &Desc,
        values: &[&str],
        make: impl FnOnce() -> C,
    ) -> Result<C> {
        if values.len() != desc.label_names.len() {
            return Err(MetricsError::LabelCardinality {
                metric: desc.name.clone(),
                expected: desc.label_names.len(),
                got: values.len(),
            });
        }
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        Ok(self.cells.entry(key).or_insert_with(make).clone())
    }

    /// All cells with their label tuples, sorted by tuple.
    ///
    /// Sorting makes exposition order stable regardless of map internals.
    pub fn snapshot(&self) -> Vec<(Vec<String>, C)> {
        let mut cells: Vec<_> = self
            .cells
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        cells.sort_by(|a, b| a.0.cmp(&b.0));
        cells
    }
}
