//! Metric identity: names, help text, kind, and declared labels.

use crate::metrics::error::{MetricsError, Result};

/// The three supported metric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Name used on `# TYPE` lines in the exposition format.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Name and help text for a metric under construction.
#[derive(Debug, Clone)]
pub struct Opts {
    pub name: String,
    pub help: String,
}

impl Opts {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Opts {
            name: name.into(),
            help: help.into(),
        }
    }
}

/// Default duration buckets, in seconds.
pub const DEFAULT_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// [`Opts`] plus bucket boundaries for histograms.
#[derive(Debug, Clone)]
pub struct HistogramOpts {
    pub common: Opts,
    pub buckets: Vec<f64>,
}

impl HistogramOpts {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        HistogramOpts {
            common: Opts::new(name, help),
            buckets: DEFAULT_BUCKETS.to_vec(),
        }
    }

    /// Replaces the default buckets. Boundaries are validated at registration.
    pub fn buckets(mut self, buckets: Vec<f64>) -> Self {
        self.buckets = buckets;
        self
    }
}

/// Static identity of a registered metric. Immutable after registration.
#[derive(Debug, Clone)]
pub struct Desc {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub label_names: Vec<String>,
}

impl Desc {
    /// Validates the metric name and label names and builds the descriptor.
    pub fn new(opts: Opts, kind: MetricKind, label_names: &[&str]) -> Result<Self> {
        if !is_valid_metric_name(&opts.name) {
            return Err(MetricsError::InvalidName(opts.name));
        }
        for label in label_names {
            if !is_valid_label_name(label) {
                return Err(MetricsError::InvalidName(label.to_string()));
            }
        }
        Ok(Desc {
            name: opts.name,
            help: opts.help,
            kind,
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
        })
    }
}

/// Metric names must match `[a-zA-Z_:][a-zA-Z0-9_:]*`.
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Label names must match `[a-zA-Z_][a-zA-Z0-9_]*`; the `__` prefix is
/// reserved by the exposition format.
fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
