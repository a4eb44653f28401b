//! Metrics collection and exposition.
//!
//! The registry accumulates counters, gauges, and histograms partitioned by
//! label values, and the text encoder renders its current state for a
//! pull-based collector. Registration happens once at startup through
//! [`Registry`]; the returned family handles are the update path.

mod counter;
mod desc;
mod encoder;
mod error;
mod gauge;
mod histogram;
mod middleware;
mod recorder;
mod registry;
mod value;
mod vec;

pub use counter::{Counter, CounterVec};
pub use desc::{Desc, HistogramOpts, MetricKind, Opts, DEFAULT_BUCKETS};
pub use encoder::{TextEncoder, TEXT_FORMAT};
pub use error::{MetricsError, Result};
pub use gauge::{Gauge, GaugeVec};
pub use histogram::{Histogram, HistogramSnapshot, HistogramVec};
pub use middleware::track_requests;
pub use recorder::{Metrics, MetricsRecorder};
pub use registry::{MetricFamilySnapshot, Registry, Sample, SampleValue};
