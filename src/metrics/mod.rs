//! Prometheus metrics module
//!
//! Provides metrics collection and export for monitoring.
//!
//! # Feature
//! Process memory / CPU gauges require the `process-metrics` feature.

mod registry;
#[cfg(feature = "process-metrics")]
mod system;
mod traits;

pub use registry::PrometheusMetrics;
#[cfg(feature = "process-metrics")]
pub use system::{spawn_system_metrics_updater, update_system_metrics};
pub use traits::{MetricsRecorder, NoopMetrics};
