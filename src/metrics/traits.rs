//! MetricsRecorder trait for dependency injection
//!
//! This trait abstracts the metrics recording interface, allowing:
//! - Production use with Prometheus metrics
//! - Testing with NoopMetrics or custom mock implementations

use std::sync::Arc;

/// Trait for recording application metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync).
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ===== HTTP (timing middleware) =====

    /// Increment active connections counter
    fn inc_active_connections(&self) {}

    /// Decrement active connections counter
    fn dec_active_connections(&self) {}

    /// Observe HTTP request duration
    fn observe_http_request(&self, method: &str, route: &str, status: &str, duration_secs: f64) {}

    /// Record HTTP request
    fn inc_http_request(&self, method: &str, route: &str, status: &str) {}

    // ===== Trailing slash =====

    /// Record redirect response
    fn inc_redirect(&self, status: &str) {}

    // ===== Process =====

    /// Set server uptime
    fn set_uptime_seconds(&self, seconds: f64) {}

    /// Set process memory usage (`rss` / `virtual`)
    fn set_process_memory_bytes(&self, kind: &str, bytes: f64) {}

    /// Set accumulated process CPU time
    fn set_process_cpu_seconds(&self, seconds: f64) {}
}

/// Noop metrics implementation for testing.
///
/// All methods do nothing, allowing tests to run without a Prometheus registry.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
