//! Prometheus metrics registry
//!
//! Defines all Prometheus metrics used in the application. Each server owns
//! its own registry, so tests can create isolated instances.

use prometheus::{
    CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};

use super::MetricsRecorder;
use crate::errors::{PingdError, Result};

/// HTTP latency buckets (seconds)
const HTTP_DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 3.0, 5.0, 10.0];

/// Application metrics container
pub struct PrometheusMetrics {
    /// Internal Prometheus registry
    registry: Registry,

    // ===== HTTP metrics =====
    /// Total number of HTTP requests by method, route and status code
    pub http_requests_total: CounterVec,
    /// HTTP request latency by method, route and status code
    pub http_request_duration_seconds: HistogramVec,
    /// Requests currently being processed
    pub http_active_connections: Gauge,

    // ===== Redirect metrics =====
    /// Trailing-slash redirects by status code
    pub redirects_total: CounterVec,

    // ===== System metrics =====
    /// Server uptime in seconds
    pub uptime_seconds: Gauge,
    /// Always 1, labelled with the crate version
    pub build_info: GaugeVec,
    /// Process memory by type (rss / virtual)
    pub process_memory_bytes: GaugeVec,
    /// Accumulated process CPU time
    pub process_cpu_seconds: Gauge,
}

impl PrometheusMetrics {
    /// Create a registry whose metric names are prefixed with `<prefix>_`.
    ///
    /// An empty prefix leaves the names bare.
    pub fn new(prefix: &str) -> Result<Self> {
        let prefix = prefix.trim();
        let registry = if prefix.is_empty() {
            Registry::new()
        } else {
            Registry::new_custom(Some(prefix.to_string()), None)?
        };

        // HTTP metrics
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "route", "status_code"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(HTTP_DURATION_BUCKETS.to_vec()),
            &["method", "route", "status_code"],
        )?;

        let http_active_connections = Gauge::new(
            "http_active_connections",
            "Number of requests currently being processed",
        )?;

        // Redirect metrics
        let redirects_total = CounterVec::new(
            Opts::new("redirects_total", "Total number of trailing-slash redirects"),
            &["status"],
        )?;

        // System metrics
        let uptime_seconds = Gauge::new("uptime_seconds", "Server uptime in seconds")?;

        let build_info = GaugeVec::new(
            Opts::new("build_info", "Build information"),
            &["version"],
        )?;
        build_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .set(1.0);

        let process_memory_bytes = GaugeVec::new(
            Opts::new("process_memory_bytes", "Process memory usage in bytes"),
            &["type"],
        )?;

        let process_cpu_seconds = Gauge::new(
            "process_cpu_seconds_total",
            "Total user and system CPU time spent in seconds",
        )?;

        // Register all metrics
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_active_connections.clone()))?;
        registry.register(Box::new(redirects_total.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;
        registry.register(Box::new(build_info.clone()))?;
        registry.register(Box::new(process_memory_bytes.clone()))?;
        registry.register(Box::new(process_cpu_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_active_connections,
            redirects_total,
            uptime_seconds,
            build_info,
            process_memory_bytes,
            process_cpu_seconds,
        })
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| PingdError::metrics(format!("Metrics output is not valid UTF-8: {}", e)))
    }
}

impl MetricsRecorder for PrometheusMetrics {
    fn inc_active_connections(&self) {
        self.http_active_connections.inc();
    }

    fn dec_active_connections(&self) {
        self.http_active_connections.dec();
    }

    fn observe_http_request(&self, method: &str, route: &str, status: &str, duration_secs: f64) {
        self.http_request_duration_seconds
            .with_label_values(&[method, route, status])
            .observe(duration_secs);
    }

    fn inc_http_request(&self, method: &str, route: &str, status: &str) {
        self.http_requests_total
            .with_label_values(&[method, route, status])
            .inc();
    }

    fn inc_redirect(&self, status: &str) {
        self.redirects_total.with_label_values(&[status]).inc();
    }

    fn set_uptime_seconds(&self, seconds: f64) {
        self.uptime_seconds.set(seconds);
    }

    fn set_process_memory_bytes(&self, kind: &str, bytes: f64) {
        self.process_memory_bytes.with_label_values(&[kind]).set(bytes);
    }

    fn set_process_cpu_seconds(&self, seconds: f64) {
        self.process_cpu_seconds.set(seconds);
    }
}
