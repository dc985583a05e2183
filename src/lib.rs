//! pingd - a tiny HTTP service
//!
//! Serves `GET /ping`, exposes Prometheus metrics, handles trailing slashes
//! and exits on SIGINT / SIGTERM / SIGHUP.
//!
//! # Features
//! - **process-metrics**: process memory / CPU gauges via sysinfo (default)
//!
//! # Architecture
//! - `api`: HTTP handlers and middleware
//! - `metrics`: Prometheus registry and the `MetricsRecorder` seam
//! - `config`: Layered configuration (TOML + environment)
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging and panic handling

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod runtime;
pub mod system;
