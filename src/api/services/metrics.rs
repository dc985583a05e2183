//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus text format at the configured
//! endpoint (`/metrics` by default).

use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::error;

use super::AppStartTime;
use crate::api::constants::PROMETHEUS_CONTENT_TYPE;
use crate::metrics::{MetricsRecorder, PrometheusMetrics};

/// Metrics service handler
pub struct MetricsService;

impl MetricsService {
    /// Handle metrics export request
    pub async fn metrics(
        metrics: web::Data<Arc<PrometheusMetrics>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        metrics.set_uptime_seconds(app_start_time.uptime_seconds() as f64);

        #[cfg(feature = "process-metrics")]
        {
            let recorder: &PrometheusMetrics = &metrics;
            crate::metrics::update_system_metrics(recorder);
        }

        match metrics.export() {
            Ok(output) => HttpResponse::Ok()
                .content_type(PROMETHEUS_CONTENT_TYPE)
                .body(output),
            Err(e) => {
                error!("Failed to export metrics: {}", e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Failed to export metrics")
            }
        }
    }
}
