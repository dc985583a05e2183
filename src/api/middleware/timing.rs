//! HTTP timing middleware
//!
//! Records HTTP request duration, request count, and active connections.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crate::api::constants::UNMATCHED_ROUTE;
use crate::metrics::MetricsRecorder;

/// Drop guard that decrements active connections when dropped.
/// Ensures `dec()` runs even if the future panics or is cancelled.
struct ActiveConnectionGuard(Arc<dyn MetricsRecorder>);

impl Drop for ActiveConnectionGuard {
    fn drop(&mut self) {
        self.0.dec_active_connections();
    }
}

/// HTTP timing middleware factory
#[derive(Clone)]
pub struct TimingMiddleware {
    metrics: Arc<dyn MetricsRecorder>,
}

impl TimingMiddleware {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let metrics = self.metrics.clone();
        let start = Instant::now();
        let method = method_str(req.method());

        Box::pin(async move {
            // Guard ensures dec() runs even on panic
            metrics.inc_active_connections();
            let _guard = ActiveConnectionGuard(metrics.clone());

            let result = srv.call(req).await;

            let duration = start.elapsed().as_secs_f64();
            let (route, status) = match &result {
                Ok(response) => (
                    response
                        .request()
                        .match_pattern()
                        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string()),
                    response.status().as_u16().to_string(),
                ),
                Err(_) => (UNMATCHED_ROUTE.to_string(), "500".to_string()),
            };

            metrics.observe_http_request(method, &route, &status, duration);
            metrics.inc_http_request(method, &route, &status);

            result
        })
    }
}

/// Map HTTP method to a static string so unusual methods share one label.
fn method_str(method: &actix_web::http::Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "PATCH" => "PATCH",
        _ => "OTHER",
    }
}
