//! Trailing slash redirect middleware
//!
//! `GET /foo/` -> `301 Moved Permanently`, `Location: /foo`. The root path is
//! never redirected and the query string is carried over unchanged.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HOST, LOCATION},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

use crate::metrics::MetricsRecorder;

/// Path (plus query) the request should be redirected to, if any.
///
/// Only one trailing slash is removed per redirect. Leading slashes are
/// collapsed to one, so the target is always a path on this host and never
/// a protocol-relative URL such as `//other.host`.
pub fn trailing_slash_target(path: &str, query: &str) -> Option<String> {
    if path.len() <= 1 || !path.ends_with('/') {
        return None;
    }

    let without_slash = &path[..path.len() - 1];
    let rest = without_slash.trim_start_matches('/');
    let trimmed = format!("/{}", rest);
    if query.is_empty() {
        Some(trimmed)
    } else {
        Some(format!("{}?{}", trimmed, query))
    }
}

#[derive(Clone)]
pub struct TrailingSlashRedirect {
    metrics: Arc<dyn MetricsRecorder>,
}

impl TrailingSlashRedirect {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TrailingSlashRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TrailingSlashRedirectMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TrailingSlashRedirectMiddleware {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct TrailingSlashRedirectMiddleware<S> {
    service: Rc<S>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S> TrailingSlashRedirectMiddleware<S> {
    /// Absolute location when the client sent a Host header, bare path otherwise.
    fn location(req: &ServiceRequest, target: &str) -> String {
        match req.headers().get(HOST).and_then(|h| h.to_str().ok()) {
            Some(host) if !host.is_empty() => {
                let scheme = req.connection_info().scheme().to_string();
                format!("{}://{}{}", scheme, host, target)
            }
            _ => target.to_string(),
        }
    }
}

impl<S, B> Service<ServiceRequest> for TrailingSlashRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(target) = trailing_slash_target(req.path(), req.query_string()) {
            let location = Self::location(&req, &target);
            debug!("Redirecting {} -> {}", req.path(), location);
            self.metrics.inc_redirect("301");

            return Box::pin(async move {
                Ok(req.into_response(
                    HttpResponse::MovedPermanently()
                        .insert_header((LOCATION, location))
                        .finish()
                        .map_into_right_body(),
                ))
            });
        }

        let srv = self.service.clone();
        Box::pin(async move {
            let response = srv.call(req).await?.map_into_left_body();
            Ok(response)
        })
    }
}
