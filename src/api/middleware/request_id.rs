//! Request ID
//!
//! 每个请求分配一个 UUID v4，写入 request extensions 与 `x-request-id` 响应头。
//! 错误日志和 404 日志通过 [`RequestId::describe`] 关联到同一个请求。

use actix_web::{
    Error, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
};
use std::fmt;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use crate::api::constants::REQUEST_ID_HEADER;

/// Shown in logs for requests that bypassed [`assign_request_id`]
const MISSING_REQUEST_ID: &str = "-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Id attached to `req`, if any
    pub fn of(req: &impl HttpMessage) -> Option<Self> {
        req.extensions().get::<RequestId>().copied()
    }

    /// Id attached to `req` as a log-friendly string
    pub fn describe(req: &impl HttpMessage) -> String {
        Self::of(req)
            .map(|id| id.to_string())
            .unwrap_or_else(|| MISSING_REQUEST_ID.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// `from_fn` middleware: tag the request, run it inside a `request` span,
/// echo the id back to the client.
pub async fn assign_request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = RequestId::generate();
    req.extensions_mut().insert(id);

    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.path(),
    );

    async move {
        let mut response = next.call(req).await?;
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        Ok(response)
    }
    .instrument(span)
    .await
}
