//! Default service for unmatched routes

use actix_web::{HttpRequest, HttpResponse, Responder, http::header::CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

use crate::api::constants::JSON_CONTENT_TYPE;
use crate::api::middleware::RequestId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub message: String,
    pub error: &'static str,
    pub status_code: u16,
}

pub struct NotFoundService;

impl NotFoundService {
    pub async fn not_found(req: HttpRequest) -> impl Responder {
        debug!(
            "No route for {} {} (request {})",
            req.method(),
            req.path(),
            RequestId::describe(&req)
        );

        HttpResponse::NotFound()
            .insert_header((CONTENT_TYPE, JSON_CONTENT_TYPE))
            .json(NotFoundResponse {
                message: format!("Route {}:{} not found", req.method(), req.path()),
                error: "Not Found",
                status_code: 404,
            })
    }
}
