//! Ping endpoint
//!
//! `GET /ping` -> `{"success":true,"data":"pong"}`

use actix_web::{HttpResponse, Responder, http::header::CONTENT_TYPE};
use serde::Serialize;
use tracing::trace;

use crate::api::constants::JSON_CONTENT_TYPE;

/// Ping 响应体，字段顺序即序列化顺序
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub success: bool,
    pub data: &'static str,
}

impl PingResponse {
    pub const PONG: PingResponse = PingResponse {
        success: true,
        data: "pong",
    };
}

pub struct PingService;

impl PingService {
    pub async fn ping() -> impl Responder {
        trace!("Received ping request");

        HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, JSON_CONTENT_TYPE))
            .json(PingResponse::PONG)
    }
}
