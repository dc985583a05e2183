pub mod fallback;
pub mod metrics;
pub mod ping;

use actix_web::web;

use crate::api::constants::PING_PATH;

pub use fallback::NotFoundService;
pub use metrics::MetricsService;
pub use ping::{PingResponse, PingService};

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (chrono::Utc::now() - self.start_datetime).num_seconds().max(0)
    }
}

/// 注册全部路由
pub fn api_routes(cfg: &mut web::ServiceConfig, metrics_endpoint: &str) {
    cfg.route(PING_PATH, web::get().to(PingService::ping))
        .route(PING_PATH, web::head().to(PingService::ping))
        .route(metrics_endpoint, web::get().to(MetricsService::metrics));
}
