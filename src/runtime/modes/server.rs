//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{
    App, HttpServer,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Condition, NormalizePath, from_fn},
    web,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::middleware::{
    ErrorLogger, TimingMiddleware, TrailingSlashRedirect, assign_request_id,
};
use crate::api::services::{NotFoundService, api_routes};
use crate::config::StaticConfig;
use crate::errors::PingdError;
use crate::metrics::MetricsRecorder;
use crate::runtime::lifetime::shutdown::ShutdownSignals;
use crate::runtime::lifetime::startup::{AppState, prepare_server_startup};

/// Handler error logging, enabled outside production
pub fn handler_error_logging(state: &AppState) -> Condition<ErrorLogger> {
    Condition::new(state.log_handler_errors, ErrorLogger)
}

/// Build the application for one worker
///
/// Middleware order, outermost first: timing, request id, error logging,
/// trailing slash handling. Timing sits outside the redirect so 301s are
/// counted too.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let recorder: Arc<dyn MetricsRecorder> = state.metrics.clone();
    let metrics_endpoint = state.routes.metrics_endpoint.clone();

    App::new()
        .app_data(web::Data::new(state.metrics.clone()))
        .app_data(web::Data::new(state.start_time.clone()))
        .wrap(Condition::new(
            state.routes.normalize_trailing_slash(),
            NormalizePath::trim(),
        ))
        .wrap(Condition::new(
            state.routes.redirect_trailing_slash,
            TrailingSlashRedirect::new(recorder.clone()),
        ))
        .wrap(handler_error_logging(&state))
        .wrap(from_fn(assign_request_id))
        .wrap(TimingMiddleware::new(recorder))
        .configure(|cfg| api_routes(cfg, &metrics_endpoint))
        .default_service(web::to(NotFoundService::not_found))
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(config: Arc<StaticConfig>) -> Result<()> {
    // 先注册信号，再绑定端口
    let mut signals = ShutdownSignals::register().context("Failed to register shutdown signals")?;

    let startup = prepare_server_startup(&config)?;

    #[cfg(feature = "process-metrics")]
    crate::metrics::spawn_system_metrics_updater(
        startup.metrics.clone(),
        config.metrics.system_refresh_interval_secs,
    );
    #[cfg(not(feature = "process-metrics"))]
    let _ = &startup.metrics;

    let state = startup.state;
    let bind_address = config.bind_address();

    // 关闭 actix 自带的信号处理，只由 ShutdownSignals 负责退出
    let server = HttpServer::new(move || build_app(state.clone()))
        .workers(config.server.workers)
        .disable_signals()
        .bind(&bind_address)
        .map_err(|e| {
            PingdError::server_bind(format!("Failed to bind {}: {}", bind_address, e))
        })?;

    for addr in server.addrs() {
        info!("Server listening on http://{}", addr);
    }
    info!(
        "Metrics available at {}, ping at {}",
        config.metrics.endpoint,
        crate::api::constants::PING_PATH
    );

    let server = server.run();
    let handle = server.handle();
    tokio::pin!(server);

    let signal = tokio::select! {
        res = &mut server => {
            res.context("HTTP server terminated with an error")?;
            return Ok(());
        }
        signal = signals.recv() => signal,
    };

    warn!("Received {}, shutting down", signal);

    // 立即停止，不等待进行中的请求
    let ((), res) = tokio::join!(handle.stop(false), server);
    res.context("HTTP server failed during shutdown")?;

    info!("Server stopped");
    Ok(())
}
