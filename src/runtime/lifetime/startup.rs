use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::services::AppStartTime;
use crate::config::{RoutesConfig, StaticConfig};
use crate::metrics::{MetricsRecorder, PrometheusMetrics};

/// Everything a worker needs to build its `App`; cloned once per worker.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<PrometheusMetrics>,
    pub start_time: AppStartTime,
    pub routes: RouteConfig,
    /// 非 production 环境记录 handler 错误
    pub log_handler_errors: bool,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub metrics_endpoint: String,
    pub redirect_trailing_slash: bool,
    pub ignore_trailing_slash: bool,
}

impl RouteConfig {
    pub fn new(metrics_endpoint: impl Into<String>, routes: &RoutesConfig) -> Self {
        Self {
            metrics_endpoint: metrics_endpoint.into(),
            redirect_trailing_slash: routes.redirect_trailing_slash,
            ignore_trailing_slash: routes.ignore_trailing_slash,
        }
    }

    /// Trim trailing slashes silently instead of redirecting
    pub fn normalize_trailing_slash(&self) -> bool {
        !self.redirect_trailing_slash && self.ignore_trailing_slash
    }
}

pub struct StartupContext {
    pub state: AppState,
    pub metrics: Arc<dyn MetricsRecorder>,
}

/// 准备服务器启动的上下文
/// 包括指标注册表、启动时间和路由配置
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let metrics = Arc::new(
        PrometheusMetrics::new(&config.metrics.prefix)
            .context("Failed to create metrics registry")?,
    );
    debug!(
        "Metrics registry created with prefix '{}'",
        config.metrics.prefix
    );

    let routes = RouteConfig::new(config.metrics.endpoint.clone(), &config.routes);
    if routes.redirect_trailing_slash {
        debug!("Trailing slash handling: redirect (301)");
    } else if routes.ignore_trailing_slash {
        debug!("Trailing slash handling: ignore");
    } else {
        debug!("Trailing slash handling: strict");
    }

    let log_handler_errors = !config.environment.is_production();
    info!(
        "Environment: {} (handler error logging {})",
        config.environment,
        if log_handler_errors { "on" } else { "off" }
    );

    let state = AppState {
        metrics: metrics.clone(),
        start_time: AppStartTime::now(),
        routes,
        log_handler_errors,
    };

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        state,
        metrics,
    })
}
