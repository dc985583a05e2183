//! API 模块常量定义

/// Ping 路由
pub const PING_PATH: &str = "/ping";

/// Ping 响应的 Content-Type
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Prometheus 文本格式的 Content-Type
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 未匹配路由在指标中的 route 标签
pub const UNMATCHED_ROUTE: &str = "unmatched";
