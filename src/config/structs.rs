use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{PingdError, Result};

/// 默认配置文件（工作目录下，可选）
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prefix for structured environment overrides, e.g. `PINGD__SERVER__PORT=9999`.
pub const ENV_PREFIX: &str = "PINGD";

/// Plain environment variables and the config keys they override.
///
/// These win over every other source.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("HOST", "server.host"),
    ("LOG_LEVEL", "logging.level"),
    ("NODE_ENV", "environment"),
];

/// 运行环境
///
/// 只有 `Production` 会关闭 handler 错误日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunEnvironment {
    Production,
    #[default]
    Development,
    Test,
}

impl RunEnvironment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }
}

impl std::fmt::Display for RunEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunEnvironment {
    type Err = std::convert::Infallible;

    /// Never fails: anything that is not production or test counts as development.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        })
    }
}

impl From<String> for RunEnvironment {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(env) => env,
            Err(never) => match never {},
        }
    }
}

impl From<RunEnvironment> for String {
    fn from(value: RunEnvironment) -> Self {
        value.as_str().to_string()
    }
}

/// 静态配置（启动时加载，运行期间不变）
///
/// - server: 监听地址、端口、worker 数量
/// - logging: 日志级别、格式、输出位置
/// - metrics: Prometheus 端点与指标前缀
/// - routes: 尾斜杠处理策略
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub environment: RunEnvironment,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：PORT/HOST/LOG_LEVEL/NODE_ENV > PINGD__* > TOML > 默认值
    ///
    /// Without an explicit path, `config.toml` in the working directory is
    /// read when it exists. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(path, &env)
    }

    /// Same as [`StaticConfig::load`], reading variables from `env` instead of
    /// the process environment.
    pub fn load_from(path: Option<&Path>, env: &HashMap<String, String>) -> Result<Self> {
        use config::{Config, Environment, File};

        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let mut builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(
                    env.iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                )),
        );

        for (var, key) in ENV_OVERRIDES {
            let value = env.get(*var).filter(|v| !v.is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let config: StaticConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置的基本合法性
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(PingdError::validation("server.host must not be empty"));
        }
        if self.server.workers == 0 {
            return Err(PingdError::validation("server.workers must be at least 1"));
        }

        let endpoint = &self.metrics.endpoint;
        if endpoint.is_empty() || !endpoint.starts_with('/') {
            return Err(PingdError::validation(format!(
                "metrics.endpoint must start with '/', got '{}'",
                endpoint
            )));
        }
        if endpoint == crate::api::constants::PING_PATH {
            return Err(PingdError::validation(format!(
                "metrics.endpoint conflicts with the ping route '{}'",
                endpoint
            )));
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(PingdError::validation(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// 当前配置序列化为 TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// `host:port` string used for binding and log output
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

/// Prometheus 指标配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
    /// Prepended to every metric name as `<prefix>_`
    #[serde(default = "default_metrics_prefix")]
    pub prefix: String,
    #[serde(default = "default_system_refresh_interval")]
    pub system_refresh_interval_secs: u64,
}

/// 路由行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// `/foo/` -> 301 `/foo`
    #[serde(default = "default_true")]
    pub redirect_trailing_slash: bool,
    /// `/foo/` is served as `/foo`; only used when redirecting is off
    #[serde(default = "default_true")]
    pub ignore_trailing_slash: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_enable_rotation() -> bool {
    true
}

fn default_max_backups() -> u32 {
    5
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

fn default_metrics_prefix() -> String {
    "pingd".to_string()
}

fn default_system_refresh_interval() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            enable_rotation: default_enable_rotation(),
            max_backups: default_max_backups(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_metrics_endpoint(),
            prefix: default_metrics_prefix(),
            system_refresh_interval_secs: default_system_refresh_interval(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            ignore_trailing_slash: true,
        }
    }
}
