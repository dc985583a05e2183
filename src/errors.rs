use std::fmt;

#[derive(Debug, Clone)]
pub enum PingdError {
    Config(String),
    Validation(String),
    ServerBind(String),
    Signal(String),
    Metrics(String),
    Logging(String),
    FileOperation(String),
    Serialization(String),
}

impl PingdError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PingdError::Config(_) => "E001",
            PingdError::Validation(_) => "E002",
            PingdError::ServerBind(_) => "E003",
            PingdError::Signal(_) => "E004",
            PingdError::Metrics(_) => "E005",
            PingdError::Logging(_) => "E006",
            PingdError::FileOperation(_) => "E007",
            PingdError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PingdError::Config(_) => "Configuration Error",
            PingdError::Validation(_) => "Validation Error",
            PingdError::ServerBind(_) => "Server Bind Error",
            PingdError::Signal(_) => "Signal Operation Error",
            PingdError::Metrics(_) => "Metrics Error",
            PingdError::Logging(_) => "Logging Error",
            PingdError::FileOperation(_) => "File Operation Error",
            PingdError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PingdError::Config(msg)
            | PingdError::Validation(msg)
            | PingdError::ServerBind(msg)
            | PingdError::Signal(msg)
            | PingdError::Metrics(msg)
            | PingdError::Logging(msg)
            | PingdError::FileOperation(msg)
            | PingdError::Serialization(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PingdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PingdError {}

// 便捷的构造函数
impl PingdError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        PingdError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PingdError::Validation(msg.into())
    }

    pub fn server_bind<T: Into<String>>(msg: T) -> Self {
        PingdError::ServerBind(msg.into())
    }

    pub fn signal<T: Into<String>>(msg: T) -> Self {
        PingdError::Signal(msg.into())
    }

    pub fn metrics<T: Into<String>>(msg: T) -> Self {
        PingdError::Metrics(msg.into())
    }

    pub fn logging<T: Into<String>>(msg: T) -> Self {
        PingdError::Logging(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PingdError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PingdError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<config::ConfigError> for PingdError {
    fn from(err: config::ConfigError) -> Self {
        PingdError::Config(err.to_string())
    }
}

impl From<std::io::Error> for PingdError {
    fn from(err: std::io::Error) -> Self {
        PingdError::FileOperation(err.to_string())
    }
}

impl From<prometheus::Error> for PingdError {
    fn from(err: prometheus::Error) -> Self {
        PingdError::Metrics(err.to_string())
    }
}

impl From<toml::ser::Error> for PingdError {
    fn from(err: toml::ser::Error) -> Self {
        PingdError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PingdError {
    fn from(err: serde_json::Error) -> Self {
        PingdError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PingdError>;
