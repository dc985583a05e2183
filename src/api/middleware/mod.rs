pub mod error_logger;
pub mod request_id;
pub mod timing;
pub mod trailing_slash;

pub use error_logger::ErrorLogger;
pub use request_id::{RequestId, assign_request_id};
pub use timing::TimingMiddleware;
pub use trailing_slash::{TrailingSlashRedirect, trailing_slash_target};
