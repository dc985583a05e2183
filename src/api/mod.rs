//! HTTP layer: middleware, route handlers and the shared constants they use.

pub mod constants;
pub mod middleware;
pub mod services;
