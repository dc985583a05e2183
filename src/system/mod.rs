//! System-level modules
//!
//! - Logging initialization
//! - Global panic handling

pub mod logging;
pub mod panic_handler;
