//! Panic handler module
//!
//! Panics are logged and otherwise left alone. A panicking request handler
//! only takes down its actix worker, which the server restarts, so the
//! process keeps serving.
//! - Server mode: log with backtrace and print a detailed block to stderr
//! - CLI mode: log and print a one-line message

use std::panic;

/// Running mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Server,
    Cli,
}

/// Extract the panic message from a payload
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Install custom panic hook
pub fn install_panic_hook(mode: RunMode) {
    panic::set_hook(Box::new(move |panic_info| {
        let message = panic_message(panic_info.payload());

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "Unknown location".to_string());

        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("<unnamed>");

        match mode {
            RunMode::Server => {
                let backtrace = std::backtrace::Backtrace::force_capture();
                tracing::error!(
                    thread = thread_name,
                    location = %location,
                    "Uncaught panic: {}",
                    message
                );
                tracing::debug!("Panic backtrace:\n{}", backtrace);
                display_server_panic(&message, &location, thread_name, &backtrace);
            }
            RunMode::Cli => {
                tracing::error!(location = %location, "Uncaught panic: {}", message);
                display_simple_panic(&message);
            }
        }
    }));
}

/// Server mode: Display detailed colored stack trace information
fn display_server_panic(
    message: &str,
    location: &str,
    thread_name: &str,
    backtrace: &std::backtrace::Backtrace,
) {
    use colored::Colorize;

    eprintln!();
    eprintln!("{}", "═══════════════════════════════════════════════════".red().bold());
    eprintln!("{}", "PANIC".red().bold());
    eprintln!("{}", "═══════════════════════════════════════════════════".red().bold());
    eprintln!();
    eprintln!("{} {}", "Reason:".yellow().bold(), message.white());
    eprintln!("{} {}", "Location:".yellow().bold(), location.white());
    eprintln!("{} {}", "Thread:".yellow().bold(), thread_name.white());
    eprintln!();
    eprintln!("{}", "Backtrace:".yellow().bold());
    eprintln!("{}", format!("{:?}", backtrace).dimmed());
    eprintln!();
    eprintln!("{}", "The server keeps running; the worker will be restarted".cyan());
    eprintln!("{}", "═══════════════════════════════════════════════════".red().bold());
    eprintln!();
}

/// CLI mode: Display simple error message
fn display_simple_panic(message: &str) {
    eprintln!();
    eprintln!("Program panicked: {}", message);
    eprintln!();
}
