//! Progress logging.
//!
//! Thin helpers over `tracing` so pipeline steps read the same everywhere.
//! The binary installs a stderr subscriber with [`init`]; library users can
//! install their own.

use tracing_subscriber::EnvFilter;

/// Log level of a progress message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

/// Emit one message; `indent` marks nested steps.
pub fn log(level: LogLevel, message: &str, indent: u8) {
    match level {
        LogLevel::Info => tracing::info!(indent, "{}", message),
        LogLevel::Success => tracing::info!(indent, status = "ok", "{}", message),
        LogLevel::Warning => tracing::warn!(indent, "{}", message),
    }
}

pub fn log_info(msg: impl AsRef<str>) {
    log(LogLevel::Info, msg.as_ref(), 0);
}

pub fn log_success(msg: impl AsRef<str>) {
    log(LogLevel::Success, msg.as_ref(), 0);
}

pub fn log_warning(msg: impl AsRef<str>) {
    log(LogLevel::Warning, msg.as_ref(), 0);
}

pub fn log_info_indent(msg: impl AsRef<str>, indent: u8) {
    log(LogLevel::Info, msg.as_ref(), indent);
}

/// Install a stderr subscriber. `RUST_LOG` wins over `debug`.
pub fn init(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be set (tests, embedding applications).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
