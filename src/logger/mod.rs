//! Structured logging for the homework bot
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Critical/Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Dual output: colored console + log file (overwritten on each start)
//! - A `log` facade bridge for dependency crates
//!
//! ## Usage
//!
//! ```rust,ignore
//! use homework_bot::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Endpoint unavailable");
//! logger::info(LogTag::Poller, "Poll cycle started");
//! logger::debug(LogTag::Telegram, "Message sent"); // Only with --debug-telegram
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, before any logging:
//! ```rust,ignore
//! logger::init();
//! logger::init_file(Path::new("homework_bot.log"))?;
//! ```

mod bridge;
mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{
    config_from_args, get_logger_config, init_from_args, set_logger_config,
    update_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

use std::path::Path;

/// Initialize the logger system
///
/// Parses command-line arguments for debug flags and installs the `log`
/// bridge so dependency warnings share the same output.
pub fn init() {
    config::init_from_args();
    bridge::install(bridge::max_level(&config::get_logger_config()));
}

/// Start mirroring log lines into `path` (truncates an existing file)
pub fn init_file(path: &Path) -> std::io::Result<()> {
    file::init_file_logging(path)
}

/// Apply the minimum level from settings, unless flags already asked for one
pub fn apply_min_level(level: LogLevel) {
    config::update_logger_config(|c| config::apply_settings_level(c, level));
}

/// Log at CRITICAL level (process is about to terminate)
pub fn critical(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Critical, message);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when --debug-<tag> (or --debug-all) is provided.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending file writes
pub fn flush() {
    file::flush_file_logging();
}
