//! Logging setup for hosts embedding landmark
//!
//! The library itself only emits `tracing` events: parse counts and search
//! walks at debug, bad markers and config files at warn.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=landmark::search=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/landmark/logs/landmark.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. Does nothing if
/// the host has already installed a global subscriber.
pub fn init() {
    match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            install(Some(logs_dir.as_path()));
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            install(None);
        }
    }
}

/// Install the console layer, plus a daily rolling file layer in `logs_dir`.
///
/// Returns false when a global subscriber was already set.
fn install(logs_dir: Option<&Path>) -> bool {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = logs_dir.map(|dir| {
        let file_appender = tracing_appender::rolling::daily(dir, "landmark.log");
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new("debug"))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_silently_refused() {
        let dir = tempfile::tempdir().unwrap();
        install(Some(dir.path()));
        assert!(!install(Some(dir.path())));
        assert!(!install(None));
        tracing::debug!("first subscriber still receives events");
    }
}
