use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize diagnostics logging on stderr.
///
/// - Filtering comes from `RUST_LOG` (defaults to "warn" if not set)
/// - JSON with flattened event fields when stderr is not a terminal
/// - Compact human output otherwise
///
/// Stdout stays reserved for reports.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match default_log_mode() {
        LogMode::Json => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .init(),
        LogMode::Compact => fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init(),
    }
}

pub fn default_log_mode() -> LogMode {
    if io::stderr().is_terminal() {
        LogMode::Compact
    } else {
        LogMode::Json
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Json,
    Compact,
}
