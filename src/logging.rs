//! Activity log verbosity, taken from `RUST_LOG`.

use crate::error_classifier::LogLevel;
use std::sync::OnceLock;

/// Target name used in `RUST_LOG` directives for this crate.
const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Lowest level the activity log shows. `RUST_LOG` is read once per process.
pub fn activity_threshold() -> LogLevel {
    static THRESHOLD: OnceLock<LogLevel> = OnceLock::new();
    *THRESHOLD.get_or_init(|| {
        std::env::var("RUST_LOG")
            .map(|directives| threshold_from_directives(&directives))
            .unwrap_or(LogLevel::Info)
    })
}

/// A directive for this crate wins over a bare default level.
///
/// `reqwest=trace,parking_cli=debug` gives `Debug`, `warn` gives `Warn`, and
/// anything unrecognized falls back to `Info`.
pub fn threshold_from_directives(directives: &str) -> LogLevel {
    let mut default = None;
    for directive in directives.split(',').map(str::trim) {
        match directive.split_once('=') {
            Some((target, level)) if target == CRATE_TARGET => {
                return parse_level(level).unwrap_or(LogLevel::Info);
            }
            Some(_) => {}
            None => default = default.or_else(|| parse_level(directive)),
        }
    }
    default.unwrap_or(LogLevel::Info)
}

fn parse_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}
