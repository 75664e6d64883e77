//! Level filtering for activity events, driven by `RUST_LOG`.

pub use crate::error_classifier::LogLevel;
use std::env;
use std::str::FromStr;

/// Target name that `RUST_LOG` directives use for this crate.
const CRATE_TARGET: &str = "wind_dashboard";

const DEFAULT_LEVEL: LogLevel = LogLevel::Info;

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

/// Level that applies to this crate's events for a `RUST_LOG` value.
///
/// A `wind_dashboard=<level>` directive wins over a bare level. Directives for
/// other targets and unknown levels are ignored.
pub fn level_for_crate(rust_log: &str) -> LogLevel {
    let mut bare = None;
    for directive in rust_log.split(',').map(str::trim) {
        match directive.split_once('=') {
            Some((target, level)) if target.trim() == CRATE_TARGET => {
                if let Ok(level) = level.parse() {
                    return level;
                }
            }
            Some(_) => {}
            None => bare = directive.parse().ok().or(bare),
        }
    }
    bare.unwrap_or(DEFAULT_LEVEL)
}

/// Threshold for activity events, read from `RUST_LOG` on every call.
pub fn event_threshold() -> LogLevel {
    env::var("RUST_LOG")
        .map(|value| level_for_crate(&value))
        .unwrap_or(DEFAULT_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level() {
        assert_eq!(level_for_crate("debug"), LogLevel::Debug);
        assert_eq!(level_for_crate(" WARNING "), LogLevel::Warn);
        assert_eq!(level_for_crate(""), LogLevel::Info);
        assert_eq!(level_for_crate("loud"), LogLevel::Info);
    }

    #[test]
    fn test_crate_directive_wins_over_bare_level() {
        assert_eq!(level_for_crate("error,wind_dashboard=trace"), LogLevel::Trace);
        assert_eq!(level_for_crate("wind_dashboard=debug,warn"), LogLevel::Debug);
    }

    #[test]
    fn test_other_targets_are_ignored() {
        assert_eq!(level_for_crate("reqwest=trace"), LogLevel::Info);
        assert_eq!(level_for_crate("hyper=debug,error"), LogLevel::Error);
        assert_eq!(level_for_crate("wind_dashboard=nonsense,warn"), LogLevel::Warn);
    }
}
