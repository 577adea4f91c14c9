//! Diagnostic logging for parser internals
//!
//! Logging is disabled unless the `ANSI_ART_DEBUG` environment variable is
//! set to one of `error`, `warn`, `info`, `debug` or `trace`. The variable is
//! read once per process. Output goes to stderr and is intended for
//! diagnosing art files that render unexpectedly, not for callers.

use std::sync::OnceLock;

/// Log severity, ordered from least to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl DebugLevel {
    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "OFF",
            DebugLevel::Error => "ERROR",
            DebugLevel::Warn => "WARN",
            DebugLevel::Info => "INFO",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

fn configured_level() -> DebugLevel {
    static LEVEL: OnceLock<DebugLevel> = OnceLock::new();
    *LEVEL.get_or_init(|| {
        match std::env::var("ANSI_ART_DEBUG")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "error" => DebugLevel::Error,
            "warn" => DebugLevel::Warn,
            "info" => DebugLevel::Info,
            "debug" => DebugLevel::Debug,
            "trace" => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    })
}

/// Check whether messages at `level` are currently emitted
pub fn enabled(level: DebugLevel) -> bool {
    level <= configured_level() && configured_level() != DebugLevel::Off
}

/// Log a message under a category tag
pub fn log(level: DebugLevel, category: &str, message: &str) {
    if enabled(level) {
        eprintln!("[{:5}] {}: {}", level.label(), category, message);
    }
}

/// Log a dispatched control function with its parameters
pub fn log_csi_dispatch(params: &[u16], private: bool, final_byte: char) {
    if enabled(DebugLevel::Trace) {
        let marker = if private { "?" } else { "" };
        log(
            DebugLevel::Trace,
            "CSI",
            &format!("dispatch {}{:?} -> '{}'", marker, params, final_byte),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(DebugLevel::Error < DebugLevel::Trace);
        assert!(DebugLevel::Off < DebugLevel::Error);
    }

    #[test]
    fn test_log_does_not_panic_when_disabled() {
        log(DebugLevel::Trace, "TEST", "ignored");
        log_csi_dispatch(&[1, 2], true, 'm');
    }
}
