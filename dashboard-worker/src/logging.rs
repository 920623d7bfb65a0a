//! Console logging
//!
//! On the worker the macros forward to `worker::console_*`; native builds
//! (unit tests) print to stderr instead of calling into JS.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log verbosity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "trace" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Set the threshold; called once per fetch event from config
pub fn set_max_level(level: LogLevel) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: LogLevel) -> bool {
    (level as u8) <= MAX_LEVEL.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub fn emit(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    match level {
        LogLevel::Error => worker::console_error!("{}", message),
        LogLevel::Warn => worker::console_warn!("{}", message),
        LogLevel::Info | LogLevel::Debug => worker::console_log!("{}", message),
    }

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[{level}] {message}");
}

macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Warn, &format!($($arg)*))
    };
}

macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logging::enabled($crate::logging::LogLevel::Debug) {
            $crate::logging::emit($crate::logging::LogLevel::Debug, &format!($($arg)*))
        }
    };
}

pub(crate) use {log_debug, log_error, log_info, log_warn};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Info < LogLevel::Debug);
    }
}
