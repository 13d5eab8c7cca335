// src/utils/logger.rs

use serde_json::Value;
use std::sync::OnceLock;

#[cfg(target_arch = "wasm32")]
use worker::console_log;

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_log {
    ($($arg:tt)*) => {
        println!($($arg)*);
    };
}

/// Log levels supported by the logger
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn from_string(s: &str) -> LogLevel {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" | "trace" => LogLevel::Debug,
            _ => LogLevel::Info, // default
        }
    }

    fn from_log(level: log::Level) -> LogLevel {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }

    fn to_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

/// JSON-line logger for the worker console
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn should_log(&self, level: &LogLevel) -> bool {
        level <= &self.level
    }

    fn format_message(&self, level: &LogLevel, message: &str, meta: Option<&Value>) -> String {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC");

        let mut log_obj = serde_json::json!({
            "timestamp": timestamp.to_string(),
            "level": level.as_str(),
            "message": message,
        });

        if let Some(meta) = meta {
            log_obj["meta"] = meta.clone();
        }

        serde_json::to_string(&log_obj)
            .unwrap_or_else(|_| format!("[{}] {}: {}", timestamp, level.as_str(), message))
    }

    fn emit(&self, level: LogLevel, message: &str, meta: Option<&Value>) {
        if self.should_log(&level) {
            let formatted = self.format_message(&level, message, meta);
            console_log!("{}", formatted);
        }
    }

    /// Logs `error` at error level, merged into the `context` object when one is given.
    pub fn add_error(&self, error: &dyn std::error::Error, context: Option<&Value>) {
        let meta = error_meta(error, context);
        self.emit(LogLevel::Error, "An error occurred", Some(&meta));
    }
}

fn error_meta(error: &dyn std::error::Error, context: Option<&Value>) -> Value {
    let mut meta = match context {
        Some(Value::Object(map)) => Value::Object(map.clone()),
        _ => Value::Object(serde_json::Map::new()),
    };
    meta["error"] = Value::String(error.to_string());
    meta
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.should_log(&LogLevel::from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let meta = serde_json::json!({ "target": record.target() });
        self.emit(
            LogLevel::from_log(record.level()),
            &record.args().to_string(),
            Some(&meta),
        );
    }

    fn flush(&self) {}
}

/// Global logger instance - thread-safe singleton
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Initialize the global logger and route the `log` facade through it.
///
/// Only the first call takes effect; later calls keep the existing level.
pub fn init_logger(level: LogLevel) {
    let filter = level.to_filter();
    if GLOBAL_LOGGER.set(Logger::new(level)).is_ok() && log::set_logger(logger()).is_ok() {
        log::set_max_level(filter);
    }
}

/// Get a reference to the global logger
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| Logger::new(LogLevel::Info))
}

/// Install the panic hook that forwards Rust panics to the worker console.
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}
