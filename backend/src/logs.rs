//! Pipeline logging.
//!
//! Three levels (info, success, warning) on top of the `log` facade. Log
//! lines go wherever the host installed a logger; the `refsheet` binary
//! installs `env_logger` on stderr so stdout stays clean for CSV output.
//! Fatal errors are not logged here: they are returned to the caller.

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogLevel {
    fn facade_level(self) -> log::Level {
        match self {
            LogLevel::Info | LogLevel::Success => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️  ",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }

    /// Text as written to the logger.
    pub fn render(&self) -> String {
        format!("{}{}", self.level.prefix(), self.message)
    }
}

/// Send an entry to the installed logger.
pub fn emit(entry: LogEntry) {
    log::log!(target: "refsheet", entry.level.facade_level(), "{}", entry.render());
}

pub fn log_info(msg: impl Into<String>) {
    emit(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    emit(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    emit(LogEntry::warning(msg));
}

/// Install `env_logger` on stderr.
///
/// `RUST_LOG` wins; otherwise `default_filter` applies (e.g. `"info"`).
/// Calling it twice is harmless.
pub fn init(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefix() {
        assert_eq!(LogEntry::info("hello").render(), "hello");
        assert_eq!(LogEntry::success("done").render(), "✓ done");
        assert_eq!(LogEntry::warning("careful").render(), "⚠️  careful");
    }

    #[test]
    fn test_levels_map_to_facade() {
        assert_eq!(LogLevel::Success.facade_level(), log::Level::Info);
        assert_eq!(LogLevel::Warning.facade_level(), log::Level::Warn);
    }

    #[test]
    fn test_emit_without_logger_is_noop() {
        log_info("nobody listens");
        log_warning("still nobody");
    }
}
