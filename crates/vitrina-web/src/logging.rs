//! Structured logging to the browser console using tracing.
//!
//! Events are formatted by `tracing-subscriber` and written through
//! [`ConsoleMakeWriter`], which routes each record to the `console` method
//! matching its level so browser devtools can filter them.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Maximum level for this project's crates.
    pub level: Level,
    /// Maximum level for everything else.
    pub dependency_level: Level,
    /// Whether to include file/line info in logs.
    pub include_file_line: bool,
    /// Whether to include the target module in logs.
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Verbose output for local development.
    #[must_use]
    pub const fn development() -> Self {
        Self {
            level: Level::DEBUG,
            dependency_level: Level::INFO,
            include_file_line: true,
            include_target: true,
        }
    }

    /// Minimal output for deployed pages.
    #[must_use]
    pub const fn production() -> Self {
        Self {
            level: Level::INFO,
            dependency_level: Level::WARN,
            include_file_line: false,
            include_target: false,
        }
    }

    /// Detect configuration based on build type.
    #[must_use]
    pub const fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Set the level for this project's crates.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Filter directive built from the configured levels.
    pub fn directive(&self) -> String {
        let own = level_to_directive(self.level);
        format!(
            "{},vitrina_core={own},vitrina_web={own}",
            level_to_directive(self.dependency_level)
        )
    }
}

/// Convert a tracing Level to a filter directive string.
const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// The `console` method a record is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    /// `console.debug`
    Debug,
    /// `console.log`
    Log,
    /// `console.warn`
    Warn,
    /// `console.error`
    Error,
}

impl ConsoleMethod {
    /// Pick the console method for a level.
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::TRACE | Level::DEBUG => Self::Debug,
            Level::INFO => Self::Log,
            Level::WARN => Self::Warn,
            Level::ERROR => Self::Error,
        }
    }

    fn emit(self, line: &str) {
        let line = JsValue::from_str(line);
        match self {
            Self::Debug => web_sys::console::debug_1(&line),
            Self::Log => web_sys::console::log_1(&line),
            Self::Warn => web_sys::console::warn_1(&line),
            Self::Error => web_sys::console::error_1(&line),
        }
    }
}

/// Buffers one formatted record and writes it to the console on drop.
#[derive(Debug)]
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if !line.is_empty() {
            self.method.emit(line);
        }
    }
}

/// Makes a [`ConsoleWriter`] per record.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::Log,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::for_level(*meta.level()),
            buffer: Vec::new(),
        }
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive did not parse.
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// The parser's message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Install the console subscriber.
///
/// Timestamps are left out: `SystemTime` is unavailable on
/// `wasm32-unknown-unknown` and the console stamps records itself.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let directive = config.directive();
    let filter = EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        directive: directive.clone(),
        reason: e.to_string(),
    })?;

    tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_env_filter(filter)
        .without_time()
        .with_ansi(false)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Initialize logging with automatic configuration detection.
pub fn init_auto() -> Result<(), LoggingError> {
    init(&LoggingConfig::auto())
}
