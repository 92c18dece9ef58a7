// Logging and tracing setup
//
// Library code only emits `tracing` events. Binaries and tests opt into a
// subscriber through `init_logging`.

use std::fmt::Display;
use tracing::Span;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    pub fn builder() -> LogConfigBuilder {
        LogConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct LogConfigBuilder {
    level: Option<LogLevel>,
    format: Option<LogFormat>,
}

impl LogConfigBuilder {
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn build(self) -> LogConfig {
        let default = LogConfig::default();
        LogConfig {
            level: self.level.unwrap_or(default.level),
            format: self.format.unwrap_or(default.format),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Install a global subscriber. `RUST_LOG` wins over `config.level`.
///
/// Returns `false` when a subscriber was already installed, which happens
/// routinely when several tests share a process.
pub fn init_logging(config: LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Pretty => builder.try_init().is_ok(),
    };

    if installed {
        tracing::debug!(level = config.level.as_str(), "Logging initialized");
    }
    installed
}

/// Span wrapping one management API call
pub fn request_span(operation: &str, organization: &str) -> Span {
    tracing::info_span!(
        "edge_request",
        operation = operation,
        organization = organization,
        request_id = %generate_request_id()
    )
}

pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Mask a secret for logs and `Debug` output. Only emptiness is revealed.
pub fn redact<T: Display>(value: T) -> String {
    if value.to_string().is_empty() {
        "[EMPTY]".to_string()
    } else {
        "[REDACTED]".to_string()
    }
}
