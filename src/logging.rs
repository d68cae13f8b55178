//! Logging configuration and initialization
//!
//! Structured logging for the whole service via `tracing`. Configuration
//! comes from the environment: `LOG_LEVEL` (trace/debug/info/warn/error),
//! `LOG_FORMAT` (text/json) and `LOG_FILTER` for per-module directives such
//! as `sqlx=warn,tower_http=debug`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("Invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogConfig {
    /// Minimum log level to display
    pub level: LogLevel,
    /// Log format (text or JSON)
    pub format: LogFormat,
    /// Additional filter directives, e.g. "sqlx=warn,tower_http=debug"
    pub filter_directives: Option<String>,
}

impl LogConfig {
    /// Build logging configuration from the environment
    pub fn from_env() -> Result<Self> {
        let level = match std::env::var("LOG_LEVEL") {
            Ok(s) => s.parse()?,
            Err(_) => LogLevel::default(),
        };

        let format = match std::env::var("LOG_FORMAT") {
            Ok(s) => s.parse()?,
            Err(_) => LogFormat::default(),
        };

        let filter_directives = std::env::var("LOG_FILTER").ok();

        Ok(Self {
            level,
            format,
            filter_directives,
        })
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(self.level.as_str());
        if let Some(directives) = &self.filter_directives {
            for directive in directives.split(',') {
                if let Ok(parsed) = directive.trim().parse() {
                    filter = filter.add_directive(parsed);
                }
            }
        }
        filter
    }
}

/// Initialize the global tracing subscriber
///
/// Must be called once at startup, before any log statements are emitted.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = config.env_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
        },
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        },
    }

    Ok(())
}
