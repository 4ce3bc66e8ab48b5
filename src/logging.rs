//! Logging bootstrap for embedders.
//!
//! Every crate in the workspace logs through `tracing`. Nothing is printed
//! until the embedder installs a subscriber, either its own or the one
//! [`init_logging`] builds.
//!
//! ```no_run
//! use scriptext::logging::{LogConfig, LogFormat, init_logging};
//!
//! init_logging(&LogConfig::default().with_format(LogFormat::Pretty)).unwrap();
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt as subscriber_fmt};

// Re-export tracing macros for embedders that log alongside the registry
pub use tracing::{debug, error, info, trace, warn};

/// Errors from installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directives did not parse.
    #[error("invalid log filter {directives:?}: {reason}")]
    InvalidFilter { directives: String, reason: String },

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),

    /// Unrecognized output format name.
    #[error("unknown log format '{0}' (expected compact, pretty or json)")]
    UnknownFormat(String),
}

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Subscriber settings.
///
/// With no explicit `filter`, `RUST_LOG` is honoured and `level` is the
/// fallback for anything it does not mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `"scriptext_registry=debug,warn"`.
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match &self.filter {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|e| LoggingError::InvalidFilter {
                    directives: directives.clone(),
                    reason: e.to_string(),
                })
            }
            None => Ok(EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(self.level).into())
                .from_env_lossy()),
        }
    }
}

/// Install a global `tracing` subscriber.
///
/// Safe to call more than once; every call after the first successful one
/// returns [`LoggingError::AlreadyInitialized`].
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;
    let builder = subscriber_fmt().with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    Ok(())
}
