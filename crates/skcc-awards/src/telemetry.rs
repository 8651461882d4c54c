use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured level.
pub const RUST_LOG_VAR: &str = "RUST_LOG";
const APP_LOG_LEVEL_VAR: &str = "APP_LOG_LEVEL";

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter {
        var: &'static str,
        value: String,
        source: ParseError,
    },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { var, value, .. } => {
                write!(f, "{var} is not a valid log filter: '{value}'")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "skcc-tracker log subscriber could not be installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Filter from a non-blank `RUST_LOG` when given, otherwise from `APP_LOG_LEVEL`.
/// A malformed value is reported against the variable it came from.
pub fn filter_for(
    config: &TelemetryConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    let (var, value) = match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => (RUST_LOG_VAR, value),
        None => (APP_LOG_LEVEL_VAR, config.log_level.trim()),
    };
    EnvFilter::try_new(value).map_err(|source| TelemetryError::InvalidFilter {
        var,
        value: value.to_string(),
        source,
    })
}

/// Install the process-wide subscriber. Logs go to stderr so report output
/// on stdout stays machine-readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(RUST_LOG_VAR).ok();
    let env_filter = filter_for(config, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
