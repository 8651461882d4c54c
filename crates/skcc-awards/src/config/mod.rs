use chrono::{Duration, NaiveDate};
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::awards::{OperatorProfile, DEFAULT_HOME_DXCC};

const DEFAULT_CACHE_TTL_SECS: i64 = 300;

/// Distinguishes runtime behavior for different stages of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub operator: OperatorProfile,
    pub roster: RosterConfig,
    pub cache: CacheConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let operator = OperatorProfile {
            callsign: non_empty("OPERATOR_CALLSIGN").map(|call| call.to_ascii_uppercase()),
            centurion_date: optional_date("OPERATOR_CENTURION_DATE")?,
            tribune_x8_date: optional_date("OPERATOR_TRIBUNE_X8_DATE")?,
            home_dxcc: match non_empty("OPERATOR_DXCC") {
                Some(value) => value
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidDxcc { value })?,
                None => DEFAULT_HOME_DXCC,
            },
        };

        let ttl_secs = match non_empty("AWARD_CACHE_TTL_SECS") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .ok_or(ConfigError::InvalidCacheTtl { value })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            operator,
            roster: RosterConfig {
                dir: non_empty("ROSTER_DIR").map(PathBuf::from),
            },
            cache: CacheConfig { ttl_secs },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the published achievement lists live on disk.
#[derive(Debug, Clone, Default)]
pub struct RosterConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl_secs: i64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_secs)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn optional_date(var: &'static str) -> Result<Option<NaiveDate>, ConfigError> {
    let Some(value) = non_empty(var) else {
        return Ok(None);
    };
    parse_config_date(&value)
        .map(Some)
        .ok_or(ConfigError::InvalidDate { var, value })
}

/// `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_config_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .ok()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDate { var: &'static str, value: String },
    InvalidDxcc { value: String },
    InvalidCacheTtl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDate { var, value } => {
                write!(f, "{var} must be YYYY-MM-DD or YYYYMMDD, got '{value}'")
            }
            ConfigError::InvalidDxcc { value } => {
                write!(f, "OPERATOR_DXCC must be a DXCC entity number, got '{value}'")
            }
            ConfigError::InvalidCacheTtl { value } => write!(
                f,
                "AWARD_CACHE_TTL_SECS must be a non-negative number of seconds, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
