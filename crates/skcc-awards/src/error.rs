use crate::awards::AwardError;
use crate::config::ConfigError;
use crate::logbook::ContactImportError;
use crate::roster::RosterImportError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Award(AwardError),
    Roster(RosterImportError),
    Contacts(ContactImportError),
    Output(serde_json::Error),
}

impl AppError {
    /// Process exit code for the CLI: 2 for bad input, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Award(AwardError::UnknownAward { .. })
            | AppError::Contacts(_)
            | AppError::Config(_) => 2,
            AppError::Award(AwardError::MalformedLadder(_))
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Roster(_)
            | AppError::Output(_) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Award(err) => write!(f, "award error: {}", err),
            AppError::Roster(err) => write!(f, "roster error: {}", err),
            AppError::Contacts(err) => write!(f, "contact log error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Award(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::Contacts(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<AwardError> for AppError {
    fn from(value: AwardError) -> Self {
        Self::Award(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Roster(value)
    }
}

impl From<ContactImportError> for AppError {
    fn from(value: ContactImportError) -> Self {
        Self::Contacts(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unknown_award_is_a_usage_error() {
        let err = AppError::from(AwardError::UnknownAward {
            name: "Marathon".to_string(),
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "award error: unknown award 'Marathon'");
        assert!(err.source().is_some());
    }

    #[test]
    fn io_failures_exit_with_one() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
        assert_eq!(err.exit_code(), 1);
    }
}
