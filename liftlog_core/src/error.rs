//! Error types for the liftlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed quantities or dates in a logged set-group
    #[error("Validation error: {0}")]
    Validation(String),

    /// Exercise name not present in the catalog
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Muscle name not present in the catalog
    #[error("Unknown muscle: {0}")]
    UnknownMuscle(String),

    /// Unrecognized progression metric
    #[error("Unknown metric '{0}' (expected weight, reps, volume or sets)")]
    InvalidMetric(String),

    /// Inconsistent exercise catalog; fatal at startup
    #[error("Catalog validation error: {0}")]
    Catalog(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chart rendering error
    #[error("Chart error: {0}")]
    Chart(String),
}

impl Error {
    /// Whether the error only concerns a single record and can be skipped
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::UnknownExercise(_) | Error::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_errors_are_recoverable() {
        assert!(Error::Validation("bad".into()).is_recoverable());
        assert!(Error::UnknownExercise("curl".into()).is_recoverable());
        assert!(!Error::Catalog("broken".into()).is_recoverable());
        assert!(!Error::InvalidMetric("speed".into()).is_recoverable());
    }

    #[test]
    fn test_invalid_metric_message() {
        let msg = Error::InvalidMetric("speed".into()).to_string();
        assert!(msg.contains("'speed'"));
    }
}
