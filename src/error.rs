//! Error types for the acfperiod library.

use thiserror::Error;

/// Result type alias for seasonality operations.
pub type Result<T> = std::result::Result<T, SeasonalityError>;

/// Errors that can occur while computing autocorrelations or detecting seasonality.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeasonalityError {
    /// Invalid parameter value or unusable input series.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Correlation is undefined for the input (e.g. zero variance).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

impl SeasonalityError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = SeasonalityError::InvalidParameter(
            "max_lag must be smaller than series length".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "invalid parameter: max_lag must be smaller than series length"
        );

        let err = SeasonalityError::DegenerateInput("series has zero variance".to_string());
        assert_eq!(err.to_string(), "degenerate input: series has zero variance");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = SeasonalityError::invalid("max_lag must be at least 1");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
