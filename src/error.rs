//! Error types for analysis calculations and loaders

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("ROI is undefined for an initial investment of {initial_investment}")]
    UndefinedRoi { initial_investment: f64 },

    #[error("Projection needs {required} yearly rows ordered from year 1, got {actual}")]
    InsufficientProjection { required: usize, actual: usize },

    #[error("Unknown assumption: {0}")]
    UnknownAssumption(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::invalid(field, "must be a finite number"))
    }
}

/// Reject negative or non-finite amounts
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(AnalysisError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

/// Reject values outside the closed unit interval
pub(crate) fn ensure_unit_interval(field: &str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(AnalysisError::invalid(field, format!("must be between 0 and 1, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::invalid("home_value", "must be positive");
        assert_eq!(err.to_string(), "Invalid input: home_value (must be positive)");

        let err = AnalysisError::UndefinedRoi { initial_investment: 0.0 };
        assert!(err.to_string().contains("undefined"));
    }

    #[test]
    fn test_guards() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_non_negative("x", -1.0).is_err());
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_unit_interval("x", 1.0).is_ok());
        assert!(ensure_unit_interval("x", 1.01).is_err());
    }
}
