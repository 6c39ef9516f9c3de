//! Conversion errors
//!
//! Errors never crash the engine. A failed conversion ends a single
//! request; [`ErrorReport`] is the structured form handed to callers that
//! speak JSON.

use crate::NumberError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
    pub const RATE_FETCH_FAILED: &str = "RATE_FETCH_FAILED";
    pub const CROSS_CATEGORY_UNIT: &str = "CROSS_CATEGORY_UNIT";
    pub const ARITHMETIC: &str = "ARITHMETIC";
}

/// Everything that can stop a single conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Unit key not present in the category's table
    #[error("unknown unit '{unit}' in {category}")]
    UnknownUnit { category: String, unit: String },

    /// Category id not known to the registry
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Input text could not be parsed as a number
    #[error("malformed input: {0:?}")]
    MalformedInput(String),

    /// Exchange-rate refresh failed; the engine keeps running on what it has
    #[error("exchange rate refresh failed: {reason}")]
    RateFetchFailed { reason: String, retryable: bool },

    /// Unit belongs to another category (caller contract violation)
    #[error("unit '{unit}' belongs to {found}, not {expected}")]
    CrossCategoryUnit { unit: String, expected: String, found: String },

    /// Numeric failure inside a conversion formula
    #[error(transparent)]
    Arithmetic(#[from] NumberError),
}

impl ConversionError {
    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit { category: category.into(), unit: unit.into() }
    }

    pub fn rate_fetch_failed(reason: impl Into<String>) -> Self {
        Self::RateFetchFailed { reason: reason.into(), retryable: true }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            Self::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            Self::MalformedInput(_) => codes::MALFORMED_INPUT,
            Self::RateFetchFailed { .. } => codes::RATE_FETCH_FAILED,
            Self::CrossCategoryUnit { .. } => codes::CROSS_CATEGORY_UNIT,
            Self::Arithmetic(_) => codes::ARITHMETIC,
        }
    }

    /// Whether retrying the same call later can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateFetchFailed { retryable: true, .. })
    }
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Engine continued with a degraded result
    Warning,
    /// The request failed
    Error,
}

/// Structured error for API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Whether the same call may succeed later
    pub retryable: bool,

    /// Severity level
    pub severity: Severity,
}

impl ErrorReport {
    /// Create a new report
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            retryable: false,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Builder: mark as retryable
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl From<&ConversionError> for ErrorReport {
    fn from(err: &ConversionError) -> Self {
        let report = Self::new(err.code(), err.to_string());
        match err {
            ConversionError::UnknownUnit { category, .. } => report
                .with_suggestion(format!("Use list_units(\"{}\") to see valid unit names", category)),
            ConversionError::UnknownCategory(_) => report
                .with_suggestion("Use list_categories() to see valid category ids"),
            ConversionError::MalformedInput(_) => report
                .with_suggestion("Enter digits with an optional leading '-' and exponent, e.g. -1.5e3"),
            ConversionError::RateFetchFailed { retryable, .. } => {
                let report = report
                    .with_severity(Severity::Warning)
                    .with_suggestion("Currency conversions use placeholder rates until a refresh succeeds");
                if *retryable { report.retryable() } else { report }
            }
            ConversionError::CrossCategoryUnit { found, .. } => report
                .with_suggestion(format!("Convert within {} instead", found)),
            ConversionError::Arithmetic(_) => report,
        }
    }
}

impl From<ConversionError> for ErrorReport {
    fn from(err: ConversionError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ConversionError::unknown_unit("Length", "Furlongs").code(), codes::UNKNOWN_UNIT);
        assert_eq!(ConversionError::MalformedInput("x".into()).code(), codes::MALFORMED_INPUT);
        assert_eq!(ConversionError::from(NumberError::DivisionByZero).code(), codes::ARITHMETIC);
    }

    #[test]
    fn test_retryable() {
        assert!(ConversionError::rate_fetch_failed("timeout").is_retryable());
        assert!(!ConversionError::UnknownCategory("Smell".into()).is_retryable());
    }

    #[test]
    fn test_report_from_rate_failure() {
        let report = ErrorReport::from(ConversionError::rate_fetch_failed("connection refused"));
        assert_eq!(report.code, codes::RATE_FETCH_FAILED);
        assert_eq!(report.severity, Severity::Warning);
        assert!(report.retryable);
        assert!(report.message.contains("connection refused"));
    }

    #[test]
    fn test_report_from_unknown_unit() {
        let report = ErrorReport::from(ConversionError::unknown_unit("Length", "NotAUnit"));
        assert_eq!(report.severity, Severity::Error);
        assert!(!report.retryable);
        assert!(report.suggestion.unwrap().contains("Length"));
    }

    #[test]
    fn test_report_serialization() {
        let report = ErrorReport::new(codes::UNKNOWN_CATEGORY, "unknown category 'Smell'");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "UNKNOWN_CATEGORY");
        assert_eq!(json["severity"], "error");
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn test_display() {
        let report = ErrorReport::new(codes::UNKNOWN_UNIT, "unknown unit 'x' in Length")
            .with_suggestion("check spelling");
        assert_eq!(report.to_string(), "[UNKNOWN_UNIT] unknown unit 'x' in Length (suggestion: check spelling)");
    }
}
