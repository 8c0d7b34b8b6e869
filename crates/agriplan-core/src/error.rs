//! Error types for the planning core.
//!
//! Only hard failures live here. Per-item problems (an unparsable date in a
//! list, an empty range, a dangling reference) are reported through
//! [`ConversionWarning`](crate::convert::ConversionWarning),
//! [`Removal`](crate::sanitize::Removal) and
//! [`ValidationIssue`](crate::validate::ValidationIssue) lists instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationIssue;

/// Comprehensive error type for all planning-core operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A calendar date string could not be parsed or names a non-existent day
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
    /// Horizon end precedes its start
    #[error("Horizon end {end} is before start {start}")]
    InvertedHorizon { start: String, end: String },
    /// Day arithmetic left the supported calendar range
    #[error("Date {date} shifted by {offset} days is out of the supported range")]
    DateOutOfRange { date: String, offset: i64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The plan failed schema validation
    #[error("Plan failed validation with {} issue(s)", issues.len())]
    Validation { issues: Vec<ValidationIssue> },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for creating date parsing errors.
pub struct InvalidDateBuilder {
    input: String,
}

impl InvalidDateBuilder {
    /// Create a new invalid date error builder for the offending input.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidDate {
            input: self.input,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for date parsing errors.
    pub fn invalid_date(input: impl Into<String>) -> InvalidDateBuilder {
        InvalidDateBuilder::new(input)
    }

    /// Returns the validation issues carried by this error, if any.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            PlanError::Validation { issues } => issues,
            _ => &[],
        }
    }
}

/// Result type alias for planning-core operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = PlanError::invalid_input("horizon.start").with_reason("missing");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'horizon.start': missing"
        );
    }

    #[test]
    fn test_invalid_date_builder() {
        let err = PlanError::invalid_date("2024-02-30").with_reason("no such day");
        match err {
            PlanError::InvalidDate { input, reason } => {
                assert_eq!(input, "2024-02-30");
                assert_eq!(reason, "no such day");
            }
            _ => panic!("Expected InvalidDate error"),
        }
    }

    #[test]
    fn test_issues_empty_for_other_variants() {
        let err = PlanError::InvertedHorizon {
            start: "2024-03-10".to_string(),
            end: "2024-03-01".to_string(),
        };
        assert!(err.issues().is_empty());
        assert!(err.to_string().contains("before start"));
    }
}
