//! Range/index converter.
//!
//! Translates between the human-facing shapes used by forms (date ranges and
//! date lists) and the zero-based day-index sets sent to the optimizer.
//!
//! Only building a [`Horizon`](crate::horizon::Horizon) can fail hard. Every
//! operation here accumulates [`ConversionWarning`]s next to a best-effort
//! result so a partially invalid plan still renders.
//!
//! - [`ranges`]: range expansion and run-length collapse
//! - [`dates`]: explicit date lists
//! - [`plan`]: whole-plan translation between the form and submission shapes

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;

pub mod dates;
pub mod plan;
pub mod ranges;

pub use dates::{convert_dates_to_indices, DateConversion};
pub use plan::{form_to_submission, submission_to_form, ConversionOptions, Translated};
pub use ranges::{collapse_indices_to_ranges, expand_ranges_to_indices, Expansion};

/// Category of a recoverable conversion problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    /// A date string could not be parsed
    InvalidDate,
    /// A range or date was clamped to the horizon
    RangeClipped,
    /// A range resolved to `end < start`
    RangeEmpty,
    /// A constraint lost all of its inputs
    ValidationError,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::InvalidDate => "INVALID_DATE",
            WarningKind::RangeClipped => "RANGE_CLIPPED",
            WarningKind::RangeEmpty => "RANGE_EMPTY",
            WarningKind::ValidationError => "VALIDATION_ERROR",
        }
    }
}

/// User-facing feedback produced while converting; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub path: FieldPath,
    pub message: String,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
        }
    }
}
