//! Collection wrapper types for displaying pipeline feedback.
//!
//! Each wrapper borrows a slice and formats one bullet per entry, or a short
//! sentence when the slice is empty.

use std::fmt;

use crate::{convert::ConversionWarning, sanitize::Removal, validate::ValidationIssue};

/// Conversion warnings as a markdown list.
pub struct Warnings<'a>(pub &'a [ConversionWarning]);

impl fmt::Display for Warnings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No warnings.");
        }
        for warning in self.0 {
            writeln!(f, "- {warning}")?;
        }
        Ok(())
    }
}

/// Sanitizer removals as a markdown list.
pub struct Removals<'a>(pub &'a [Removal]);

impl fmt::Display for Removals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Nothing was removed.");
        }
        for removal in self.0 {
            writeln!(f, "- {removal}")?;
        }
        Ok(())
    }
}

/// Validation issues as a markdown list, path first.
pub struct Issues<'a>(pub &'a [ValidationIssue]);

impl fmt::Display for Issues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No issues found.");
        }
        for issue in self.0 {
            writeln!(f, "- `{}`: {}", issue.path, issue.message)?;
        }
        Ok(())
    }
}
