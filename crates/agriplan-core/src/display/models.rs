//! Display implementations for domain types.
//!
//! Kept apart from the type definitions so that the converter, sanitizer and
//! planner stay free of presentation code. Everything renders as markdown.

use std::fmt;

use super::collections::{Issues, Removals, Warnings};
use crate::{
    convert::{ConversionWarning, WarningKind},
    horizon::Horizon,
    models::OptimizationPlan,
    planner::{PlanReport, Submission},
};

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**{}** `{}`: {}", self.kind, self.path, self.message)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 〜 {} ({} days)",
            self.start_date(),
            self.end_date(),
            self.total_days()
        )
    }
}

/// Entity counts of a plan, one metadata line.
fn fmt_counts(plan: &OptimizationPlan, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "- Days: {}", plan.horizon.num_days)?;
    writeln!(
        f,
        "- Crops: {}, Lands: {}, Workers: {}, Resources: {}, Events: {}",
        plan.crops.len(),
        plan.lands.len(),
        plan.workers.len(),
        plan.resources.len(),
        plan.events.len()
    )
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plan check")?;
        writeln!(f)?;
        fmt_counts(&self.plan, f)?;
        if self.is_valid() {
            writeln!(f, "- Status: ✓ ready to submit")?;
        } else {
            writeln!(f, "- Status: ✗ {} issue(s)", self.issues.len())?;
            writeln!(f, "\n## Issues")?;
            writeln!(f)?;
            write!(f, "{}", Issues(&self.issues))?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "\n## Warnings")?;
            writeln!(f)?;
            write!(f, "{}", Warnings(&self.warnings))?;
        }
        if !self.removals.is_empty() {
            writeln!(f, "\n## Removed")?;
            writeln!(f)?;
            write!(f, "{}", Removals(&self.removals))?;
        }
        Ok(())
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Submission ready")?;
        writeln!(f)?;
        fmt_counts(&self.plan, f)?;
        if !self.warnings.is_empty() {
            writeln!(f, "\n## Warnings")?;
            writeln!(f)?;
            write!(f, "{}", Warnings(&self.warnings))?;
        }
        if !self.removals.is_empty() {
            writeln!(f, "\n## Removed")?;
            writeln!(f)?;
            write!(f, "{}", Removals(&self.removals))?;
        }
        Ok(())
    }
}
