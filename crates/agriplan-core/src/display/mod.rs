//! Display wrapper types for formatting pipeline output.
//!
//! Domain types that have a single natural rendering (warnings, reports)
//! implement [`std::fmt::Display`] in [`models`]. Collections and views that
//! depend on context get a wrapper type here, so the same data can be shown
//! as a list inside a report or as a table on its own.
//!
//! All output is markdown; the CLI's terminal renderer styles it.
//!
//! ## Wrapper Types
//!
//! - [`Warnings`], [`Removals`], [`Issues`]: bullet lists with empty handling
//! - [`DecanTable`]: decan buckets as a markdown table
//! - [`OperationStatus`]: success confirmations
//!
//! ## Usage Examples
//!
//! ```rust
//! use agriplan_core::{
//!     convert::{ConversionWarning, WarningKind},
//!     display::Warnings,
//!     path::FieldPath,
//! };
//!
//! let warnings = vec![ConversionWarning::new(
//!     WarningKind::RangeClipped,
//!     FieldPath::root().key("lands").index(0).key("blockedRanges").index(1),
//!     "Range start 2025-02-20 is before the horizon start 2025-03-01",
//! )];
//!
//! let output = Warnings(&warnings).to_string();
//! assert!(output.contains("**RANGE_CLIPPED** `lands[0].blockedRanges[1]`"));
//! assert_eq!(Warnings(&[]).to_string(), "No warnings.\n");
//! ```

pub mod collections;
pub mod models;
pub mod scale;
pub mod status;

pub use collections::{Issues, Removals, Warnings};
pub use scale::DecanTable;
pub use status::OperationStatus;
