use clap::{Parser, Subcommand};

use crate::cli::{CheckArgs, ExpandArgs, HorizonArgs, SubmitArgs};

/// Command-line shell for the agriplan planning core
///
/// Converts farm plans between their calendar form and the day-indexed
/// payload an optimizer consumes, checks them for dangling references and
/// schema problems, and prints the third-of-month (decan) chart scale of a
/// horizon.
#[derive(Parser)]
#[command(version, about, name = "agriplan")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the agriplan CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline on a plan file and print the report
    #[command(alias = "c")]
    Check(CheckArgs),
    /// Print the submission payload of a plan file
    #[command(alias = "s")]
    Submit(SubmitArgs),
    /// Print the decan buckets of a horizon
    #[command(alias = "d")]
    Decans(HorizonArgs),
    /// Expand date ranges into day indices
    #[command(alias = "e")]
    Expand(ExpandArgs),
    /// Print the JSON schema of the submission payload
    Schema,
}
