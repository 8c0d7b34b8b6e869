//! Command handlers and clap argument wrappers.
//!
//! Argument structs carry clap attributes only and convert into the core
//! parameter types, which do the actual input validation:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use agriplan_core::{
    convert::{collapse_indices_to_ranges, expand_ranges_to_indices},
    display::{DecanTable, Issues, OperationStatus, Removals, Warnings},
    models::{AreaUnit, FormPlan, OptimizationPlan},
    params::{ExpandRanges, HorizonParams, PlannerOptions},
    DecanScale, PlanError, Planner,
};
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use log::debug;

use crate::renderer::TerminalRenderer;

/// Area units accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AreaUnitArg {
    /// Square metres
    M2,
    /// Ares
    A,
    /// Hectares
    Ha,
}

impl From<AreaUnitArg> for AreaUnit {
    fn from(val: AreaUnitArg) -> Self {
        match val {
            AreaUnitArg::M2 => AreaUnit::SquareMeter,
            AreaUnitArg::A => AreaUnit::Are,
            AreaUnitArg::Ha => AreaUnit::Hectare,
        }
    }
}

/// Planner configuration shared by `check` and `submit`
#[derive(Args)]
pub struct PlannerArgs {
    #[arg(
        long,
        requires = "end",
        help = "Override the plan's horizon start (YYYY-MM-DD)"
    )]
    pub start: Option<String>,
    #[arg(
        long,
        requires = "start",
        help = "Override the plan's horizon end (YYYY-MM-DD)"
    )]
    pub end: Option<String>,
    #[arg(long, value_enum, help = "Express every area in this unit")]
    pub area_unit: Option<AreaUnitArg>,
    #[arg(
        long,
        help = "Reject constraints whose ranges all fall outside the horizon"
    )]
    pub strict: bool,
}

impl From<PlannerArgs> for PlannerOptions {
    fn from(val: PlannerArgs) -> Self {
        PlannerOptions {
            horizon_start: val.start,
            horizon_end: val.end,
            area_unit: val.area_unit.map(Into::into),
            strict_constraints: val.strict,
        }
    }
}

/// Check a plan file
///
/// Converts the plan, removes entries with dangling references, validates
/// the result and prints a report. Exits with an error when validation
/// issues remain.
#[derive(Args)]
pub struct CheckArgs {
    #[arg(help = "Path to the plan JSON file")]
    pub plan: PathBuf,
    #[command(flatten)]
    pub planner: PlannerArgs,
}

/// Print the submission payload of a plan file
#[derive(Args)]
pub struct SubmitArgs {
    #[arg(help = "Path to the plan JSON file")]
    pub plan: PathBuf,
    #[arg(short, long, help = "Write the payload to this file instead of stdout")]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub planner: PlannerArgs,
}

/// A horizon given by its first and last day
#[derive(Args)]
pub struct HorizonArgs {
    #[arg(long, help = "First day of the horizon (YYYY-MM-DD)")]
    pub start: String,
    #[arg(long, help = "Last day of the horizon, inclusive (YYYY-MM-DD)")]
    pub end: String,
}

impl From<HorizonArgs> for HorizonParams {
    fn from(val: HorizonArgs) -> Self {
        HorizonParams {
            start: val.start,
            end: val.end,
        }
    }
}

/// Expand date ranges into day indices
///
/// Ranges are written `START..END`; leave a side empty for an open end that
/// follows the horizon, or give a single date for one day.
#[derive(Args)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub horizon: HorizonArgs,
    #[arg(required = true, help = "Date ranges as START..END")]
    pub ranges: Vec<String>,
}

impl From<ExpandArgs> for ExpandRanges {
    fn from(val: ExpandArgs) -> Self {
        ExpandRanges {
            horizon: val.horizon.into(),
            ranges: val.ranges,
        }
    }
}

/// Handles CLI commands and renders their output
pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    fn load(path: &Path, args: PlannerArgs) -> Result<(Planner, FormPlan)> {
        let options: PlannerOptions = args.into();
        let planner = options
            .validate()?
            .build()
            .context("Failed to configure planner")?;
        let plan = FormPlan::load(path)
            .with_context(|| format!("Failed to load plan from {}", path.display()))?;
        debug!("Loaded plan from {}", path.display());
        Ok((planner, plan))
    }

    pub fn check(&self, args: CheckArgs) -> Result<()> {
        let (planner, plan) = Self::load(&args.plan, args.planner)?;
        let report = planner.check(&plan);
        self.renderer.render(&report.to_string())?;

        if !report.is_valid() {
            bail!("Plan has {} validation issue(s)", report.issues.len());
        }
        Ok(())
    }

    pub fn submit(&self, args: SubmitArgs) -> Result<()> {
        let (planner, plan) = Self::load(&args.plan, args.planner)?;

        let submission = match planner.prepare_submission(&plan) {
            Ok(submission) => submission,
            Err(PlanError::Validation { issues }) => {
                self.renderer.render(&Issues(&issues).to_string())?;
                bail!("Plan has {} validation issue(s)", issues.len());
            }
            Err(e) => return Err(e.into()),
        };

        let payload = submission
            .plan
            .to_json_pretty()
            .context("Failed to serialize submission")?;

        match args.output {
            Some(path) => {
                fs::write(&path, format!("{payload}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let status =
                    OperationStatus::success(format!("Wrote submission to {}", path.display()));
                self.renderer.render(&format!("{status}\n{submission}"))?;
            }
            None => {
                // stdout carries only the payload
                if !submission.warnings.is_empty() {
                    eprint!("{}", Warnings(&submission.warnings));
                }
                if !submission.removals.is_empty() {
                    eprint!("{}", Removals(&submission.removals));
                }
                println!("{payload}");
            }
        }
        Ok(())
    }

    pub fn decans(&self, args: HorizonArgs) -> Result<()> {
        let horizon = HorizonParams::from(args).validate()?;
        let scale = DecanScale::new(&horizon)?;

        let mut out = format!("# Decans: {horizon}\n\n");
        out.push_str(&DecanTable(&scale).to_string());
        self.renderer.render(&out)
    }

    pub fn expand(&self, args: ExpandArgs) -> Result<()> {
        let (horizon, ranges) = ExpandRanges::from(args).validate()?;
        let expansion = expand_ranges_to_indices(&ranges, &horizon);
        let merged = collapse_indices_to_ranges(&expansion.indices, horizon.start_date())?;

        let indices = expansion
            .indices
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let merged = merged
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!("# Expansion: {horizon}\n\n");
        out.push_str(&format!("- Days: {}\n", expansion.indices.len()));
        out.push_str(&format!("- Indices: {indices}\n"));
        out.push_str(&format!("- Ranges: {merged}\n"));
        if !expansion.warnings.is_empty() {
            out.push_str("\n## Warnings\n\n");
            out.push_str(&Warnings(&expansion.warnings).to_string());
        }
        self.renderer.render(&out)
    }

    pub fn schema(&self) -> Result<()> {
        let schema = schemars::schema_for!(OptimizationPlan);
        let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
        println!("{json}");
        Ok(())
    }
}
