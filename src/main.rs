mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::cache::MarksTable;
use crate::input::{InputError, load_input, load_params};
use crate::model::errors::RankError;
use crate::model::hierarchy::Semester;
use crate::model::profile::RankingProfile;
use crate::model::ranks::RankEstimate;
use crate::model::rounding::RoundingPolicy;
use crate::pipeline::stage3_classify::build_semester;
use crate::pipeline::stage4_rollup::{estimate_scope, estimate_units};
use crate::pipeline::stage5_report::{ReportInput, write_reports};
use crate::report::format_estimate;

#[derive(Debug, Parser)]
#[command(name = "kira-classrank", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the class rank from a portal export.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Portal export (.json or .json.gz).
    #[arg(long)]
    input: PathBuf,
    /// Output directory for summary.json, report.txt and assessments.tsv.
    #[arg(long)]
    out: PathBuf,
    /// Rounding applied to the tie-averaged rank.
    #[arg(long, value_enum)]
    rounding: Option<RoundingPolicy>,
    /// Restrict the headline estimate to one curricular unit id.
    #[arg(long)]
    unit: Option<String>,
    /// JSON params file; explicit flags win over its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Rank(#[from] RankError),
    #[error("failed to write reports: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

fn main() {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    logging::init_logging(args.verbose);

    if let Err(err) = run(&args) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    let profile = resolve_profile(args)?;
    tracing::info!(
        rounding = profile.rounding.name(),
        scope = %profile.scope_label(),
        "ranking profile"
    );

    let mut doc = load_input(&args.input)?;
    let marks = MarksTable::from_records(std::mem::take(&mut doc.marks));
    let semester = build_semester(&doc, &marks, profile.rounding)?;

    let estimate = estimate_for_profile(&semester, &profile)?;
    let units = estimate_units(&semester);

    let input = ReportInput {
        semester: &semester,
        estimate: &estimate,
        units: &units,
        rounding: profile.rounding,
        input_path: args.input.display().to_string(),
        scope: profile.scope_label(),
        tool_name: "kira-classrank".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out)?;

    println!("Estimated class rank: {}", format_estimate(&estimate));
    Ok(())
}

fn resolve_profile(args: &RunArgs) -> Result<RankingProfile, InputError> {
    let mut profile = RankingProfile::default_v1();
    if let Some(path) = &args.config {
        profile.apply(load_params(path)?);
    }
    if let Some(rounding) = args.rounding {
        profile.rounding = rounding;
    }
    if let Some(unit) = &args.unit {
        profile.unit = Some(unit.clone());
    }
    Ok(profile)
}

fn estimate_for_profile(
    semester: &Semester,
    profile: &RankingProfile,
) -> Result<RankEstimate, RunError> {
    match &profile.unit {
        Some(id) => {
            let unit = semester
                .units
                .iter()
                .find(|u| &u.id == id)
                .ok_or_else(|| RunError::UnknownUnit(id.clone()))?;
            Ok(estimate_scope(unit)?)
        }
        None => Ok(estimate_scope(semester)?),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
