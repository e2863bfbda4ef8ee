//! Command-line interface for the fleetplan engine.
//!
//! The `plan` subcommand loads a JSON dataset, submits it to the planning
//! service, and follows the task's updates until it settles. Exit codes
//! distinguish success (0) from failure (1) and cancellation (3).
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use fleetplan_core::TaskStatus;

mod dataset;
mod error;
mod plan;

pub use error::CliError;
use plan::PlanArgs;

const ARG_PLAN_DATASET: &str = "dataset";
const ARG_PLAN_FLEET_SIZE: &str = "fleet-size";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_PLAN_DATASET: &str = "FLEETPLAN_CMDS_PLAN_DATASET";
const ENV_PLAN_FLEET_SIZE: &str = "FLEETPLAN_CMDS_PLAN_FLEET_SIZE";

/// Run the fleetplan CLI with the current process arguments and environment.
///
/// Returns the settled status of the planning task so the caller can choose
/// the process exit code.
pub fn run() -> Result<TaskStatus, CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args, cli.json),
    }
}

/// Map a settled task status onto the documented process exit code.
///
/// Success exits 0 and cancellation exits 3; everything else exits 1 so
/// scripts can tell "could not be done" from "was stopped".
#[must_use]
pub fn exit_code(status: TaskStatus) -> i32 {
    match status {
        TaskStatus::Succeeded => 0,
        TaskStatus::Cancelled => 3,
        TaskStatus::Pending | TaskStatus::Running | TaskStatus::Failed => 1,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fleetplan",
    about = "Capacitated fleet planning over depot and stop datasets",
    version
)]
struct Cli {
    /// Emit the terminal task result as JSON instead of text lines.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan vehicle routes for a fleet over a stop dataset.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
