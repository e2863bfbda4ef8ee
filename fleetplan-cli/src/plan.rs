//! Plan command implementation for the fleetplan CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fleetplan_core::{TaskMessage, TaskResult, TaskStatus};
use fleetplan_service::{FleetService, TaskHandle};
use fleetplan_solver_sweep::{NearestNeighbourRouter, SweepAllocator};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tokio::runtime::Builder;

use crate::dataset::load_dataset;
use crate::{
    ARG_PLAN_DATASET, ARG_PLAN_FLEET_SIZE, ARG_PLAN_TIMEOUT_SECS, CliError, ENV_PLAN_DATASET,
    ENV_PLAN_FLEET_SIZE,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan routes for a fleet over a JSON dataset describing the \
                 depot, the vehicle capacity, and the stops to serve. The \
                 planning task runs on the background service; progress is \
                 reported as each vehicle's route is finalised.",
    about = "Plan vehicle routes for a fleet over a stop dataset"
)]
#[ortho_config(prefix = "FLEETPLAN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON dataset (depot, capacity, stops).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Number of vehicles available for the plan.
    #[arg(long = ARG_PLAN_FLEET_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) fleet_size: Option<u32>,
    /// Cancel the task if it has not settled after this many seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON dataset file.
    pub(crate) dataset: Utf8PathBuf,
    /// Number of vehicles the plan may use.
    pub(crate) fleet_size: u32,
    /// Caller deadline; the task is cancelled once it elapses.
    pub(crate) timeout: Option<Duration>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.dataset, ARG_PLAN_DATASET)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        if path.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_DATASET,
            env: ENV_PLAN_DATASET,
        })?;
        let fleet_size = args.fleet_size.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_FLEET_SIZE,
            env: ENV_PLAN_FLEET_SIZE,
        })?;
        Ok(Self {
            dataset,
            fleet_size,
            timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }
}

pub(super) fn run_plan(args: PlanArgs, json: bool) -> Result<TaskStatus, CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, json, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    json: bool,
    writer: &mut dyn Write,
) -> Result<TaskStatus, CliError> {
    let config = resolve_plan_config(args)?;
    let dataset = load_dataset(&config.dataset)?;
    let request = dataset.into_request(config.fleet_size);
    let service = FleetService::new(SweepAllocator, NearestNeighbourRouter)?;
    let handle = service
        .submit(request)
        .map_err(|source| CliError::Submit { source })?;
    // Progress lines are suppressed in JSON mode so stdout stays parseable.
    let mut sink = std::io::sink();
    let progress: &mut dyn Write = if json { &mut sink } else { &mut *writer };
    let result = follow_task(&service, &handle, config.timeout, progress)?;
    render_result(writer, &result, json)?;
    Ok(result.status)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Follow a task's update channel until it settles.
///
/// The service runs the task on its own runtime; this local runtime only
/// drives the receiving side, together with the interrupt and deadline
/// futures that issue a cancel.
fn follow_task(
    service: &FleetService<SweepAllocator, NearestNeighbourRouter>,
    handle: &TaskHandle,
    timeout: Option<Duration>,
    writer: &mut dyn Write,
) -> Result<TaskResult, CliError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| CliError::BuildFollower { source })?;
    runtime.block_on(async {
        let mut updates = handle.messages();
        let deadline = tokio::time::sleep(timeout.unwrap_or_default());
        tokio::pin!(deadline);
        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);
        let mut cancelled = false;
        loop {
            let message = updates.borrow_and_update().clone();
            match message {
                TaskMessage::Goal(goal) => {
                    writeln!(
                        writer,
                        "{} accepted with a fleet of {} vehicle(s)",
                        handle.id(),
                        goal.fleet_size
                    )
                    .map_err(CliError::WriteOutput)?;
                }
                TaskMessage::Feedback(feedback) => {
                    writeln!(
                        writer,
                        "completion {:.1}%",
                        feedback.completion_percentage * 100.0
                    )
                    .map_err(CliError::WriteOutput)?;
                }
                TaskMessage::Result(result) => return Ok(result),
            }
            // Wait for the next update; a deadline or interrupt issues a
            // cancel but keeps following until the result lands.
            loop {
                tokio::select! {
                    outcome = updates.changed() => {
                        if outcome.is_err() {
                            return Err(CliError::UpdatesClosed);
                        }
                        break;
                    }
                    () = &mut deadline, if timeout.is_some() && !cancelled => {
                        cancelled = true;
                        service.cancel(handle.id());
                    }
                    _ = &mut interrupt, if !cancelled => {
                        cancelled = true;
                        service.cancel(handle.id());
                    }
                }
            }
        }
    })
}

fn render_result(writer: &mut dyn Write, result: &TaskResult, json: bool) -> Result<(), CliError> {
    if json {
        let payload = serde_json::to_string_pretty(result).map_err(CliError::SerialiseResult)?;
        writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteOutput)?;
        writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
        return Ok(());
    }
    match result.status {
        TaskStatus::Succeeded => {
            for (index, route) in result.vehicle_routes.iter().enumerate() {
                writeln!(writer, "Vehicle {}: {route}", index + 1).map_err(CliError::WriteOutput)?;
            }
        }
        TaskStatus::Failed => {
            let reason = result.error.as_deref().unwrap_or("no error recorded");
            writeln!(writer, "planning failed: {reason}").map_err(CliError::WriteOutput)?;
        }
        TaskStatus::Cancelled => {
            writeln!(writer, "planning cancelled before completion")
                .map_err(CliError::WriteOutput)?;
        }
        // Published results only ever carry a terminal status.
        TaskStatus::Pending | TaskStatus::Running => {}
    }
    Ok(())
}
