//! Focused unit tests covering argument parsing, configuration conversion,
//! and exit code mapping.

use std::time::Duration;

use camino::Utf8Path;
use clap::Parser;
use rstest::rstest;

use super::helpers::{DatasetDir, suburban_dataset_json};
use super::*;
use crate::plan::{PlanArgs, PlanConfig};

#[rstest]
fn parses_minimum_arguments() {
    let cli = Cli::try_parse_from(["fleetplan", "plan", "deliveries.json", "--fleet-size", "3"])
        .expect("arguments should parse");
    assert!(!cli.json);
    let Command::Plan(args) = cli.command;
    assert_eq!(args.dataset.as_deref(), Some(Utf8Path::new("deliveries.json")));
    assert_eq!(args.fleet_size, Some(3));
    assert_eq!(args.timeout_secs, None);
}

#[rstest]
fn parses_overrides() {
    let cli = Cli::try_parse_from([
        "fleetplan",
        "plan",
        "deliveries.json",
        "--fleet-size",
        "3",
        "--timeout-secs",
        "30",
        "--json",
    ])
    .expect("arguments should parse");
    assert!(cli.json);
    let Command::Plan(args) = cli.command;
    assert_eq!(args.timeout_secs, Some(30));
}

#[rstest]
fn rejects_a_missing_subcommand() {
    let outcome = Cli::try_parse_from(["fleetplan"]);
    assert!(outcome.is_err(), "parser should require a subcommand");
}

#[rstest]
fn converting_plan_without_dataset_errors() {
    let args = PlanArgs {
        fleet_size: Some(2),
        ..PlanArgs::default()
    };

    let err = PlanConfig::try_from(args).expect_err("missing dataset should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_DATASET);
            assert_eq!(env, ENV_PLAN_DATASET);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_plan_without_fleet_size_errors() {
    let args = PlanArgs {
        dataset: Some("deliveries.json".into()),
        ..PlanArgs::default()
    };

    let err = PlanConfig::try_from(args).expect_err("missing fleet size should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_FLEET_SIZE);
            assert_eq!(env, ENV_PLAN_FLEET_SIZE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_maps_the_timeout() {
    let args = PlanArgs {
        dataset: Some("deliveries.json".into()),
        fleet_size: Some(4),
        timeout_secs: Some(30),
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.dataset, Utf8Path::new("deliveries.json"));
    assert_eq!(config.fleet_size, 4);
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));
}

#[rstest]
fn validate_sources_accepts_an_existing_dataset() {
    let data = DatasetDir::new();
    let path = data.write("deliveries.json", suburban_dataset_json());

    let config = PlanConfig {
        dataset: path,
        fleet_size: 2,
        timeout: None,
    };
    config.validate_sources().expect("dataset exists");
}

#[rstest]
fn validate_sources_reports_a_missing_dataset() {
    let data = DatasetDir::new();

    let config = PlanConfig {
        dataset: data.missing("absent.json"),
        fleet_size: 2,
        timeout: None,
    };
    let err = config.validate_sources().expect_err("dataset is absent");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_PLAN_DATASET),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
#[case(TaskStatus::Succeeded, 0)]
#[case(TaskStatus::Failed, 1)]
#[case(TaskStatus::Cancelled, 3)]
#[case(TaskStatus::Pending, 1)]
#[case(TaskStatus::Running, 1)]
fn exit_codes_distinguish_settlement(#[case] status: TaskStatus, #[case] code: i32) {
    assert_eq!(exit_code(status), code);
}
