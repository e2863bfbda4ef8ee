//! Behaviour-driven step definitions for the plan command scenarios.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::helpers::{DatasetDir, suburban_dataset_json};
use super::*;
use crate::plan::{PlanArgs, run_plan_with};

/// World state for plan command BDD scenarios.
#[derive(Debug)]
struct PlanWorld {
    data: DatasetDir,
    dataset: RefCell<Option<Utf8PathBuf>>,
    fleet_size: RefCell<u32>,
    stdout: RefCell<Vec<u8>>,
    outcome: RefCell<Option<Result<TaskStatus, CliError>>>,
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld {
        data: DatasetDir::new(),
        dataset: RefCell::new(None),
        fleet_size: RefCell::new(2),
        stdout: RefCell::new(Vec::new()),
        outcome: RefCell::new(None),
    }
}

#[given("a dataset of four suburban stops")]
fn given_suburban_dataset(world: &PlanWorld) {
    let path = world.data.write("deliveries.json", suburban_dataset_json());
    world.dataset.replace(Some(path));
}

#[given("the dataset path does not exist")]
fn given_missing_dataset(world: &PlanWorld) {
    let path = world.data.missing("absent.json");
    world.dataset.replace(Some(path));
}

#[given("a dataset whose demand exceeds the fleet")]
fn given_oversubscribed_dataset(world: &PlanWorld) {
    let path = world.data.write("deliveries.json", suburban_dataset_json());
    world.dataset.replace(Some(path));
    world.fleet_size.replace(1);
}

#[when("the plan command runs")]
fn when_plan_runs(world: &PlanWorld) {
    let args = PlanArgs {
        dataset: world.dataset.borrow().clone(),
        fleet_size: Some(*world.fleet_size.borrow()),
        timeout_secs: None,
    };
    let mut stdout = world.stdout.borrow_mut();
    let outcome = run_plan_with(args, false, &mut *stdout);
    world.outcome.replace(Some(outcome));
}

#[then("every vehicle's route is printed")]
fn then_routes_printed(world: &PlanWorld) {
    let outcome = world.outcome.borrow();
    match outcome.as_ref().expect("plan should have run") {
        Ok(status) => assert_eq!(*status, TaskStatus::Succeeded),
        Err(error) => panic!("plan should succeed, found {error}"),
    }
    let stdout = world.stdout.borrow();
    let rendered = String::from_utf8(stdout.clone()).expect("utf-8 output");
    assert!(rendered.contains("Vehicle 1: Depot A -> Customer 1 -> Customer 2 -> Depot A"));
    assert!(rendered.contains("Vehicle 2: Depot A -> Customer 3 -> Customer 4 -> Depot A"));
}

#[then("the command reports the missing dataset")]
fn then_missing_dataset_reported(world: &PlanWorld) {
    let outcome = world.outcome.borrow();
    match outcome.as_ref().expect("plan should have run") {
        Err(CliError::MissingSourceFile { field, .. }) => assert_eq!(*field, ARG_PLAN_DATASET),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the command reports the rejection")]
fn then_rejection_reported(world: &PlanWorld) {
    let outcome = world.outcome.borrow();
    match outcome.as_ref().expect("plan should have run") {
        Err(CliError::Submit { source }) => {
            let message = source.to_string();
            assert!(message.contains("exceeds the available capacity"));
        }
        other => panic!("expected Submit, found {other:?}"),
    }
}

#[scenario(path = "tests/features/plan.feature", index = 0)]
fn suburban_plan(world: PlanWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/plan.feature", index = 1)]
fn missing_dataset(world: PlanWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/plan.feature", index = 2)]
fn oversubscribed_dataset(world: PlanWorld) {
    let _ = world;
}
