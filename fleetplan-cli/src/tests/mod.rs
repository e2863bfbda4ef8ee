//! Shared test harness modules for the fleetplan CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod dataset_unit;
mod helpers;
mod plan_steps;
mod unit;
