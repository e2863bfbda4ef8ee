//! Task coordination and dispatch for the fleetplan engine.
//!
//! This crate turns the synchronous solver seams into a long-lived planning
//! service. [`TaskCoordinator`] is the per-task state machine: it walks a
//! request through `Pending`, `Running`, and one of the terminal states,
//! finalising one vehicle per step so progress can be reported between
//! vehicles. [`FleetService`] wraps coordinators in an asynchronous shell:
//! bounded admission, per-task message channels with latest-value semantics,
//! cooperative cancellation, and retention of settled results until callers
//! collect them.
//!
//! The service owns a private Tokio runtime and runs each coordinator on its
//! blocking pool, so callers may drive the message stream from any runtime
//! or from plain synchronous code.

#![forbid(unsafe_code)]

mod coordinator;
mod service;

pub use coordinator::{StepOutcome, TaskCoordinator};
pub use service::{FleetService, ServiceBuildError, ServiceConfig, SubmitError, TaskHandle};
