//! Facade crate for the fleetplan routing engine.
//!
//! This crate re-exports the core domain types and exposes the sweep solver
//! and the task service behind feature flags.

#![forbid(unsafe_code)]

pub use fleetplan_core::{
    AllocationError, Allocator, Cluster, Depot, Feedback, FleetGoal, FleetRequest, RouteBuilder,
    Stop, StopId, TaskId, TaskMessage, TaskResult, TaskStatus, ValidationError, VehicleRoute,
    VehicleSpec,
};

#[cfg(feature = "solver-sweep")]
pub use fleetplan_solver_sweep::{NearestNeighbourRouter, SweepAllocator};

#[cfg(feature = "service")]
pub use fleetplan_service::{
    FleetService, ServiceBuildError, ServiceConfig, StepOutcome, SubmitError, TaskCoordinator,
    TaskHandle,
};
