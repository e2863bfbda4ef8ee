//! Core domain types for the fleetplan engine.
//!
//! The model captures a single-depot fleet request (stops with demands, a
//! homogeneous vehicle capacity), the validation rules that keep downstream
//! components honest, the allocator and route-builder seams, and the
//! transport-independent protocol vocabulary used by the task service.

#![forbid(unsafe_code)]

mod cluster;
mod depot;
mod protocol;
mod request;
mod route;
mod solver;
mod stop;
mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cluster::Cluster;
pub use depot::Depot;
pub use protocol::{Feedback, FleetGoal, TaskMessage, TaskResult};
pub use request::{FleetRequest, ValidationError, VehicleSpec};
pub use route::VehicleRoute;
pub use solver::{AllocationError, Allocator, RouteBuilder};
pub use stop::{Stop, StopId};
pub use task::{TaskId, TaskStatus};
