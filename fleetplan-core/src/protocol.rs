//! Messages exchanged between a caller and the task service.
//!
//! Three message kinds travel over one logical channel per task: the goal
//! echo on acceptance, feedback after each routed vehicle, and exactly one
//! terminal result. The types are plain data so any transport can carry
//! them; with the `serde` feature enabled they serialize as a tagged union.

use crate::TaskStatus;

/// The caller's goal: how many vehicles to plan for.
///
/// The stop/depot/capacity dataset travels out of band and joins the goal in
/// a [`FleetRequest`](crate::FleetRequest) before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetGoal {
    /// Number of vehicles requested.
    pub fleet_size: u32,
}

/// Progress emitted after each vehicle's route is finalised.
///
/// Consumers may observe only a subset of feedback messages, but the
/// fractions they do observe never decrease.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feedback {
    /// Fraction of vehicles processed so far, in `[0.0, 1.0]`.
    pub completion_percentage: f32,
}

/// Terminal outcome of a task.
///
/// On success `vehicle_routes` holds exactly one rendered route per vehicle
/// in vehicle-index order; idle vehicles appear as a depot-to-depot hop so
/// the list stays positional. Failed and cancelled tasks deliver no routes.
///
/// # Examples
/// ```
/// use fleetplan_core::{TaskResult, TaskStatus};
///
/// let result = TaskResult::succeeded(vec![
///     "Depot A -> Customer 5 -> Customer 12 -> Depot A".to_owned(),
/// ]);
/// assert_eq!(result.status, TaskStatus::Succeeded);
/// assert!(result.error.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskResult {
    /// Terminal status: `Succeeded`, `Failed`, or `Cancelled`.
    pub status: TaskStatus,
    /// One rendered route per vehicle, in vehicle-index order.
    pub vehicle_routes: Vec<String>,
    /// Description of the failure; `None` unless `Failed`.
    pub error: Option<String>,
}

impl TaskResult {
    /// Successful result carrying one rendered route per vehicle.
    pub fn succeeded(vehicle_routes: Vec<String>) -> Self {
        Self {
            status: TaskStatus::Succeeded,
            vehicle_routes,
            error: None,
        }
    }

    /// Failed result carrying a description of the error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Failed,
            vehicle_routes: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Cancelled result; cancellation is caller-initiated, not a failure.
    pub fn cancelled() -> Self {
        Self {
            status: TaskStatus::Cancelled,
            vehicle_routes: Vec::new(),
            error: None,
        }
    }
}

/// One message on a task's logical channel.
///
/// Transports and consumers match exhaustively; adding a kind is a breaking
/// change by design.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TaskMessage {
    /// Echo of the accepted goal; first message on the channel.
    Goal(FleetGoal),
    /// Latest progress fraction.
    Feedback(Feedback),
    /// Terminal result; final message on the channel.
    Result(TaskResult),
}

impl TaskMessage {
    /// Whether this is the terminal [`TaskResult`] message.
    pub fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}
