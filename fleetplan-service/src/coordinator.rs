//! Per-task state machine driving one request from submission to settlement.

use fleetplan_core::{
    Allocator, Cluster, Feedback, FleetRequest, RouteBuilder, TaskResult, TaskStatus,
    ValidationError, VehicleRoute,
};

/// Outcome of a single [`TaskCoordinator::step`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// [`TaskCoordinator::start`] has not been called; nothing was processed.
    NotStarted,
    /// One vehicle was finalised; the task may now have succeeded.
    Progress(Feedback),
    /// The task is terminal; its result snapshot is attached.
    Settled(TaskResult),
}

/// Walks one fleet request through `Pending → Running → terminal`.
///
/// The coordinator owns its allocator and router, so concurrent tasks share
/// no mutable state and a failure in one never disturbs another. Clusters
/// are computed lazily on the first step and cached; each subsequent step
/// finalises exactly one vehicle in increasing index order, which keeps the
/// reported completion fraction strictly tied to vehicles rather than stops.
///
/// Cancellation is cooperative: [`TaskCoordinator::cancel`] flips the task
/// to `Cancelled` between vehicles and discards any partially built routes,
/// so a cancelled task never leaks an incomplete plan.
///
/// # Examples
/// ```
/// use fleetplan_core::{Depot, FleetRequest, Stop, TaskStatus, VehicleSpec};
/// use fleetplan_service::{StepOutcome, TaskCoordinator};
/// use fleetplan_solver_sweep::{NearestNeighbourRouter, SweepAllocator};
/// use geo::Coord;
///
/// let request = FleetRequest::new(
///     2,
///     Depot::new("Depot A", Coord { x: 0.0, y: 0.0 }),
///     VehicleSpec::new(4),
///     vec![
///         Stop::new("Customer 1", Coord { x: 3.0, y: 4.0 }),
///         Stop::new("Customer 2", Coord { x: -4.0, y: 3.0 }),
///     ],
/// );
/// let mut task = TaskCoordinator::new(SweepAllocator, NearestNeighbourRouter, request);
/// task.start()?;
/// while matches!(task.step(), StepOutcome::Progress(_)) {}
/// assert_eq!(task.status(), TaskStatus::Succeeded);
/// # Ok::<(), fleetplan_core::ValidationError>(())
/// ```
#[derive(Debug)]
pub struct TaskCoordinator<A, R> {
    allocator: A,
    router: R,
    request: FleetRequest,
    status: TaskStatus,
    clusters: Option<Vec<Cluster>>,
    routes: Vec<VehicleRoute>,
    processed: u32,
    error: Option<String>,
}

impl<A: Allocator, R: RouteBuilder> TaskCoordinator<A, R> {
    /// Create a coordinator in the `Pending` state.
    pub fn new(allocator: A, router: R, request: FleetRequest) -> Self {
        Self {
            allocator,
            router,
            request,
            status: TaskStatus::Pending,
            clusters: None,
            routes: Vec::new(),
            processed: 0,
            error: None,
        }
    }

    /// Validate the request and enter `Running`.
    ///
    /// A validation failure settles the task as `Failed` before any vehicle
    /// is processed and hands the error back to the caller. Calling `start`
    /// on a task that already left `Pending` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] that rejected the request.
    pub fn start(&mut self) -> Result<(), ValidationError> {
        if self.status != TaskStatus::Pending {
            return Ok(());
        }
        match self.request.validate() {
            Ok(()) => {
                log::debug!(
                    "task accepted: {} stop(s) across {} vehicle(s)",
                    self.request.stops.len(),
                    self.request.fleet_size,
                );
                self.status = TaskStatus::Running;
                Ok(())
            }
            Err(error) => {
                log::debug!("task rejected: {error}");
                self.error = Some(error.to_string());
                self.status = TaskStatus::Failed;
                Err(error)
            }
        }
    }

    /// Finalise the next vehicle's route.
    ///
    /// The first step allocates clusters for the whole request; an
    /// allocation failure settles the task as `Failed` with no routes.
    /// Otherwise vehicle *i* takes cluster *i − 1* when one exists and an
    /// explicit idle route when the fleet outnumbers the clusters. After the
    /// final vehicle the status is `Succeeded` and the returned feedback
    /// reads exactly 1.0.
    pub fn step(&mut self) -> StepOutcome {
        if self.status == TaskStatus::Pending {
            return StepOutcome::NotStarted;
        }
        if let Some(result) = self.result() {
            return StepOutcome::Settled(result);
        }
        if self.clusters.is_none() {
            match self.allocator.allocate(&self.request) {
                Ok(clusters) => self.clusters = Some(clusters),
                Err(error) => {
                    log::debug!("task failed during allocation: {error}");
                    self.routes.clear();
                    self.error = Some(error.to_string());
                    self.status = TaskStatus::Failed;
                    return StepOutcome::Settled(TaskResult::failed(error.to_string()));
                }
            }
        }
        let vehicle = self.processed + 1;
        let route = match self
            .clusters
            .as_ref()
            .and_then(|clusters| clusters.get(self.processed as usize))
        {
            Some(cluster) => VehicleRoute::new(
                vehicle,
                self.router.build_route(&self.request.depot, cluster),
            ),
            None => VehicleRoute::idle(vehicle),
        };
        self.routes.push(route);
        self.processed += 1;
        if self.processed >= self.request.fleet_size {
            log::debug!("task succeeded with {} route(s)", self.routes.len());
            self.status = TaskStatus::Succeeded;
        }
        StepOutcome::Progress(Feedback {
            completion_percentage: self.completion(),
        })
    }

    /// Cancel the task between vehicles.
    ///
    /// Partially built routes are discarded so the eventual result carries
    /// none. Cancelling a task that already settled leaves its state
    /// untouched; repeated cancels are no-ops.
    pub fn cancel(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        log::debug!(
            "task cancelled after {} of {} vehicle(s)",
            self.processed,
            self.request.fleet_size,
        );
        self.routes.clear();
        self.clusters = None;
        self.status = TaskStatus::Cancelled;
    }

    /// Terminal result snapshot, or `None` while the task is live.
    ///
    /// The snapshot owns its data; callers never receive a handle into the
    /// coordinator's mutable state.
    pub fn result(&self) -> Option<TaskResult> {
        match self.status {
            TaskStatus::Succeeded => Some(TaskResult::succeeded(
                self.routes
                    .iter()
                    .map(|route| route.label(&self.request.depot))
                    .collect(),
            )),
            TaskStatus::Failed => {
                Some(TaskResult::failed(self.error.clone().unwrap_or_default()))
            }
            TaskStatus::Cancelled => Some(TaskResult::cancelled()),
            TaskStatus::Pending | TaskStatus::Running => None,
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Fraction of vehicles finalised so far, in `[0.0, 1.0]`.
    pub fn completion(&self) -> f32 {
        if self.request.fleet_size == 0 {
            return 0.0;
        }
        self.processed as f32 / self.request.fleet_size as f32
    }

    /// Routes finalised so far, in vehicle order.
    pub fn routes(&self) -> &[VehicleRoute] {
        &self.routes
    }

    /// The request this task is planning.
    pub fn request(&self) -> &FleetRequest {
        &self.request
    }
}
