//! Planning service: bounded admission, per-task channels, retention.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use fleetplan_core::{
    Allocator, FleetGoal, FleetRequest, RouteBuilder, TaskId, TaskMessage, ValidationError,
};
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{Semaphore, watch};

use crate::coordinator::{StepOutcome, TaskCoordinator};

/// Default number of concurrently running tasks.
const DEFAULT_MAX_ACTIVE: usize = 4;

/// Default retention for settled tasks awaiting collection.
const DEFAULT_RETENTION_SECS: u64 = 300;

/// Tuning knobs for [`FleetService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound on concurrently running tasks; submissions beyond it are
    /// turned away with [`SubmitError::Busy`].
    pub max_active: usize,
    /// How long settled tasks stay queryable before
    /// [`FleetService::evict_settled`] may drop them.
    pub retention: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_active: DEFAULT_MAX_ACTIVE,
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
        }
    }
}

impl ServiceConfig {
    /// Set the bound on concurrently running tasks.
    #[must_use]
    pub fn with_max_active(mut self, max_active: usize) -> Self {
        self.max_active = max_active;
        self
    }

    /// Set the retention window for settled tasks.
    #[must_use]
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }
}

/// Error type for [`FleetService`] construction failures.
#[derive(Debug, Error)]
#[error("failed to build the task runtime: {source}")]
pub struct ServiceBuildError {
    source: std::io::Error,
}

/// Reasons a submission was refused at the door.
///
/// Everything past admission surfaces through the task's terminal
/// [`TaskResult`](fleetplan_core::TaskResult) instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The request failed validation; nothing was admitted.
    #[error("invalid fleet request: {0}")]
    Invalid(#[from] ValidationError),
    /// Every task slot is in use; resubmit after a task settles.
    #[error("service is saturated ({active} of {limit} task slots in use)")]
    Busy {
        /// Tasks currently planning.
        active: usize,
        /// The configured [`ServiceConfig::max_active`] bound.
        limit: usize,
    },
}

/// Caller's view of one admitted task.
///
/// The handle is cheap to clone and does not keep the task alive; dropping
/// every handle leaves the task running and its entry queryable by id.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    updates: watch::Receiver<TaskMessage>,
    cancel: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Identifier assigned at admission.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// A fresh receiver over the task's message channel.
    ///
    /// The channel keeps only the latest message: a slow reader skips
    /// straight to the newest feedback rather than draining a backlog, and
    /// the terminal result stays readable indefinitely.
    pub fn messages(&self) -> watch::Receiver<TaskMessage> {
        self.updates.clone()
    }

    /// The most recent message on the channel.
    pub fn latest(&self) -> TaskMessage {
        self.updates.borrow().clone()
    }

    /// Request cancellation.
    ///
    /// The flag is honoured at the next vehicle boundary; the task settles
    /// as `Cancelled` with no routes. Requesting cancellation repeatedly or
    /// after settlement has no further effect.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

struct TaskEntry {
    updates: watch::Receiver<TaskMessage>,
    cancel: Arc<AtomicBool>,
    settled_at: Option<Instant>,
}

struct Registry {
    tasks: Mutex<HashMap<TaskId, TaskEntry>>,
    slots: Arc<Semaphore>,
    next_id: AtomicU64,
}

/// Admits fleet requests and plans them on a private worker pool.
///
/// Each admitted task runs a [`TaskCoordinator`] on the blocking pool of a
/// runtime the service owns, so callers may submit from any context,
/// including inside another Tokio runtime. Progress and the terminal result
/// travel over a per-task `watch` channel whose first value echoes the
/// accepted goal.
///
/// # Shutdown
///
/// Dropping the service drops its runtime, which waits for in-flight tasks
/// to settle. Like any owned runtime it must be dropped from synchronous
/// code, never inside an async context. Cancel live tasks first to shorten
/// the wait.
pub struct FleetService<A, R> {
    allocator: A,
    router: R,
    config: ServiceConfig,
    registry: Arc<Registry>,
    runtime: Runtime,
}

impl<A: fmt::Debug, R: fmt::Debug> fmt::Debug for FleetService<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetService")
            .field("allocator", &self.allocator)
            .field("router", &self.router)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl<A, R> FleetService<A, R>
where
    A: Allocator + Clone + 'static,
    R: RouteBuilder + Clone + 'static,
{
    /// Create a service with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker runtime fails to build.
    pub fn new(allocator: A, router: R) -> Result<Self, ServiceBuildError> {
        Self::with_config(allocator, router, ServiceConfig::default())
    }

    /// Create a service with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker runtime fails to build.
    pub fn with_config(
        allocator: A,
        router: R,
        config: ServiceConfig,
    ) -> Result<Self, ServiceBuildError> {
        let runtime = Builder::new_current_thread()
            .build()
            .map_err(|source| ServiceBuildError { source })?;
        let registry = Arc::new(Registry {
            tasks: Mutex::new(HashMap::new()),
            slots: Arc::new(Semaphore::new(config.max_active)),
            next_id: AtomicU64::new(1),
        });
        Ok(Self {
            allocator,
            router,
            config,
            registry,
            runtime,
        })
    }

    /// Admit a request and start planning it.
    ///
    /// Validation happens synchronously, before a task slot is taken; a
    /// rejected request consumes nothing. Admission is bounded by
    /// [`ServiceConfig::max_active`] with no queue behind it, so a saturated
    /// service answers [`SubmitError::Busy`] immediately rather than letting
    /// submissions pile up.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Invalid`] when validation rejects the request,
    /// [`SubmitError::Busy`] when every task slot is in use.
    pub fn submit(&self, request: FleetRequest) -> Result<TaskHandle, SubmitError> {
        request.validate()?;
        let Ok(permit) = Arc::clone(&self.registry.slots).try_acquire_owned() else {
            return Err(SubmitError::Busy {
                active: self.active(),
                limit: self.config.max_active,
            });
        };

        let id = TaskId::new(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        let goal = FleetGoal {
            fleet_size: request.fleet_size,
        };
        let (sender, updates) = watch::channel(TaskMessage::Goal(goal));
        let cancel = Arc::new(AtomicBool::new(false));
        {
            let mut tasks = self
                .registry
                .tasks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            tasks.insert(
                id,
                TaskEntry {
                    updates: updates.clone(),
                    cancel: Arc::clone(&cancel),
                    settled_at: None,
                },
            );
        }

        let mut task = TaskCoordinator::new(self.allocator.clone(), self.router.clone(), request);
        let registry = Arc::clone(&self.registry);
        let flag = Arc::clone(&cancel);
        self.runtime.spawn_blocking(move || {
            let _slot = permit;
            drive(&mut task, &flag, &sender);
            let mut tasks = registry
                .tasks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = tasks.get_mut(&id) {
                entry.settled_at = Some(Instant::now());
            }
        });
        log::debug!("{id} admitted with fleet size {}", goal.fleet_size);
        Ok(TaskHandle {
            id,
            updates,
            cancel,
        })
    }

    /// Request cancellation of a live task.
    ///
    /// Acknowledged synchronously: `true` means the task was live and will
    /// settle as `Cancelled` at the next vehicle boundary. Settled and
    /// unknown tasks answer `false`; neither is an error.
    pub fn cancel(&self, id: TaskId) -> bool {
        let tasks = self
            .registry
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = tasks.get(&id) else {
            return false;
        };
        if entry.updates.borrow().is_result() {
            return false;
        }
        entry.cancel.store(true, Ordering::Relaxed);
        log::debug!("{id} cancel requested");
        true
    }

    /// A fresh receiver for a task's message channel.
    ///
    /// Lets a reconnecting caller pick up from the latest message. `None`
    /// when the id is unknown or already evicted.
    pub fn subscribe(&self, id: TaskId) -> Option<watch::Receiver<TaskMessage>> {
        let tasks = self
            .registry
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.get(&id).map(|entry| entry.updates.clone())
    }

    /// Snapshot of a task's most recent message.
    pub fn latest(&self, id: TaskId) -> Option<TaskMessage> {
        let tasks = self
            .registry
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.get(&id).map(|entry| entry.updates.borrow().clone())
    }

    /// Drop a settled task after its result has been collected.
    ///
    /// Answers `true` when the entry existed, had settled, and was removed.
    /// A task that is still live is left untouched.
    pub fn acknowledge(&self, id: TaskId) -> bool {
        let mut tasks = self
            .registry
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let settled = tasks
            .get(&id)
            .is_some_and(|entry| entry.updates.borrow().is_result());
        if settled {
            tasks.remove(&id);
            log::debug!("{id} acknowledged and dropped");
        }
        settled
    }

    /// Drop settled tasks older than the retention window.
    ///
    /// Returns the number of entries evicted. Live tasks are never touched;
    /// callers decide when to sweep, the service keeps no timer of its own.
    pub fn evict_settled(&self) -> usize {
        let now = Instant::now();
        let retention = self.config.retention;
        let mut tasks = self
            .registry
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = tasks.len();
        tasks.retain(|_, entry| {
            entry
                .settled_at
                .is_none_or(|at| now.duration_since(at) < retention)
        });
        let evicted = before - tasks.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} settled task(s)");
        }
        evicted
    }

    /// Number of tasks currently planning.
    pub fn active(&self) -> usize {
        self.config
            .max_active
            .saturating_sub(self.registry.slots.available_permits())
    }

    /// The configuration the service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Run one coordinator to settlement, publishing progress as it goes.
fn drive<A: Allocator, R: RouteBuilder>(
    task: &mut TaskCoordinator<A, R>,
    cancel: &AtomicBool,
    updates: &watch::Sender<TaskMessage>,
) {
    // A start failure settles the task as Failed; the loop publishes it.
    let _ = task.start();
    loop {
        if cancel.load(Ordering::Relaxed) {
            task.cancel();
        }
        match task.step() {
            StepOutcome::NotStarted => return,
            StepOutcome::Progress(feedback) => {
                updates.send_replace(TaskMessage::Feedback(feedback));
            }
            StepOutcome::Settled(result) => {
                updates.send_replace(TaskMessage::Result(result));
                return;
            }
        }
    }
}
