use std::fmt;

/// Identifier assigned to an accepted task.
///
/// # Examples
/// ```
/// use fleetplan_core::TaskId;
///
/// assert_eq!(TaskId::new(7).to_string(), "task-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TaskId(u64);

impl TaskId {
    /// Wrap a raw identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric identifier.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Lifecycle of a submitted task.
///
/// ```text
/// Pending -> Running -> Succeeded | Failed | Cancelled
/// ```
///
/// Terminal states are never left; a failed task is not retried, and a
/// cancelled task is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskStatus {
    /// Accepted but not yet started.
    Pending,
    /// Vehicles are being routed.
    Running,
    /// Every vehicle routed; the result carries the routes.
    Succeeded,
    /// The task stopped on an error; the result carries the description.
    Failed,
    /// The caller stopped the task before completion.
    Cancelled,
}

impl TaskStatus {
    /// Whether the status is one of the three terminal states.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_core::TaskStatus;
    ///
    /// assert!(TaskStatus::Succeeded.is_terminal());
    /// assert!(!TaskStatus::Running.is_terminal());
    /// ```
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}
