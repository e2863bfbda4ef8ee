//! Vehicle routes and their rendered labels.
//!
//! Routes reference stops by identifier; the depot anchors both ends of the
//! rendered form but never appears in the stop sequence itself.

use crate::{Depot, StopId};

/// The visit order for one vehicle.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::{Depot, VehicleRoute};
///
/// let depot = Depot::new("Depot A", Coord { x: 0.0, y: 0.0 });
/// let route = VehicleRoute::new(1, vec!["Customer 5".into(), "Customer 12".into()]);
///
/// assert_eq!(
///     route.label(&depot),
///     "Depot A -> Customer 5 -> Customer 12 -> Depot A",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRoute {
    /// One-based vehicle index the route belongs to.
    pub vehicle: u32,
    /// Stops in visit order, excluding the depot.
    pub stops: Vec<StopId>,
}

impl VehicleRoute {
    /// Construct a route for the given vehicle index.
    pub fn new(vehicle: u32, stops: Vec<StopId>) -> Self {
        Self { vehicle, stops }
    }

    /// Construct the route of a vehicle that stays at the depot.
    ///
    /// # Examples
    /// ```
    /// use fleetplan_core::VehicleRoute;
    ///
    /// assert!(VehicleRoute::idle(3).is_idle());
    /// ```
    pub fn idle(vehicle: u32) -> Self {
        Self::new(vehicle, Vec::new())
    }

    /// Whether the vehicle serves no stops.
    pub fn is_idle(&self) -> bool {
        self.stops.is_empty()
    }

    /// Render the route as a depot-anchored label.
    ///
    /// Idle vehicles render as a bare depot-to-depot hop, keeping result
    /// lists positional (entry `i` always belongs to vehicle `i + 1`).
    pub fn label(&self, depot: &Depot) -> String {
        let mut label = depot.label.clone();
        for stop in &self.stops {
            label.push_str(" -> ");
            label.push_str(stop.as_str());
        }
        label.push_str(" -> ");
        label.push_str(&depot.label);
        label
    }
}
