//! Fleet requests and their feasibility rules.
//!
//! Validation is pure and runs before any allocation work starts, so
//! infeasible requests are rejected without touching the solver.

use std::collections::HashSet;

use thiserror::Error;

use crate::{Depot, Stop, StopId};

/// Capacity of one vehicle in the homogeneous fleet.
///
/// # Examples
/// ```
/// use fleetplan_core::VehicleSpec;
///
/// let vehicle = VehicleSpec::new(4);
/// assert_eq!(vehicle.capacity, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    /// Units of demand a single vehicle can carry.
    pub capacity: u32,
}

impl VehicleSpec {
    /// Construct a vehicle specification.
    pub fn new(capacity: u32) -> Self {
        Self { capacity }
    }
}

/// A complete allocation request: fleet size, depot, capacity, and stops.
///
/// The request is treated as an immutable snapshot once submitted; the
/// engine never mutates caller data.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::{Depot, FleetRequest, Stop, VehicleSpec};
///
/// let request = FleetRequest::new(
///     2,
///     Depot::new("Depot A", Coord { x: 0.0, y: 0.0 }),
///     VehicleSpec::new(4),
///     vec![Stop::new("Customer 1", Coord { x: 1.0, y: 1.0 })],
/// );
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetRequest {
    /// Number of vehicles available.
    pub fleet_size: u32,
    /// Depot every route starts from and returns to.
    pub depot: Depot,
    /// Per-vehicle capacity; the fleet is homogeneous.
    pub vehicle: VehicleSpec,
    /// Stops to be served, each by exactly one vehicle.
    pub stops: Vec<Stop>,
}

/// Errors surfaced by [`FleetRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The request offered no vehicles.
    #[error("fleet must contain at least one vehicle")]
    EmptyFleet,
    /// A zero-capacity vehicle can never serve a stop.
    #[error("vehicle capacity must be at least one unit")]
    ZeroCapacity,
    /// Stop identifiers must be unique within a request.
    #[error("duplicate stop identifier \"{0}\"")]
    DuplicateStopId(StopId),
    /// No assignment of stops to vehicles can satisfy the capacity bound.
    #[error("demand of {demand} unit(s) exceeds the available capacity of {capacity}")]
    InfeasibleDemand {
        /// Demand that cannot be met: a single stop's demand when that stop
        /// alone exceeds one vehicle, otherwise the total across all stops.
        demand: u64,
        /// Capacity measured against `demand`: one vehicle for an oversized
        /// stop, the whole fleet for the aggregate check.
        capacity: u64,
    },
}

impl FleetRequest {
    /// Construct a request; call [`FleetRequest::validate`] before solving.
    pub fn new(fleet_size: u32, depot: Depot, vehicle: VehicleSpec, stops: Vec<Stop>) -> Self {
        Self {
            fleet_size,
            depot,
            vehicle,
            stops,
        }
    }

    /// Total demand across all stops.
    pub fn total_demand(&self) -> u64 {
        self.stops.iter().map(|stop| u64::from(stop.demand)).sum()
    }

    /// Combined capacity of the whole fleet.
    pub fn fleet_capacity(&self) -> u64 {
        u64::from(self.fleet_size) * u64::from(self.vehicle.capacity)
    }

    /// Check the request against the feasibility invariants.
    ///
    /// Checks run in a fixed order: fleet size, vehicle capacity, identifier
    /// uniqueness, per-stop demand, total demand. The first violation is
    /// returned.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use fleetplan_core::{Depot, FleetRequest, Stop, ValidationError, VehicleSpec};
    ///
    /// let request = FleetRequest::new(
    ///     1,
    ///     Depot::new("Depot A", Coord { x: 0.0, y: 0.0 }),
    ///     VehicleSpec::new(1),
    ///     vec![
    ///         Stop::new("Customer 1", Coord { x: 1.0, y: 0.0 }),
    ///         Stop::new("Customer 2", Coord { x: 0.0, y: 1.0 }),
    ///     ],
    /// );
    /// assert_eq!(
    ///     request.validate(),
    ///     Err(ValidationError::InfeasibleDemand {
    ///         demand: 2,
    ///         capacity: 1,
    ///     }),
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fleet_size == 0 {
            return Err(ValidationError::EmptyFleet);
        }
        if self.vehicle.capacity == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        let mut seen = HashSet::with_capacity(self.stops.len());
        for stop in &self.stops {
            if !seen.insert(&stop.id) {
                return Err(ValidationError::DuplicateStopId(stop.id.clone()));
            }
        }
        for stop in &self.stops {
            if stop.demand > self.vehicle.capacity {
                return Err(ValidationError::InfeasibleDemand {
                    demand: u64::from(stop.demand),
                    capacity: u64::from(self.vehicle.capacity),
                });
            }
        }
        let total = self.total_demand();
        if total > self.fleet_capacity() {
            return Err(ValidationError::InfeasibleDemand {
                demand: total,
                capacity: self.fleet_capacity(),
            });
        }
        Ok(())
    }
}
