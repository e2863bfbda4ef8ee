//! Shared builders for exercising the fleet model in tests.
//!
//! Available to downstream crates through the `test-support` feature;
//! production builds never carry them.

use geo::Coord;

use crate::{Depot, FleetRequest, Stop, VehicleSpec};

/// Build a stop with unit demand at the given coordinates.
#[must_use]
pub fn stop(id: &str, x: f64, y: f64) -> Stop {
    Stop::new(id, Coord { x, y })
}

/// Build a stop with an explicit demand.
#[must_use]
pub fn stop_with_demand(id: &str, x: f64, y: f64, demand: u32) -> Stop {
    Stop::with_demand(id, Coord { x, y }, demand)
}

/// Build the depot shared across the test suites.
#[must_use]
pub fn depot() -> Depot {
    Depot::new("Depot A", Coord { x: 0.0, y: 0.0 })
}

/// Build a request around [`depot`] with a homogeneous vehicle capacity.
#[must_use]
pub fn request(fleet_size: u32, capacity: u32, stops: Vec<Stop>) -> FleetRequest {
    FleetRequest::new(fleet_size, depot(), VehicleSpec::new(capacity), stops)
}
