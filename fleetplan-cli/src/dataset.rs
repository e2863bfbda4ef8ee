//! Dataset loading for the plan command.
//!
//! Datasets are JSON documents naming the depot, the per-vehicle capacity,
//! and the stops to serve. Fleet size stays a command-line concern so the
//! same dataset can be planned with different fleets.

use std::fs::File;
use std::io::BufReader;

use camino::Utf8Path;
use fleetplan_core::{Depot, FleetRequest, Stop, VehicleSpec};
use geo::Coord;
use serde::Deserialize;

use crate::CliError;

/// Deserialised planning dataset.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DatasetSpec {
    pub(crate) depot: DepotSpec,
    pub(crate) capacity: u32,
    pub(crate) stops: Vec<StopSpec>,
}

/// Depot specification from JSON.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DepotSpec {
    pub(crate) label: String,
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl DepotSpec {
    fn into_depot(self) -> Depot {
        let DepotSpec { label, x, y } = self;
        Depot::new(label, Coord { x, y })
    }
}

/// Stop specification from JSON; demand defaults to one unit.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StopSpec {
    pub(crate) id: String,
    pub(crate) x: f64,
    pub(crate) y: f64,
    #[serde(default = "default_demand")]
    pub(crate) demand: u32,
}

fn default_demand() -> u32 {
    1
}

impl StopSpec {
    fn into_stop(self) -> Stop {
        let StopSpec { id, x, y, demand } = self;
        Stop::with_demand(id, Coord { x, y }, demand)
    }
}

impl DatasetSpec {
    /// Build the domain request for the given fleet size.
    pub(crate) fn into_request(self, fleet_size: u32) -> FleetRequest {
        let depot = self.depot.into_depot();
        let stops = self.stops.into_iter().map(StopSpec::into_stop).collect();
        FleetRequest::new(fleet_size, depot, VehicleSpec::new(self.capacity), stops)
    }
}

/// Load a JSON-encoded [`DatasetSpec`] from disk.
pub(crate) fn load_dataset(path: &Utf8Path) -> Result<DatasetSpec, CliError> {
    let file = File::open(path).map_err(|source| CliError::OpenDataset {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseDataset {
        path: path.to_path_buf(),
        source,
    })
}
