//! Unit tests covering dataset parsing and request construction.

use rstest::rstest;

use super::helpers::{DatasetDir, suburban_dataset_json};
use super::*;
use crate::dataset::{DatasetSpec, load_dataset};

#[rstest]
fn dataset_builds_a_feasible_request() {
    let spec: DatasetSpec =
        serde_json::from_str(suburban_dataset_json()).expect("dataset should parse");

    let request = spec.into_request(2);
    assert_eq!(request.fleet_size, 2);
    assert_eq!(request.vehicle.capacity, 2);
    assert_eq!(request.depot.label, "Depot A");
    assert_eq!(request.stops.len(), 4);
    request.validate().expect("dataset should be feasible");
}

#[rstest]
fn missing_demand_defaults_to_one_unit() {
    let spec: DatasetSpec = serde_json::from_str(
        r#"{
            "depot": { "label": "Depot A", "x": 0.0, "y": 0.0 },
            "capacity": 4,
            "stops": [
                { "id": "Customer 1", "x": 1.0, "y": 2.0 },
                { "id": "Customer 2", "x": 2.0, "y": 1.0, "demand": 3 }
            ]
        }"#,
    )
    .expect("dataset should parse");

    let demands: Vec<u32> = spec.stops.iter().map(|stop| stop.demand).collect();
    assert_eq!(demands, vec![1, 3]);
}

#[rstest]
fn load_reports_unreadable_files() {
    let data = DatasetDir::new();

    let err = load_dataset(&data.missing("absent.json")).expect_err("file is absent");
    match err {
        CliError::OpenDataset { path, .. } => assert_eq!(path, data.missing("absent.json")),
        other => panic!("expected OpenDataset, found {other:?}"),
    }
}

#[rstest]
fn load_reports_invalid_json() {
    let data = DatasetDir::new();
    let path = data.write("broken.json", "not a dataset");

    let err = load_dataset(&path).expect_err("payload is not JSON");
    match err {
        CliError::ParseDataset { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseDataset, found {other:?}"),
    }
}
