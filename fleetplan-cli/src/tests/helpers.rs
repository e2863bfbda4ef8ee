//! Test helpers for composing plan CLI datasets.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write dataset file");
}

/// Four suburban stops with unit demands around a central depot; two
/// vehicles of capacity two serve one side each.
pub(super) fn suburban_dataset_json() -> &'static str {
    r#"{
        "depot": { "label": "Depot A", "x": 0.0, "y": 0.0 },
        "capacity": 2,
        "stops": [
            { "id": "Customer 1", "x": 3.0, "y": 4.0 },
            { "id": "Customer 2", "x": 4.0, "y": 3.0 },
            { "id": "Customer 3", "x": -3.0, "y": 4.0 },
            { "id": "Customer 4", "x": -4.0, "y": 3.0 }
        ]
    }"#
}

/// Demands of 3, 2, 3 against two vehicles of capacity 4: feasible in
/// aggregate, but the greedy sweep strands the last stop.
pub(super) fn greedy_exhaustion_dataset_json() -> &'static str {
    r#"{
        "depot": { "label": "Depot A", "x": 0.0, "y": 0.0 },
        "capacity": 4,
        "stops": [
            { "id": "Customer 1", "x": 1.0, "y": 0.1, "demand": 3 },
            { "id": "Customer 2", "x": 1.0, "y": 0.2, "demand": 2 },
            { "id": "Customer 3", "x": 1.0, "y": 0.3, "demand": 3 }
        ]
    }"#
}

/// Temporary directory holding dataset files for one test.
#[derive(Debug)]
pub(super) struct DatasetDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DatasetDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        write_utf8(&path, contents.as_bytes());
        path
    }

    pub(super) fn missing(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}
