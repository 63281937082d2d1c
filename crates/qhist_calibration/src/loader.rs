//! Snapshot loaders
//!
//! Gantree: L1_Calibration → SnapshotLoader
//!
//! The loader is the only seam into calibration data. [`PropsDirLoader`]
//! reads Qiskit properties documents from disk; [`InMemoryLoader`] serves
//! prebuilt snapshots.

use crate::properties::BackendProperties;
use crate::snapshot::CalibrationSnapshot;
use qhist_core::{HistError, HistResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Source of calibration snapshots
/// Gantree: SnapshotLoader // trait
pub trait SnapshotLoader {
    /// Load the snapshot with the given identifier.
    ///
    /// Fails with [`HistError::SnapshotUnavailable`] if the identifier is
    /// unknown and [`HistError::InvalidSnapshot`] if its data is unusable.
    fn load(&self, name: &str) -> HistResult<CalibrationSnapshot>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// File key for a snapshot name: lowercased, spaces and dashes become `_`,
/// so `"Eagle Test"` and `"eagle-test"` both map to `"eagle_test"`
pub fn snapshot_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

// ============================================================================
// PropsDirLoader
// ============================================================================

/// Loads `props_<key>.json` documents from a directory
/// Gantree: PropsDirLoader // 디렉터리 로더
#[derive(Debug, Clone)]
pub struct PropsDirLoader {
    root: PathBuf,
}

impl PropsDirLoader {
    /// Create loader rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths tried for a snapshot, in order: flat layout, then the Qiskit
    /// fake-provider layout `<key>/props_<key>.json`.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let key = snapshot_key(name);
        let file = format!("props_{key}.json");
        vec![self.root.join(&file), self.root.join(&key).join(&file)]
    }
}

impl SnapshotLoader for PropsDirLoader {
    fn load(&self, name: &str) -> HistResult<CalibrationSnapshot> {
        for path in self.candidates(name) {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Err(HistError::invalid_snapshot(
                        name,
                        format!("{}: {e}", path.display()),
                    ))
                }
                Err(e) => {
                    return Err(HistError::unavailable(
                        name,
                        format!("{}: {e}", path.display()),
                    ))
                }
            };

            log::debug!("{name}: reading {}", path.display());
            let doc = BackendProperties::from_json(&text).map_err(|e| {
                HistError::invalid_snapshot(name, format!("{}: {e}", path.display()))
            })?;

            if doc.num_qubits() == 0 {
                return Err(HistError::invalid_snapshot(
                    name,
                    format!("{}: no qubit properties", path.display()),
                ));
            }

            return Ok(CalibrationSnapshot::from_properties(name, &doc));
        }

        Err(HistError::unavailable(
            name,
            format!(
                "no props_{}.json under {}",
                snapshot_key(name),
                self.root.display()
            ),
        ))
    }

    fn describe(&self) -> String {
        format!("properties directory {}", self.root.display())
    }
}

// ============================================================================
// InMemoryLoader
// ============================================================================

/// Serves snapshots held in memory
/// Gantree: InMemoryLoader // 메모리 로더
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    snapshots: HashMap<String, CalibrationSnapshot>,
}

impl InMemoryLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snapshot under its own name
    pub fn insert(&mut self, snapshot: CalibrationSnapshot) {
        self.snapshots.insert(snapshot_key(&snapshot.name), snapshot);
    }

    /// Builder: register a snapshot
    pub fn with_snapshot(mut self, snapshot: CalibrationSnapshot) -> Self {
        self.insert(snapshot);
        self
    }

    /// Number of registered snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if no snapshot is registered
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotLoader for InMemoryLoader {
    fn load(&self, name: &str) -> HistResult<CalibrationSnapshot> {
        self.snapshots
            .get(&snapshot_key(name))
            .cloned()
            .ok_or_else(|| HistError::unavailable(name, "not registered"))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} snapshots)", self.snapshots.len())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROPS: &str = r#"{
        "backend_name": "fake_hanoi",
        "last_update_date": "2023-01-12T00:00:00+00:00",
        "qubits": [
            [{"name": "T1", "unit": "us", "value": 150.0},
             {"name": "T2", "unit": "us", "value": 90.0},
             {"name": "readout_error", "unit": "", "value": 0.012}],
            [{"name": "T1", "unit": "us", "value": 110.0}]
        ],
        "gates": []
    }"#;

    #[test]
    fn test_snapshot_key() {
        assert_eq!(snapshot_key("Sherbrooke"), "sherbrooke");
        assert_eq!(snapshot_key(" Eagle Test "), "eagle_test");
        assert_eq!(snapshot_key("Eagle-Test"), "eagle_test");
    }

    #[test]
    fn test_flat_layout() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("props_hanoi.json"), PROPS).unwrap();

        let loader = PropsDirLoader::new(dir.path());
        let snap = loader.load("Hanoi").unwrap();

        assert_eq!(snap.name, "Hanoi");
        assert_eq!(snap.num_qubits(), 2);
        assert_eq!(snap.last_update.as_deref(), Some("2023-01-12T00:00:00+00:00"));
    }

    #[test]
    fn test_fake_provider_layout() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("hanoi");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("props_hanoi.json"), PROPS).unwrap();

        let snap = PropsDirLoader::new(dir.path()).load("Hanoi").unwrap();
        assert_eq!(snap.num_qubits(), 2);
    }

    #[test]
    fn test_missing_snapshot_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = PropsDirLoader::new(dir.path()).load("Kyoto").unwrap_err();
        assert!(matches!(err, HistError::SnapshotUnavailable { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_malformed_snapshot_is_invalid() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("props_osaka.json"), "{ not json").unwrap();

        let err = PropsDirLoader::new(dir.path()).load("Osaka").unwrap_err();
        assert!(matches!(err, HistError::InvalidSnapshot { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_non_utf8_document_is_invalid() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("props_kyoto.json"), [0xff, 0xfe, b'{', 0x80]).unwrap();

        let err = PropsDirLoader::new(dir.path()).load("Kyoto").unwrap_err();
        assert!(matches!(err, HistError::InvalidSnapshot { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_empty_document_is_invalid() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("props_fez.json"), r#"{"qubits": []}"#).unwrap();

        let err = PropsDirLoader::new(dir.path()).load("Fez").unwrap_err();
        assert!(matches!(err, HistError::InvalidSnapshot { .. }));
    }

    #[test]
    fn test_in_memory_loader() {
        let loader = InMemoryLoader::new()
            .with_snapshot(CalibrationSnapshot::uniform("Ourense", 5, 100.0, 70.0, 0.02));

        assert_eq!(loader.len(), 1);
        assert_eq!(loader.load("Ourense").unwrap().num_qubits(), 5);
        assert!(loader.load("Vigo").unwrap_err().is_recoverable());
    }
}
