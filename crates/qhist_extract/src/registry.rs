//! Era registry
//!
//! Gantree: L2_Extract → EraRegistry
//!
//! Static grouping of processor snapshots into hardware generations.

use qhist_calibration::snapshot_key;
use qhist_core::{Era, HistError, HistResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ordered set of eras
/// Gantree: EraRegistry // 세대 레지스트리
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EraRegistry {
    eras: Vec<Era>,
}

impl EraRegistry {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a validated registry
    pub fn new(eras: Vec<Era>) -> HistResult<Self> {
        let registry = Self { eras };
        registry.validate()?;
        Ok(registry)
    }

    /// The four IBM processor generations
    /// Gantree: ibm_fleet() -> Self // 기본 레지스트리
    pub fn ibm_fleet() -> Self {
        Self {
            eras: vec![
                Era::new("Falcon", "2020/21", ["Hanoi", "Cairo", "Kolkata"]),
                Era::new("Eagle R1", "2022", ["Washington"]),
                Era::new(
                    "Eagle R3",
                    "2023",
                    ["Sherbrooke", "Brisbane", "Kyoto", "Osaka"],
                ),
                Era::new("Heron", "2024", ["Torino", "Fez", "Marrakesh"]),
            ],
        }
    }

    /// Parse a JSON array of eras
    pub fn from_json(json: &str) -> HistResult<Self> {
        let eras: Vec<Era> =
            serde_json::from_str(json).map_err(|e| HistError::RegistryError(e.to_string()))?;
        Self::new(eras)
    }

    /// Load a JSON registry file
    pub fn from_file(path: impl AsRef<Path>) -> HistResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| HistError::RegistryError(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check labels are unique and non-empty, every era lists at least one
    /// snapshot, and no snapshot belongs to two eras. Snapshot names are
    /// compared by their file key, so `Kyoto` and `KYOTO` collide.
    pub fn validate(&self) -> HistResult<()> {
        if self.eras.is_empty() {
            return Err(HistError::RegistryError("registry has no eras".into()));
        }

        let mut labels = HashSet::new();
        let mut snapshots = HashSet::new();

        for era in &self.eras {
            if era.label.trim().is_empty() {
                return Err(HistError::RegistryError("era with empty label".into()));
            }
            if !labels.insert(era.label.as_str()) {
                return Err(HistError::RegistryError(format!(
                    "duplicate era label '{}'",
                    era.label
                )));
            }
            if era.is_empty() {
                return Err(HistError::RegistryError(format!(
                    "era '{}' lists no snapshots",
                    era.label
                )));
            }
            for name in &era.snapshot_names {
                if name.trim().is_empty() {
                    return Err(HistError::RegistryError(format!(
                        "era '{}' has an empty snapshot name",
                        era.label
                    )));
                }
                if !snapshots.insert(snapshot_key(name)) {
                    return Err(HistError::RegistryError(format!(
                        "snapshot '{}' appears in more than one era",
                        name
                    )));
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Eras in order
    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    /// Number of eras
    pub fn len(&self) -> usize {
        self.eras.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }

    /// Era by label
    pub fn era(&self, label: &str) -> Option<&Era> {
        self.eras.iter().find(|e| e.label == label)
    }

    /// Era owning a snapshot
    pub fn era_of(&self, snapshot: &str) -> Option<&Era> {
        self.eras.iter().find(|e| e.contains(snapshot))
    }

    /// Total number of snapshots
    pub fn snapshot_count(&self) -> usize {
        self.eras.iter().map(Era::len).sum()
    }

    /// `(era, snapshot)` pairs in visiting order
    pub fn snapshots(&self) -> impl Iterator<Item = (&Era, &str)> {
        self.eras
            .iter()
            .flat_map(|era| era.snapshot_names.iter().map(move |s| (era, s.as_str())))
    }
}

impl Default for EraRegistry {
    fn default() -> Self {
        Self::ibm_fleet()
    }
}

// ============================================================================
// Tests
// ============================================================================
