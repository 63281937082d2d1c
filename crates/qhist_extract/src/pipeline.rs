//! Extraction pipeline
//!
//! Gantree: L3_Integration → Pipeline
//!
//! Registry → loader → extractor → writer, run to completion on one thread.
//! Recoverable snapshot failures are logged and skipped; write failures
//! abort the run.

use crate::config::ExtractConfig;
use crate::csv_writer::CsvWriter;
use crate::extractor::RowExtractor;
use crate::registry::EraRegistry;
use qhist_calibration::{PropsDirLoader, SnapshotLoader};
use qhist_core::{Era, HistResult, QubitRecord};
use serde::{Deserialize, Serialize};

/// A snapshot that produced rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedSnapshot {
    /// Era label
    pub era: String,
    /// Snapshot name
    pub name: String,
    /// Number of qubits (= rows emitted)
    pub qubits: usize,
}

/// A snapshot that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSnapshot {
    /// Era label
    pub era: String,
    /// Snapshot name
    pub name: String,
    /// Loader error message
    pub reason: String,
}

/// Result of the extraction pass
/// Gantree: Extraction // 추출 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Eras visited, in order
    pub eras: Vec<Era>,
    /// All rows in era → snapshot → qubit order
    pub records: Vec<QubitRecord>,
    /// Snapshots that loaded
    pub loaded: Vec<LoadedSnapshot>,
    /// Snapshots that were skipped
    pub skipped: Vec<SkippedSnapshot>,
}

impl Extraction {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Rows belonging to one snapshot
    pub fn rows_for<'a>(&'a self, snapshot: &'a str) -> impl Iterator<Item = &'a QubitRecord> {
        self.records.iter().filter(move |r| r.snapshot_name == snapshot)
    }
}

/// Extraction pipeline over any snapshot source
/// Gantree: Pipeline // 단계별 실행
pub struct Pipeline<L: SnapshotLoader> {
    registry: EraRegistry,
    loader: L,
}

impl<L: SnapshotLoader> Pipeline<L> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create pipeline
    pub fn new(registry: EraRegistry, loader: L) -> Self {
        Self { registry, loader }
    }

    /// Registry in use
    pub fn registry(&self) -> &EraRegistry {
        &self.registry
    }

    /// Loader in use
    pub fn loader(&self) -> &L {
        &self.loader
    }

    // ========================================================================
    // Stages
    // ========================================================================

    /// Load every registered snapshot and flatten it to rows
    pub fn extract(&self) -> HistResult<Extraction> {
        log::info!(
            "Extracting {} snapshots in {} eras from {}",
            self.registry.snapshot_count(),
            self.registry.len(),
            self.loader.describe()
        );

        let mut extraction = Extraction {
            eras: self.registry.eras().to_vec(),
            records: Vec::new(),
            loaded: Vec::new(),
            skipped: Vec::new(),
        };

        for (era, name) in self.registry.snapshots() {
            match self.loader.load(name) {
                Ok(mut snapshot) => {
                    // rows carry the registry identifier
                    if snapshot.name != name {
                        log::debug!("{} loaded as '{}'", name, snapshot.name);
                        snapshot.name = name.to_string();
                    }
                    let qubits =
                        RowExtractor::extract_into(&era.label, &snapshot, &mut extraction.records);
                    log::info!("{} / {}: {} qubits", era.label, name, qubits);
                    extraction.loaded.push(LoadedSnapshot {
                        era: era.label.clone(),
                        name: name.to_string(),
                        qubits,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    log::warn!("Skipping {} / {}: {}", era.label, name, e);
                    extraction.skipped.push(SkippedSnapshot {
                        era: era.label.clone(),
                        name: name.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if extraction.loaded.is_empty() {
            log::warn!("No snapshot could be loaded; output will contain only the header");
        }

        Ok(extraction)
    }

    /// Extract and write the CSV
    pub fn run(&self, writer: &CsvWriter) -> HistResult<Extraction> {
        let extraction = self.extract()?;
        writer.write(&extraction.records)?;
        Ok(extraction)
    }
}

impl Pipeline<PropsDirLoader> {
    /// Pipeline reading properties documents as configured
    pub fn from_config(config: &ExtractConfig) -> HistResult<Self> {
        config.validate()?;
        let registry = config.load_registry()?;
        Ok(Self::new(registry, PropsDirLoader::new(&config.snapshot_dir)))
    }
}

// ============================================================================
// Tests
// ============================================================================
