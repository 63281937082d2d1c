//! # QHIST Extract
//!
//! Era registry, per-qubit row extraction, CSV output and run summaries.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qhist_extract // L2+L3: Extract + Integration (완료)
//!     EraRegistry // 세대 → 스냅샷 (완료)
//!     RowExtractor // 스냅샷 → 행 (완료)
//!     CsvWriter // 원자적 CSV 출력 (완료)
//!     Reporter // 중앙값 요약 (완료)
//!     ExtractConfig // 실행 설정 (완료)
//!     Pipeline // registry → loader → extractor → writer (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qhist_extract::prelude::*;
//! use qhist_calibration::{CalibrationSnapshot, InMemoryLoader};
//! use qhist_core::Era;
//!
//! let registry = EraRegistry::new(vec![Era::new("Falcon", "2019", ["Ourense"])]).unwrap();
//! let loader = InMemoryLoader::new()
//!     .with_snapshot(CalibrationSnapshot::uniform("Ourense", 5, 100.0, 60.0, 0.02));
//!
//! let extraction = Pipeline::new(registry, loader).extract().unwrap();
//! assert_eq!(extraction.row_count(), 5);
//!
//! let csv = to_csv_string(&extraction.records);
//! assert!(csv.starts_with("era,snapshot_name,qubit_index,t1,t2,readout_error"));
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Era registry (Gantree: L2_Extract → EraRegistry)
pub mod registry;

/// Row extraction (Gantree: L2_Extract → RowExtractor)
pub mod extractor;

/// CSV output (Gantree: L2_Extract → CsvWriter)
pub mod csv_writer;

/// Summaries (Gantree: L2_Extract → Reporter)
pub mod summary;

/// Configuration (Gantree: L3_Integration → ExtractConfig)
pub mod config;

/// Pipeline (Gantree: L3_Integration → Pipeline)
pub mod pipeline;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ExtractConfig;
pub use csv_writer::{to_csv_string, CsvWriter};
pub use extractor::RowExtractor;
pub use pipeline::{Extraction, LoadedSnapshot, Pipeline, SkippedSnapshot};
pub use registry::EraRegistry;
pub use summary::{Reporter, RunSummary, SummaryFormat};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qhist_extract::prelude::*;
    //! ```

    pub use crate::config::ExtractConfig;
    pub use crate::csv_writer::{to_csv_string, CsvWriter};
    pub use crate::extractor::RowExtractor;
    pub use crate::pipeline::{Extraction, Pipeline};
    pub use crate::registry::EraRegistry;
    pub use crate::summary::{Reporter, RunSummary, SummaryFormat};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qhist_calibration::{CalibrationSnapshot, InMemoryLoader, QubitCalibration};
    use qhist_core::Era;

    fn fleet_loader() -> InMemoryLoader {
        let registry = EraRegistry::ibm_fleet();
        let mut loader = InMemoryLoader::new();
        for (i, (era, name)) in registry.snapshots().enumerate() {
            // Kyoto missing from the archive
            if name == "Kyoto" {
                continue;
            }
            let qubits = match era.label.as_str() {
                "Falcon" => 27,
                "Heron" => 133,
                _ => 127,
            };
            loader.insert(CalibrationSnapshot::uniform(
                name,
                qubits,
                100.0 + i as f64,
                80.0,
                0.02,
            ));
        }
        loader
    }

    #[test]
    fn test_row_count_matches_qubit_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quantum_hardware_data.csv");

        let extraction = Pipeline::new(EraRegistry::ibm_fleet(), fleet_loader())
            .run(&CsvWriter::new(&path))
            .unwrap();

        let expected: usize = extraction.loaded.iter().map(|s| s.qubits).sum();
        assert_eq!(expected, 3 * 27 + 127 + 3 * 127 + 3 * 133);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), expected + 1);
        assert_eq!(extraction.skipped.len(), 1);
    }

    #[test]
    fn test_readout_always_in_range_or_null() {
        let loader = InMemoryLoader::new().with_snapshot(
            CalibrationSnapshot::new("Ourense")
                .with_qubit(QubitCalibration::new(Some(1e-4), Some(5e-5), Some(0.02)))
                .with_qubit(QubitCalibration::new(Some(1e-4), Some(5e-5), Some(1.3)))
                .with_qubit(QubitCalibration::new(Some(1e-4), Some(5e-5), Some(-0.1))),
        );
        let registry = EraRegistry::new(vec![Era::new("Falcon", "2019", ["Ourense"])]).unwrap();

        let extraction = Pipeline::new(registry, loader).extract().unwrap();
        assert_eq!(extraction.row_count(), 3);
        for r in &extraction.records {
            if let Some(p) = r.readout_error {
                assert!((0.0..=1.0).contains(&p.value()));
            }
        }
        assert!(extraction.records[1].readout_error.is_none());
    }

    #[test]
    fn test_summary_after_run() {
        let extraction = Pipeline::new(EraRegistry::ibm_fleet(), fleet_loader())
            .extract()
            .unwrap();
        let summary = RunSummary::from_extraction(&extraction);

        assert_eq!(summary.eras.len(), 4);
        let r3 = summary.eras.iter().find(|e| e.label == "Eagle R3").unwrap();
        assert_eq!(r3.snapshots.len(), 3);

        let text = Reporter::to_text(&summary);
        assert!(text.contains("skipped Kyoto"));
    }
}
