//! # QHIST Calibration
//!
//! Calibration snapshot loading for archived quantum processors.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qhist_calibration // L1: Calibration (완료)
//!     BackendProperties // Qiskit props 문서 (완료)
//!     CalibrationSnapshot // 스냅샷 (완료)
//!         from_properties() - 단위 변환, readout fallback
//!     SnapshotLoader // trait (완료)
//!         PropsDirLoader - props_<name>.json
//!         InMemoryLoader - 테스트/임베딩
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qhist_calibration::prelude::*;
//!
//! let loader = InMemoryLoader::new()
//!     .with_snapshot(CalibrationSnapshot::uniform("Ourense", 5, 100.0, 60.0, 0.02));
//!
//! let snapshot = loader.load("Ourense").unwrap();
//! assert_eq!(snapshot.num_qubits(), 5);
//! ```
//!
//! ## Reading Qiskit Fake-Provider Data
//!
//! ```rust,no_run
//! use qhist_calibration::prelude::*;
//!
//! // e.g. site-packages/qiskit_ibm_runtime/fake_provider/backends
//! let loader = PropsDirLoader::new("/path/to/fake_provider/backends");
//! match loader.load("Sherbrooke") {
//!     Ok(snapshot) => println!("{}", snapshot),
//!     Err(e) if e.is_recoverable() => eprintln!("skipping: {}", e),
//!     Err(e) => panic!("{}", e),
//! }
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Qiskit properties document (Gantree: L1_Calibration → BackendProperties)
pub mod properties;

/// Calibration snapshot (Gantree: L1_Calibration → CalibrationSnapshot)
pub mod snapshot;

/// Snapshot loaders (Gantree: L1_Calibration → SnapshotLoader)
pub mod loader;

// ============================================================================
// Re-exports
// ============================================================================

pub use loader::{snapshot_key, InMemoryLoader, PropsDirLoader, SnapshotLoader};
pub use properties::{BackendProperties, GateParameter, GateProperty, QubitProperty};
pub use snapshot::{CalibrationSnapshot, QubitCalibration};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qhist_calibration::prelude::*;
    //! ```

    pub use crate::loader::{InMemoryLoader, PropsDirLoader, SnapshotLoader};
    pub use crate::properties::BackendProperties;
    pub use crate::snapshot::{CalibrationSnapshot, QubitCalibration};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_document_to_snapshot_via_loader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("props_ourense.json"),
            r#"{"qubits": [
                [{"name": "T1", "unit": "us", "value": 100.0},
                 {"name": "T2", "unit": "us", "value": 50.0},
                 {"name": "readout_error", "value": 0.02}],
                [{"name": "T1", "unit": "us", "value": 80.0},
                 {"name": "T2", "unit": "us", "value": 40.0},
                 {"name": "readout_error", "value": 0.03}]
            ]}"#,
        )
        .unwrap();

        let snapshot = PropsDirLoader::new(dir.path()).load("Ourense").unwrap();
        assert_eq!(snapshot.num_qubits(), 2);
        assert_eq!(snapshot.complete_qubits(), 2);

        let q1 = snapshot.qubit(1).unwrap();
        assert_relative_eq!(q1.t2_s.unwrap(), 40e-6, epsilon = 1e-15);
    }

    #[test]
    fn test_loaders_share_trait() {
        let loaders: Vec<Box<dyn SnapshotLoader>> = vec![
            Box::new(InMemoryLoader::new()),
            Box::new(PropsDirLoader::new("/nonexistent")),
        ];

        for loader in &loaders {
            let err = loader.load("Washington").unwrap_err();
            assert!(err.is_recoverable(), "{}: {}", loader.describe(), err);
        }
    }
}
