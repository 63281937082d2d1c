//! # QHIST Core
//!
//! Foundation types for the quantum hardware history extractor.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qhist_core // L0: Foundation (완료)
//!     CoreTypes // QubitId, Probability, Era, QubitRecord (완료)
//!     Constants // 단위/속성 이름/출력 형식 (완료)
//!     Errors // HistError (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qhist_core::prelude::*;
//!
//! let era = Era::new("Eagle R3", "2023", ["Sherbrooke", "Brisbane"]);
//! assert_eq!(era.to_string(), "Eagle R3 (2023)");
//!
//! let readout = Probability::new(0.018).unwrap();
//! assert!(readout.percent() > 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{output, props, units};
pub use error::{HistError, HistResult};
pub use types::{Era, Probability, QubitId, QubitRecord};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qhist_core::prelude::*;
    //! ```

    pub use crate::constants::{output, props, units};
    pub use crate::error::{HistError, HistResult};
    pub use crate::types::{Era, Probability, QubitId, QubitRecord};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_record_serialization() {
        let rec = QubitRecord {
            era: "Falcon".into(),
            snapshot_name: "Hanoi".into(),
            qubit_index: 0,
            t1: Some(1.2e-4),
            t2: None,
            readout_error: Some(Probability::new(0.01).unwrap()),
        };

        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"t2\":null"));

        let restored: QubitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, restored);
    }

    #[test]
    fn test_error_taxonomy() {
        assert!(HistError::unavailable("Osaka", "missing").is_recoverable());
        assert!(HistError::write("out.csv", "disk full").is_fatal());
    }
}
