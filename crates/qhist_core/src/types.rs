//! Core types for QHIST
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Validated wrappers and the records that flow through the extraction pass.

use crate::error::{HistError, HistResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

// ============================================================================
// Probability (Validated Wrapper)
// ============================================================================

/// Probability value in range [0, 1]
/// Gantree: Probability // 범위 검증 구조체
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Create a new Probability with validation
    /// Gantree: new(f64) -> Result<Self> // 생성+검증
    pub fn new(value: f64) -> HistResult<Self> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&value) {
            return Err(HistError::InvalidProbability(value));
        }
        Ok(Self(value))
    }

    /// Get the probability value
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value as a percentage
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Zero probability
    pub const ZERO: Self = Self(0.0);
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = HistError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

// ============================================================================
// Era
// ============================================================================

/// A hardware generation grouping several calibration snapshots
/// Gantree: Era // 하드웨어 세대
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    /// Era label, e.g. "Eagle R3"
    pub label: String,

    /// Free-form year range, e.g. "2020/21"
    pub year_range: String,

    /// Snapshot identifiers in visiting order
    pub snapshot_names: Vec<String>,
}

impl Era {
    /// Create a new era
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        year_range: impl Into<String>,
        snapshot_names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            label: label.into(),
            year_range: year_range.into(),
            snapshot_names: snapshot_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of snapshots in this era
    pub fn len(&self) -> usize {
        self.snapshot_names.len()
    }

    /// Check if the era lists no snapshots
    pub fn is_empty(&self) -> bool {
        self.snapshot_names.is_empty()
    }

    /// Check whether a snapshot belongs to this era
    pub fn contains(&self, snapshot: &str) -> bool {
        self.snapshot_names.iter().any(|s| s == snapshot)
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year_range.is_empty() {
            write!(f, "{}", self.label)
        } else {
            write!(f, "{} ({})", self.label, self.year_range)
        }
    }
}

// ============================================================================
// QubitRecord
// ============================================================================

/// One flattened output row: the calibration of a single physical qubit
/// Gantree: QubitRecord // 큐비트 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitRecord {
    /// Era label
    pub era: String,

    /// Snapshot name
    pub snapshot_name: String,

    /// Qubit index within the snapshot
    pub qubit_index: QubitId,

    /// T1 in seconds, `None` if missing
    pub t1: Option<f64>,

    /// T2 in seconds, `None` if missing
    pub t2: Option<f64>,

    /// Readout error, `None` if missing
    pub readout_error: Option<Probability>,
}

impl QubitRecord {
    /// Check whether all three metrics are present
    pub fn is_complete(&self) -> bool {
        self.t1.is_some() && self.t2.is_some() && self.readout_error.is_some()
    }

    /// T2/T1 ratio when both are present and T1 is positive
    pub fn coherence_ratio(&self) -> Option<f64> {
        match (self.t1, self.t2) {
            (Some(t1), Some(t2)) if t1 > 0.0 => Some(t2 / t1),
            _ => None,
        }
    }
}

impl fmt::Display for QubitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/q{}",
            self.era, self.snapshot_name, self.qubit_index
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
