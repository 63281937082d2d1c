//! Calibration snapshot of one processor
//!
//! Gantree: L1_Calibration → CalibrationSnapshot
//!
//! Per-qubit T1, T2 and readout error normalized to SI units. A missing or
//! unusable metric is kept as `None` so that every physical qubit survives
//! into the output.

use crate::properties::{BackendProperties, QubitProperty};
use qhist_core::{props, units, Probability, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calibration of a single physical qubit
/// Gantree: QubitCalibration // 큐비트 캘리브레이션
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QubitCalibration {
    /// T1 relaxation time (seconds)
    pub t1_s: Option<f64>,

    /// T2 dephasing time (seconds)
    pub t2_s: Option<f64>,

    /// Readout error
    pub readout_error: Option<Probability>,
}

impl QubitCalibration {
    /// Create from raw values, dropping non-finite times and out-of-range errors
    pub fn new(t1_s: Option<f64>, t2_s: Option<f64>, readout_error: Option<f64>) -> Self {
        Self {
            t1_s: t1_s.filter(|v| v.is_finite()),
            t2_s: t2_s.filter(|v| v.is_finite()),
            readout_error: readout_error.and_then(|p| Probability::new(p).ok()),
        }
    }
}

/// Frozen calibration data of one named processor
/// Gantree: CalibrationSnapshot // 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSnapshot {
    /// Snapshot name
    /// Gantree: name: String // 이름
    pub name: String,

    /// Calibration date reported by the source, if any
    pub last_update: Option<String>,

    /// Per-qubit calibration, indexed by qubit
    /// Gantree: qubits: Vec<QubitCalibration> // 큐비트 목록
    pub qubits: Vec<QubitCalibration>,
}

impl CalibrationSnapshot {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty snapshot
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_update: None,
            qubits: Vec::new(),
        }
    }

    /// Create from uniform values (for testing)
    pub fn uniform(
        name: impl Into<String>,
        num_qubits: usize,
        t1_us: f64,
        t2_us: f64,
        readout_error: f64,
    ) -> Self {
        let qubit = QubitCalibration::new(
            Some(t1_us * units::US),
            Some(t2_us * units::US),
            Some(readout_error),
        );
        Self {
            qubits: vec![qubit; num_qubits],
            ..Self::new(name)
        }
    }

    /// Build from a Qiskit properties document
    /// Gantree: from_properties(name,props) -> Self // 문서 변환
    pub fn from_properties(name: impl Into<String>, doc: &BackendProperties) -> Self {
        let name = name.into();
        let qubits = (0..doc.num_qubits())
            .map(|q| {
                let t1 = time_value(&name, q, doc.qubit_property(q, props::T1));
                let t2 = time_value(&name, q, doc.qubit_property(q, props::T2));
                let readout = readout_value(&name, q, doc);
                QubitCalibration::new(t1, t2, readout)
            })
            .collect();

        Self {
            name,
            last_update: doc.last_update_date.clone(),
            qubits,
        }
    }

    /// Builder: append a qubit
    pub fn with_qubit(mut self, qubit: QubitCalibration) -> Self {
        self.qubits.push(qubit);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of physical qubits
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Calibration of one qubit
    pub fn qubit(&self, qubit: QubitId) -> Option<&QubitCalibration> {
        self.qubits.get(qubit)
    }

    /// Iterate `(index, calibration)` in ascending qubit order
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, &QubitCalibration)> {
        self.qubits.iter().enumerate()
    }

    /// Number of qubits with all three metrics present
    pub fn complete_qubits(&self) -> usize {
        self.qubits
            .iter()
            .filter(|q| q.t1_s.is_some() && q.t2_s.is_some() && q.readout_error.is_some())
            .count()
    }
}

impl fmt::Display for CalibrationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationSnapshot({}, {}Q, {} complete)",
            self.name,
            self.num_qubits(),
            self.complete_qubits()
        )
    }
}

// ============================================================================
// Property Extraction
// ============================================================================

fn time_value(snapshot: &str, qubit: QubitId, prop: Option<&QubitProperty>) -> Option<f64> {
    let prop = prop?;
    let value = prop.value?;
    let unit = prop.unit.as_deref().unwrap_or("");
    match units::time_scale(unit) {
        Some(scale) => Some(value * scale),
        None => {
            log::warn!(
                "{snapshot}: qubit {qubit} {} has unknown unit '{unit}', treating as missing",
                prop.name
            );
            None
        }
    }
}

/// Readout error in priority order: qubit property, `measure` gate error,
/// then the mean of the two assignment-error probabilities.
fn readout_value(snapshot: &str, qubit: QubitId, doc: &BackendProperties) -> Option<f64> {
    let direct = doc
        .qubit_property(qubit, props::READOUT_ERROR)
        .and_then(|p| p.value);

    let value = direct.or_else(|| doc.measure_error(qubit)).or_else(|| {
        let p01 = doc.qubit_property(qubit, props::PROB_MEAS0_PREP1)?.value?;
        let p10 = doc.qubit_property(qubit, props::PROB_MEAS1_PREP0)?.value?;
        Some((p01 + p10) / 2.0)
    })?;

    if !(0.0..=1.0).contains(&value) {
        log::warn!("{snapshot}: qubit {qubit} readout error {value} outside [0, 1], treating as missing");
        return None;
    }
    Some(value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn doc(json: &str) -> BackendProperties {
        BackendProperties::from_json(json).unwrap()
    }

    #[test]
    fn test_uniform_snapshot() {
        let snap = CalibrationSnapshot::uniform("Ourense", 5, 100.0, 60.0, 0.02);
        assert_eq!(snap.num_qubits(), 5);
        assert_eq!(snap.complete_qubits(), 5);
        assert_relative_eq!(snap.qubit(4).unwrap().t1_s.unwrap(), 100e-6, epsilon = 1e-15);
    }

    #[test]
    fn test_from_properties_converts_units() {
        let d = doc(r#"{"qubits": [[
            {"name": "T1", "unit": "us", "value": 120.0},
            {"name": "T2", "unit": "ns", "value": 80000.0},
            {"name": "readout_error", "unit": "", "value": 0.015}
        ]]}"#);

        let snap = CalibrationSnapshot::from_properties("Cairo", &d);
        let q = snap.qubit(0).unwrap();
        assert_relative_eq!(q.t1_s.unwrap(), 120e-6, epsilon = 1e-15);
        assert_relative_eq!(q.t2_s.unwrap(), 80e-6, epsilon = 1e-15);
        assert_relative_eq!(q.readout_error.unwrap().value(), 0.015);
    }

    #[test]
    fn test_missing_metrics_keep_the_qubit() {
        let d = doc(r#"{"qubits": [
            [{"name": "T1", "unit": "us", "value": 90.0}],
            [],
            [{"name": "T2", "unit": "us", "value": null}]
        ]}"#);

        let snap = CalibrationSnapshot::from_properties("Kolkata", &d);
        assert_eq!(snap.num_qubits(), 3);
        assert!(snap.qubit(0).unwrap().t2_s.is_none());
        assert_eq!(*snap.qubit(1).unwrap(), QubitCalibration::default());
        assert!(snap.qubit(2).unwrap().t2_s.is_none());
    }

    #[test]
    fn test_readout_falls_back_to_measure_gate() {
        let d = doc(r#"{
            "qubits": [[{"name": "T1", "unit": "us", "value": 90.0}]],
            "gates": [{"gate": "measure", "qubits": [0],
                       "parameters": [{"name": "gate_error", "value": 0.04}]}]
        }"#);

        let snap = CalibrationSnapshot::from_properties("Torino", &d);
        assert_relative_eq!(snap.qubit(0).unwrap().readout_error.unwrap().value(), 0.04);
    }

    #[test]
    fn test_readout_falls_back_to_assignment_probabilities() {
        let d = doc(r#"{"qubits": [[
            {"name": "prob_meas0_prep1", "value": 0.03},
            {"name": "prob_meas1_prep0", "value": 0.01}
        ]]}"#);

        let snap = CalibrationSnapshot::from_properties("Hanoi", &d);
        assert_relative_eq!(snap.qubit(0).unwrap().readout_error.unwrap().value(), 0.02);
    }

    #[test]
    fn test_out_of_range_readout_is_missing() {
        let d = doc(r#"{"qubits": [[{"name": "readout_error", "value": 1.7}]]}"#);
        let snap = CalibrationSnapshot::from_properties("Fez", &d);
        assert!(snap.qubit(0).unwrap().readout_error.is_none());
    }

    #[test]
    fn test_unknown_time_unit_is_missing() {
        let d = doc(r#"{"qubits": [[{"name": "T1", "unit": "GHz", "value": 5.0}]]}"#);
        let snap = CalibrationSnapshot::from_properties("Osaka", &d);
        assert!(snap.qubit(0).unwrap().t1_s.is_none());
    }

    #[test]
    fn test_serialization() {
        let snap = CalibrationSnapshot::uniform("Kyoto", 3, 200.0, 120.0, 0.01);
        let json = serde_json::to_string(&snap).unwrap();
        let restored: CalibrationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, restored);
    }
}
