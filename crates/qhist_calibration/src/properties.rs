//! Qiskit backend-properties document model
//!
//! Gantree: L1_Calibration → BackendProperties
//!
//! Mirrors the `props_<name>.json` files that ship with the Qiskit fake
//! providers. Only the fields the extractor reads are modelled; everything
//! else in the document is ignored.

use qhist_core::{props, HistResult, QubitId};
use serde::{Deserialize, Serialize};

/// Backend properties (calibration) document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendProperties {
    /// Backend name as recorded in the document
    #[serde(default)]
    pub backend_name: Option<String>,

    /// Last update time
    #[serde(default)]
    pub last_update_date: Option<String>,

    /// Qubit properties, indexed by qubit
    #[serde(default)]
    pub qubits: Vec<Vec<QubitProperty>>,

    /// Gate properties
    #[serde(default)]
    pub gates: Vec<GateProperty>,
}

/// Single qubit property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitProperty {
    /// Property name
    pub name: String,

    /// Property value (`null` in some archived documents)
    #[serde(default)]
    pub value: Option<f64>,

    /// Unit
    #[serde(default)]
    pub unit: Option<String>,

    /// Date
    #[serde(default)]
    pub date: Option<String>,
}

/// Gate property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateProperty {
    /// Gate name
    pub gate: String,

    /// Qubits
    #[serde(default)]
    pub qubits: Vec<QubitId>,

    /// Parameters
    #[serde(default)]
    pub parameters: Vec<GateParameter>,
}

/// Gate parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateParameter {
    /// Parameter name
    pub name: String,

    /// Parameter value
    #[serde(default)]
    pub value: Option<f64>,

    /// Unit
    #[serde(default)]
    pub unit: Option<String>,
}

impl BackendProperties {
    /// Parse a properties document
    pub fn from_json(json: &str) -> HistResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of qubits described by the document
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Look up a named property of one qubit
    pub fn qubit_property(&self, qubit: QubitId, name: &str) -> Option<&QubitProperty> {
        self.qubits.get(qubit)?.iter().find(|p| p.name == name)
    }

    /// `gate_error` of the `measure` instruction on a qubit
    pub fn measure_error(&self, qubit: QubitId) -> Option<f64> {
        self.gates
            .iter()
            .filter(|g| g.gate == props::MEASURE_GATE && g.qubits == [qubit])
            .flat_map(|g| g.parameters.iter())
            .find(|p| p.name == props::GATE_ERROR)
            .and_then(|p| p.value)
    }
}
