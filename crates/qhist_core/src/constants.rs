//! Constants for QHIST
//!
//! Gantree: L0_Foundation → Constants
//!
//! Unit conversions, Qiskit property names, and output format constants.

// ============================================================================
// Unit Constants
// Gantree: units // 단위 변환
// ============================================================================

pub mod units {
    //! Time unit conversion to seconds

    /// Seconds per microsecond
    pub const US: f64 = 1e-6;

    /// Seconds per nanosecond
    pub const NS: f64 = 1e-9;

    /// Seconds per millisecond
    pub const MS: f64 = 1e-3;

    /// Scale factor for a time unit label, `None` if the label is unknown.
    ///
    /// An empty label is read as microseconds, which is what Qiskit
    /// property documents use for T1/T2.
    pub fn time_scale(unit: &str) -> Option<f64> {
        match unit.trim() {
            "" | "us" | "µs" | "μs" => Some(US),
            "ns" => Some(NS),
            "ms" => Some(MS),
            "s" => Some(1.0),
            _ => None,
        }
    }

    /// Convert seconds to microseconds
    #[inline]
    pub fn s_to_us(s: f64) -> f64 {
        s / US
    }
}

// ============================================================================
// Qiskit Property Names
// Gantree: props // 속성 이름
// ============================================================================

pub mod props {
    //! Property and gate names used in Qiskit backend-properties documents

    /// Energy relaxation time
    pub const T1: &str = "T1";

    /// Dephasing time
    pub const T2: &str = "T2";

    /// Per-qubit readout error
    pub const READOUT_ERROR: &str = "readout_error";

    /// P(measure 0 | prepared 1)
    pub const PROB_MEAS0_PREP1: &str = "prob_meas0_prep1";

    /// P(measure 1 | prepared 0)
    pub const PROB_MEAS1_PREP0: &str = "prob_meas1_prep0";

    /// Measurement instruction name
    pub const MEASURE_GATE: &str = "measure";

    /// Gate error parameter name
    pub const GATE_ERROR: &str = "gate_error";
}

// ============================================================================
// Output Constants
// Gantree: output // 출력 형식
// ============================================================================

pub mod output {
    //! CSV output layout

    /// Default output file name
    pub const DEFAULT_FILENAME: &str = "quantum_hardware_data.csv";

    /// Fixed column order
    pub const HEADER: [&str; 6] = [
        "era",
        "snapshot_name",
        "qubit_index",
        "t1",
        "t2",
        "readout_error",
    ];

    /// Field delimiter
    pub const DELIMITER: char = ',';
}

// ============================================================================
// Tests
// ============================================================================
