//! Row extraction
//!
//! Gantree: L2_Extract → RowExtractor
//!
//! Flattens a calibration snapshot into one [`QubitRecord`] per physical
//! qubit, in ascending qubit order. Missing metrics stay `None`.

use qhist_calibration::CalibrationSnapshot;
use qhist_core::QubitRecord;

/// Snapshot-to-rows flattener
/// Gantree: RowExtractor // 행 추출
pub struct RowExtractor;

impl RowExtractor {
    /// Extract all rows of a snapshot tagged with its era
    pub fn extract(era: &str, snapshot: &CalibrationSnapshot) -> Vec<QubitRecord> {
        let mut rows = Vec::with_capacity(snapshot.num_qubits());
        Self::extract_into(era, snapshot, &mut rows);
        rows
    }

    /// Append the rows of a snapshot to `out`, returning how many were added
    pub fn extract_into(era: &str, snapshot: &CalibrationSnapshot, out: &mut Vec<QubitRecord>) -> usize {
        let before = out.len();
        out.extend(snapshot.iter().map(|(index, q)| QubitRecord {
            era: era.to_string(),
            snapshot_name: snapshot.name.clone(),
            qubit_index: index,
            t1: q.t1_s,
            t2: q.t2_s,
            readout_error: q.readout_error,
        }));

        let added = out.len() - before;
        let incomplete = out[before..].iter().filter(|r| !r.is_complete()).count();
        if incomplete > 0 {
            log::debug!(
                "{}: {} of {} qubits have missing metrics",
                snapshot.name,
                incomplete,
                added
            );
        }
        added
    }
}

// ============================================================================
// Tests
// ============================================================================
