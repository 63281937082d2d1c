//! Extraction summaries
//!
//! Gantree: L2_Extract → Reporter
//!
//! Per-snapshot and per-era medians of the extracted rows, rendered as a
//! console table or JSON.

use crate::pipeline::{Extraction, SkippedSnapshot};
use qhist_core::{units, QubitRecord};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Console table
    #[default]
    Text,
    /// JSON document
    Json,
    /// No summary
    None,
}

/// Median of the finite values, `None` if there are none
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.into_iter().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    Some(if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    })
}

fn ratio(t2: Option<f64>, t1: Option<f64>) -> Option<f64> {
    match (t2, t1) {
        (Some(t2), Some(t1)) if t1 > 0.0 => Some(t2 / t1),
        _ => None,
    }
}

// ============================================================================
// Summary Types
// ============================================================================

/// Medians of one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Snapshot name
    pub name: String,
    /// Qubits (= rows) in the snapshot
    pub qubits: usize,
    /// Qubits with a T1 value
    pub qubits_with_t1: usize,
    /// Median T1 (microseconds)
    pub median_t1_us: Option<f64>,
    /// Median T2 (microseconds)
    pub median_t2_us: Option<f64>,
    /// Median T2 over median T1
    pub t2_t1_ratio: Option<f64>,
    /// Median readout error (percent)
    pub median_readout_pct: Option<f64>,
}

impl SnapshotSummary {
    /// Summarize the rows of one snapshot
    pub fn from_rows<'a>(name: &str, rows: impl IntoIterator<Item = &'a QubitRecord>) -> Self {
        let rows: Vec<&QubitRecord> = rows.into_iter().collect();
        let t1 = median(rows.iter().filter_map(|r| r.t1).map(units::s_to_us));
        let t2 = median(rows.iter().filter_map(|r| r.t2).map(units::s_to_us));
        Self {
            name: name.to_string(),
            qubits: rows.len(),
            qubits_with_t1: rows.iter().filter(|r| r.t1.is_some()).count(),
            median_t1_us: t1,
            median_t2_us: t2,
            t2_t1_ratio: ratio(t2, t1),
            median_readout_pct: median(
                rows.iter()
                    .filter_map(|r| r.readout_error)
                    .map(|p| p.percent()),
            ),
        }
    }
}

/// Pooled medians of one era
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraSummary {
    /// Era label
    pub label: String,
    /// Year range
    pub year_range: String,
    /// Loaded snapshots
    pub snapshots: Vec<SnapshotSummary>,
    /// T1 data points pooled across the era
    pub points: usize,
    /// Pooled median T1 (microseconds)
    pub median_t1_us: Option<f64>,
    /// Pooled median T2 (microseconds)
    pub median_t2_us: Option<f64>,
    /// Pooled T2/T1 ratio
    pub t2_t1_ratio: Option<f64>,
}

/// Summary of a whole run
/// Gantree: RunSummary // 실행 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Eras in registry order
    pub eras: Vec<EraSummary>,
    /// Data rows produced
    pub total_rows: usize,
    /// Snapshots that could not be loaded
    pub skipped: Vec<SkippedSnapshot>,
}

impl RunSummary {
    /// Build from an extraction
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let eras = extraction
            .eras
            .iter()
            .map(|era| {
                let rows: Vec<&QubitRecord> = extraction
                    .records
                    .iter()
                    .filter(|r| r.era == era.label)
                    .collect();

                let snapshots = extraction
                    .loaded
                    .iter()
                    .filter(|s| s.era == era.label)
                    .map(|s| {
                        SnapshotSummary::from_rows(
                            &s.name,
                            rows.iter().copied().filter(|r| r.snapshot_name == s.name),
                        )
                    })
                    .collect();

                let t1 = median(rows.iter().filter_map(|r| r.t1).map(units::s_to_us));
                let t2 = median(rows.iter().filter_map(|r| r.t2).map(units::s_to_us));

                EraSummary {
                    label: era.label.clone(),
                    year_range: era.year_range.clone(),
                    snapshots,
                    points: rows.iter().filter(|r| r.t1.is_some()).count(),
                    median_t1_us: t1,
                    median_t2_us: t2,
                    t2_t1_ratio: ratio(t2, t1),
                }
            })
            .collect();

        Self {
            eras,
            total_rows: extraction.records.len(),
            skipped: extraction.skipped.clone(),
        }
    }
}

// ============================================================================
// Reporter
// ============================================================================

/// Summary reporter
/// Gantree: Reporter // 결과 리포팅
pub struct Reporter;

impl Reporter {
    /// Render in the given format (empty string for [`SummaryFormat::None`])
    pub fn report(summary: &RunSummary, format: SummaryFormat) -> String {
        match format {
            SummaryFormat::Text => Self::to_text(summary),
            SummaryFormat::Json => Self::to_json(summary),
            SummaryFormat::None => String::new(),
        }
    }

    /// Console table
    pub fn to_text(summary: &RunSummary) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "{:<30} | {:^6} | {:>10} | {:>10} | {:^7} | {:>12}",
            "Era / Snapshot", "Qubits", "T1 Med", "T2 Med", "T2/T1", "Readout"
        )
        .unwrap();
        writeln!(output, "{}", "=".repeat(95)).unwrap();

        for era in &summary.eras {
            writeln!(output, "{} ({})", era.label, era.year_range).unwrap();

            for s in &era.snapshots {
                if s.qubits_with_t1 == 0 {
                    writeln!(output, "  ├─ {:<25} | no T1 data", s.name).unwrap();
                    continue;
                }
                writeln!(
                    output,
                    "  ├─ {:<25} | {:^6} | {:>10} | {:>10} | {:^7} | {:>12}",
                    s.name,
                    s.qubits_with_t1,
                    fmt_us(s.median_t1_us),
                    fmt_us(s.median_t2_us),
                    fmt_ratio(s.t2_t1_ratio),
                    s.median_readout_pct
                        .map(|p| format!("{p:.2}%"))
                        .unwrap_or_else(|| "N/A".to_string())
                )
                .unwrap();
            }

            if era.points > 0 {
                writeln!(
                    output,
                    "  ➤ {:<25} | {:^6} | {:>10} | {:>10} | {:^7} | {:>12}",
                    format!("era median ({} pts)", era.points),
                    "---",
                    fmt_us(era.median_t1_us),
                    fmt_us(era.median_t2_us),
                    fmt_ratio(era.t2_t1_ratio),
                    "---"
                )
                .unwrap();
            }
            writeln!(output, "{}", "-".repeat(95)).unwrap();
        }

        for s in &summary.skipped {
            writeln!(output, "skipped {} ({}): {}", s.name, s.era, s.reason).unwrap();
        }
        writeln!(output, "Total qubits: {}", summary.total_rows).unwrap();

        output
    }

    /// JSON document
    pub fn to_json(summary: &RunSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }
}

fn fmt_us(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1} µs"))
        .unwrap_or_else(|| "N/A".to_string())
}

fn fmt_ratio(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::LoadedSnapshot;
    use approx::assert_relative_eq;
    use qhist_core::{Era, Probability};

    fn row(era: &str, snap: &str, q: usize, t1_us: Option<f64>, t2_us: Option<f64>) -> QubitRecord {
        QubitRecord {
            era: era.into(),
            snapshot_name: snap.into(),
            qubit_index: q,
            t1: t1_us.map(|v| v * 1e-6),
            t2: t2_us.map(|v| v * 1e-6),
            readout_error: Some(Probability::new(0.01 * (q + 1) as f64).unwrap()),
        }
    }

    fn extraction() -> Extraction {
        Extraction {
            eras: vec![Era::new("Falcon", "2020/21", ["Hanoi", "Cairo"])],
            records: vec![
                row("Falcon", "Hanoi", 0, Some(100.0), Some(50.0)),
                row("Falcon", "Hanoi", 1, Some(200.0), Some(150.0)),
                row("Falcon", "Hanoi", 2, Some(300.0), None),
            ],
            loaded: vec![LoadedSnapshot {
                era: "Falcon".into(),
                name: "Hanoi".into(),
                qubits: 3,
            }],
            skipped: vec![SkippedSnapshot {
                era: "Falcon".into(),
                name: "Cairo".into(),
                reason: "not registered".into(),
            }],
        }
    }

    #[test]
    fn test_median() {
        assert_eq!(median(Vec::new()), None);
        assert_relative_eq!(median(vec![3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_relative_eq!(median(vec![4.0, 1.0, 2.0, 3.0]).unwrap(), 2.5);
        assert_relative_eq!(median(vec![f64::NAN, 5.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_snapshot_summary() {
        let ext = extraction();
        let s = SnapshotSummary::from_rows("Hanoi", &ext.records);

        assert_eq!(s.qubits, 3);
        assert_eq!(s.qubits_with_t1, 3);
        assert_relative_eq!(s.median_t1_us.unwrap(), 200.0, epsilon = 1e-9);
        assert_relative_eq!(s.median_t2_us.unwrap(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(s.t2_t1_ratio.unwrap(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(s.median_readout_pct.unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_run_summary() {
        let summary = RunSummary::from_extraction(&extraction());

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.eras.len(), 1);
        assert_eq!(summary.eras[0].snapshots.len(), 1);
        assert_eq!(summary.eras[0].points, 3);
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn test_to_text() {
        let text = Reporter::to_text(&RunSummary::from_extraction(&extraction()));

        assert!(text.contains("Falcon (2020/21)"));
        assert!(text.contains("Hanoi"));
        assert!(text.contains("200.0 µs"));
        assert!(text.contains("skipped Cairo"));
        assert!(text.contains("Total qubits: 3"));
    }

    #[test]
    fn test_report_formats() {
        let summary = RunSummary::from_extraction(&extraction());

        let json = Reporter::report(&summary, SummaryFormat::Json);
        assert!(json.contains("\"total_rows\": 3"));

        assert!(Reporter::report(&summary, SummaryFormat::None).is_empty());
    }

    #[test]
    fn test_summary_format_serde() {
        let f: SummaryFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(f, SummaryFormat::Json);
    }
}
