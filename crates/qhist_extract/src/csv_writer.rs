//! CSV output
//!
//! Gantree: L2_Extract → CsvWriter
//!
//! Header plus one row per qubit record. Missing metrics are written as
//! empty fields. The file is staged in the target directory and renamed into
//! place, so the output path never holds a partial file.

use qhist_core::{output, HistError, HistResult, QubitRecord};
use std::borrow::Cow;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes qubit records to a CSV file
/// Gantree: CsvWriter // CSV 출력
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    /// Create writer targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write header and records, returning the number of data rows.
    ///
    /// Any filesystem failure is a [`HistError::WriteError`].
    pub fn write(&self, records: &[QubitRecord]) -> HistResult<usize> {
        let target = self.path.display().to_string();

        if self.path.is_dir() {
            return Err(HistError::write(&target, "path is a directory"));
        }

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| HistError::write(&target, e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| HistError::write(&target, e))?;
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            write_csv(&mut out, records).map_err(|e| HistError::write(&target, e))?;
            out.flush().map_err(|e| HistError::write(&target, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| HistError::write(&target, e))?;

        // the temp file is removed on drop if persist fails
        tmp.persist(&self.path)
            .map_err(|e| HistError::write(&target, e.error))?;

        log::info!("Wrote {} rows to {}", records.len(), target);
        Ok(records.len())
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Render records as a CSV document
pub fn to_csv_string(records: &[QubitRecord]) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_csv(&mut buf, records);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Stream header and rows to any writer
pub fn write_csv<W: Write>(out: &mut W, records: &[QubitRecord]) -> io::Result<()> {
    writeln!(out, "{}", header_line())?;
    for record in records {
        writeln!(out, "{}", row_line(record))?;
    }
    Ok(())
}

/// Header row
pub fn header_line() -> String {
    join_fields(output::HEADER.iter().map(|h| Cow::Borrowed(*h)))
}

/// One data row
pub fn row_line(record: &QubitRecord) -> String {
    join_fields(
        [
            escape_field(&record.era),
            escape_field(&record.snapshot_name),
            Cow::Owned(record.qubit_index.to_string()),
            Cow::Owned(format_metric(record.t1)),
            Cow::Owned(format_metric(record.t2)),
            Cow::Owned(format_metric(record.readout_error.map(f64::from))),
        ]
        .into_iter(),
    )
}

/// Missing or non-finite values render as an empty field
fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}

/// RFC 4180 quoting for fields containing a delimiter, quote or newline
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([output::DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn join_fields<'a>(fields: impl Iterator<Item = Cow<'a, str>>) -> String {
    let mut line = String::new();
    for (i, field) in fields.enumerate() {
        if i > 0 {
            line.push(output::DELIMITER);
        }
        line.push_str(&field);
    }
    line
}

// ============================================================================
// Tests
// ============================================================================
