//! Error types for QHIST
//!
//! Gantree: L0_Foundation → Errors
//!
//! Error taxonomy for the extraction pass. Snapshot errors are recoverable
//! (the snapshot is skipped), everything else aborts the run.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QHIST
/// Gantree: HistError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistError {
    // ========================================================================
    // Snapshot Errors
    // ========================================================================
    /// Snapshot identifier not known to the loader
    /// Gantree: SnapshotUnavailable{{name,reason}} // 스냅샷 없음
    #[error("Snapshot '{name}' unavailable: {reason}")]
    SnapshotUnavailable { name: String, reason: String },

    /// Snapshot document exists but could not be decoded
    #[error("Snapshot '{name}' is malformed: {reason}")]
    InvalidSnapshot { name: String, reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Probability value out of range [0, 1]
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Era registry failed validation
    /// Gantree: RegistryError(String) // 레지스트리
    #[error("Registry error: {0}")]
    RegistryError(String),

    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// CSV output could not be written
    /// Gantree: WriteError{{path,reason}} // 쓰기 실패
    #[error("Failed to write '{path}': {reason}")]
    WriteError { path: String, reason: String },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QHIST operations
/// Gantree: HistResult<T> // type alias
pub type HistResult<T> = Result<T, HistError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for HistError {
    fn from(err: serde_json::Error) -> Self {
        HistError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for HistError {
    fn from(err: std::io::Error) -> Self {
        HistError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl HistError {
    /// Shorthand for [`HistError::SnapshotUnavailable`]
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        HistError::SnapshotUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`HistError::InvalidSnapshot`]
    pub fn invalid_snapshot(name: impl Into<String>, reason: impl Into<String>) -> Self {
        HistError::InvalidSnapshot {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`HistError::WriteError`]
    pub fn write(path: impl Into<String>, reason: impl ToString) -> Self {
        HistError::WriteError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if error is recoverable (skip the snapshot and continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HistError::SnapshotUnavailable { .. } | HistError::InvalidSnapshot { .. }
        )
    }

    /// Check if error must abort the run
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HistError::unavailable("Kyoto", "no properties document");
        let msg = err.to_string();
        assert!(msg.contains("Kyoto"));
        assert!(msg.contains("no properties document"));
    }

    #[test]
    fn test_write_error_display() {
        let err = HistError::write("/ro/out.csv", "permission denied");
        assert!(err.to_string().contains("/ro/out.csv"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(HistError::unavailable("x", "y").is_recoverable());
        assert!(HistError::invalid_snapshot("x", "y").is_recoverable());
        assert!(!HistError::write("out.csv", "disk full").is_recoverable());
        assert!(HistError::RegistryError("dup".into()).is_fatal());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HistError = io.into();
        assert!(matches!(err, HistError::FileError(_)));
        assert!(err.is_fatal());
    }
}
