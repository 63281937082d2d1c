//! Extraction configuration
//!
//! Gantree: L3_Integration → ExtractConfig

use crate::registry::EraRegistry;
use crate::summary::SummaryFormat;
use qhist_core::{output, HistError, HistResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Settings for one extraction run
/// Gantree: ExtractConfig // 실행 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Directory holding `props_<name>.json` documents
    pub snapshot_dir: PathBuf,

    /// CSV output path
    pub output: PathBuf,

    /// Optional JSON registry; the built-in IBM fleet is used when absent
    pub registry: Option<PathBuf>,

    /// Summary printed after the run
    pub summary: SummaryFormat,
}

impl ExtractConfig {
    /// Create configuration reading from `snapshot_dir`
    pub fn new(snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set registry file
    pub fn with_registry(mut self, registry: impl Into<PathBuf>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Set summary format
    pub fn with_summary(mut self, summary: SummaryFormat) -> Self {
        self.summary = summary;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> HistResult<()> {
        if !self.snapshot_dir.is_dir() {
            return Err(HistError::ConfigError(format!(
                "snapshot directory {} does not exist",
                self.snapshot_dir.display()
            )));
        }

        if self.output.as_os_str().is_empty() {
            return Err(HistError::ConfigError("output path is empty".into()));
        }

        if let Some(ref registry) = self.registry {
            if !registry.is_file() {
                return Err(HistError::ConfigError(format!(
                    "registry file {} does not exist",
                    registry.display()
                )));
            }
        }

        Ok(())
    }

    /// Registry from file, or the IBM fleet
    pub fn load_registry(&self) -> HistResult<EraRegistry> {
        match self.registry {
            Some(ref path) => EraRegistry::from_file(path),
            None => Ok(EraRegistry::ibm_fleet()),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("."),
            output: PathBuf::from(output::DEFAULT_FILENAME),
            registry: None,
            summary: SummaryFormat::Text,
        }
    }
}

impl fmt::Display for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtractConfig({} → {}, registry={})",
            self.snapshot_dir.display(),
            self.output.display(),
            self.registry
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "ibm_fleet".to_string())
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
