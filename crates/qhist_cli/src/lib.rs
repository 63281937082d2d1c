//! # QHIST CLI
//!
//! Command-line front end for the quantum hardware history extractor.
//!
//! ```bash
//! qhist extract --snapshot-dir site-packages/qiskit_ibm_runtime/fake_provider/backends
//! qhist eras --json
//! ```

#![warn(missing_docs)]

/// Argument definitions
pub mod cli;

/// Command implementations
pub mod commands;

use log::LevelFilter;

/// Process exit status for a command result.
///
/// A failure is reported once through the logger, which `-q` still shows.
pub fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{:#}", e);
            1
        }
    }
}

/// Initialize `env_logger`; `RUST_LOG` overrides the flag-derived level
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // a second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);

        let failed: anyhow::Result<()> =
            Err(anyhow::anyhow!("disk full").context("Extraction to out.csv failed"));
        assert_eq!(exit_status(&failed), 1);
    }
}
