//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use qhist_core::output;
use qhist_extract::{ExtractConfig, SummaryFormat};
use std::path::PathBuf;

/// QHIST - per-qubit calibration history of IBM quantum processors
#[derive(Parser, Debug)]
#[command(
    name = "qhist",
    version,
    about = "Extract per-qubit T1, T2 and readout error across IBM processor eras",
    long_about = "Reads archived Qiskit backend-properties documents (props_<name>.json),\n\
                  groups processors into hardware eras, and writes one CSV row per\n\
                  physical qubit for downstream plotting."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the extraction and write the CSV
    Extract(ExtractArgs),

    /// Print the era registry
    Eras(ErasArgs),
}

/// Arguments for `extract`
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory with props_<name>.json documents
    #[arg(short, long, default_value = ".", env = "QHIST_SNAPSHOT_DIR")]
    pub snapshot_dir: PathBuf,

    /// CSV output path
    #[arg(
        short,
        long,
        default_value = output::DEFAULT_FILENAME,
        env = "QHIST_OUTPUT"
    )]
    pub output: PathBuf,

    /// JSON era registry replacing the built-in IBM fleet
    #[arg(short, long, env = "QHIST_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Summary printed to stdout after the run
    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryArg,
}

impl ExtractArgs {
    /// Convert into an [`ExtractConfig`]
    pub fn to_config(&self) -> ExtractConfig {
        let config = ExtractConfig::new(&self.snapshot_dir)
            .with_output(&self.output)
            .with_summary(self.summary.into());
        match self.registry {
            Some(ref path) => config.with_registry(path),
            None => config,
        }
    }
}

/// Arguments for `eras`
#[derive(Args, Debug, Clone)]
pub struct ErasArgs {
    /// JSON era registry replacing the built-in IBM fleet
    #[arg(short, long, env = "QHIST_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary format flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryArg {
    /// Console table
    Text,
    /// JSON document
    Json,
    /// Nothing
    None,
}

impl From<SummaryArg> for SummaryFormat {
    fn from(arg: SummaryArg) -> Self {
        match arg {
            SummaryArg::Text => SummaryFormat::Text,
            SummaryArg::Json => SummaryFormat::Json,
            SummaryArg::None => SummaryFormat::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_args() {
        let cli = Cli::parse_from([
            "qhist",
            "extract",
            "--snapshot-dir",
            "/props",
            "--output",
            "data/out.csv",
            "--summary",
            "json",
        ]);

        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        let config = args.to_config();
        assert_eq!(config.snapshot_dir, PathBuf::from("/props"));
        assert_eq!(config.output, PathBuf::from("data/out.csv"));
        assert_eq!(config.summary, SummaryFormat::Json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["qhist", "-q", "-v", "eras"]).is_err());
    }
}
