//! Command implementations.

use anyhow::{Context, Result};
use qhist_extract::{CsvWriter, EraRegistry, Extraction, Pipeline, Reporter, RunSummary};
use std::path::Path;

use crate::cli::{ErasArgs, ExtractArgs};

/// Execute the `extract` command
pub fn run_extract(args: &ExtractArgs) -> Result<Extraction> {
    let config = args.to_config();
    log::info!("{}", config);

    let pipeline = Pipeline::from_config(&config).context("Invalid extraction settings")?;
    let writer = CsvWriter::new(&config.output);

    let extraction = pipeline
        .run(&writer)
        .with_context(|| format!("Extraction to {} failed", config.output.display()))?;

    let report = Reporter::report(&RunSummary::from_extraction(&extraction), config.summary);
    if !report.is_empty() {
        println!("{}", report);
    }

    log::info!(
        "Saved {} qubit rows ({} snapshots, {} skipped) to {}",
        extraction.row_count(),
        extraction.loaded.len(),
        extraction.skipped.len(),
        config.output.display()
    );

    Ok(extraction)
}

/// Execute the `eras` command
pub fn run_eras(args: &ErasArgs) -> Result<()> {
    let registry = load_registry(args.registry.as_deref())?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&registry).context("Failed to serialize registry")?;
        println!("{}", json);
        return Ok(());
    }

    for era in registry.eras() {
        println!("{}", era);
        for name in &era.snapshot_names {
            println!("  - {}", name);
        }
    }
    Ok(())
}

fn load_registry(path: Option<&Path>) -> Result<EraRegistry> {
    match path {
        Some(path) => EraRegistry::from_file(path)
            .with_context(|| format!("Failed to load registry from {}", path.display())),
        None => Ok(EraRegistry::ibm_fleet()),
    }
}
