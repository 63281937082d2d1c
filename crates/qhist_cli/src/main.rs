//! `qhist` binary entry point.

use clap::Parser;
use std::process::ExitCode;

use qhist_cli::cli::{Cli, Commands};
use qhist_cli::commands::{run_eras, run_extract};

fn main() -> ExitCode {
    let cli = Cli::parse();
    qhist_cli::init_logging(cli.verbose, cli.quiet);

    log::debug!("qhist {} starting", env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Extract(args) => run_extract(args).map(|_| ()),
        Commands::Eras(args) => run_eras(args),
    };

    ExitCode::from(qhist_cli::exit_status(&result))
}
