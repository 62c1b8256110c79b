//! CLI entry point for the harvester.

use clap::Parser;
use ruscorpora_harvester::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::init_logging(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    // A log on stderr would print the error twice
    let log_to_file = cli.log.is_some();
    if let Err(e) = cli::run(cli) {
        if log_to_file {
            tracing::error!("{e}");
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
