//! rowmerge CLI
//!
//! Merges related rows of a flattened CSV export so that each root record and
//! everything it links to ends up on a single row.

mod logging;

use clap::Parser;
use rowmerge_core::{transform_csv, CsvOptions, TracingObserver};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowmerge")]
#[command(about = "Merge related rows in CSV files exported with linked *.id / *.@id columns", long_about = None)]
#[command(version)]
struct Cli {
    /// The CSV file to process
    input: PathBuf,

    /// Filename where the output CSV will be written
    output: PathBuf,
}

fn main() {
    logging::init_logging(tracing::Level::INFO);

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> rowmerge_core::Result<()> {
    let merged = transform_csv(
        &cli.input,
        &cli.output,
        &CsvOptions::default(),
        &mut TracingObserver,
    )?;

    tracing::debug!(
        rows = merged.row_count(),
        output = %cli.output.display(),
        "wrote merged table"
    );

    Ok(())
}
