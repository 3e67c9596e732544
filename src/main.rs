//! Ledger Engine CLI
//!
//! Command-line interface for replaying bookkeeping operations from a CSV
//! file and emitting a report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > summary.csv
//! cargo run -- --report obligations operations.csv > obligations.csv
//! cargo run -- --report cash --from 2025-06-01 --to 2025-06-30 operations.csv
//! ```
//!
//! The program replays every operation from the input file through the
//! ledger engine, then writes the requested report as CSV to stdout.
//! Per-row failures are logged at warn level and skipped; set `RUST_LOG`
//! (e.g. `RUST_LOG=rust_ledger_engine=debug`) to see per-operation detail.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad arguments, file not found, output failure)

use rust_ledger_engine::cli;
use rust_ledger_engine::core::LedgerEngine;
use rust_ledger_engine::replay;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let range = match args.date_range() {
        Ok(range) => range,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let engine = LedgerEngine::new();
    let outcome = match replay::replay(&args.input_file, &engine) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    tracing::info!(
        applied = outcome.applied,
        rejected = outcome.rejected,
        "replay finished"
    );

    let report = engine.report(args.report, range);
    let mut output = std::io::stdout();
    if let Err(e) = report.write_csv(&mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
