//! Trip Settle CLI
//!
//! Reads a trip snapshot (JSON) and prints a CSV report of balances,
//! settlements or trip totals.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- trip.json              # settlements
//! cargo run -- trip.json balances
//! cargo run -- trip.json summary
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use trip_settle::{Report, Result, SplitEngine, SplitError};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(SplitError::MissingArgument);
    }

    let report = match args.get(2) {
        Some(name) => name.parse::<Report>()?,
        None => Report::default(),
    };

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let engine = SplitEngine::from_json(BufReader::new(file))?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_report(report, handle)?;

    Ok(())
}
