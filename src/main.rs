//! Transfer Lockout CLI
//!
//! Command-line interface for replaying recorded transfer submissions.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- submissions.csv > outcomes.csv
//! cargo run -- --strategy sync submissions.csv > outcomes.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 submissions.csv > outcomes.csv
//! cargo run -- --block-threshold 3 --ttl-hours 1 submissions.csv > outcomes.csv
//! ```
//!
//! The program reads submissions from the input CSV file, runs each one through
//! the transaction processor with a fresh session store, and writes one outcome
//! row per submission to stdout. Logs go to stderr and are filtered with
//! `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use transfer_lockout_engine::cli;
use transfer_lockout_engine::strategy;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.to_policy())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
