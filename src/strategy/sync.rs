//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates replay by coordinating between
//! the SyncReader (for CSV input) and a TransactionProcessor over a
//! `MemorySessionStore`.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Attempt decisions to `TransactionProcessor` (business logic)
//! - CSV output to `csv_format::write_outcomes_csv` (format handling)

use crate::core::{AccountRepository, AttemptTracker, MemorySessionStore, TransactionProcessor};
use crate::io::csv_format::{write_outcomes_csv, OutcomeRow};
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{LockoutPolicy, TransferResult};
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use transfer_lockout_engine::core::AccountRepository;
/// use transfer_lockout_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use transfer_lockout_engine::types::LockoutPolicy;
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(LockoutPolicy::default(), AccountRepository::demo());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("submissions.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    policy: LockoutPolicy,
    accounts: AccountRepository,
}

impl SyncProcessingStrategy {
    pub fn new(policy: LockoutPolicy, accounts: AccountRepository) -> Self {
        Self { policy, accounts }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Replay submissions from input file and write outcomes to output
    ///
    /// 1. Creates a TransactionProcessor over an empty MemorySessionStore
    /// 2. Streams submissions from the CSV file with SyncReader
    /// 3. Processes each submission at its recorded timestamp (or now)
    /// 4. Writes outcome rows using csv_format::write_outcomes_csv
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let tracker = AttemptTracker::with_system_clock(MemorySessionStore::new(), self.policy);
        let processor = TransactionProcessor::new(tracker);

        let reader = SyncReader::new(input_path, self.accounts.clone())?;

        let mut rows = Vec::new();
        for result in reader {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping invalid submission");
                    continue;
                }
            };

            let now = record.timestamp.unwrap_or_else(|| processor.tracker().now());
            match processor.process_at(&record.session, &record.request, now) {
                Ok(outcome) => rows.push(OutcomeRow {
                    seq: record.seq,
                    session: record.session,
                    result: TransferResult::from(outcome),
                }),
                Err(e) => {
                    tracing::error!(seq = record.seq, session = %record.session, error = %e, "Transfer processing failed");
                }
            }
        }

        write_outcomes_csv(&rows, output)?;

        Ok(())
    }
}
