//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. Submissions are read in batches and each batch is
//! processed with session-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (session partitioning + tokio tasks)
//!         └── TransactionProcessor
//!             └── AttemptTracker → Arc<ConcurrentSessionStore>
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so a session's submissions keep
//!   their order even when they span batches
//! - Within a batch, different sessions run in parallel
//! - Output rows are sorted by sequence number, matching the sync strategy

use crate::core::r#async::{BatchProcessor, ConcurrentSessionStore};
use crate::core::{AccountRepository, AttemptTracker, TransactionProcessor};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::{write_outcomes_csv, OutcomeRow};
use crate::strategy::ProcessingStrategy;
use crate::types::{LockoutPolicy, TransferResult};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of submissions per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                fallback = default.batch_size,
                "Invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                max_concurrent_batches,
                fallback = default.max_concurrent_batches,
                "Invalid max concurrent batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// AsyncProcessingStrategy is Send + Sync and uses thread-safe components
/// internally (DashMap-backed session store shared through Arc).
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    policy: LockoutPolicy,
    accounts: AccountRepository,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, policy: LockoutPolicy, accounts: AccountRepository) -> Self {
        Self {
            config,
            policy,
            accounts,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Replay submissions from input file and write outcomes to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Creates a TransactionProcessor over a ConcurrentSessionStore
    /// 3. Reads submissions in batches with AsyncReader
    /// 4. Processes each batch to completion before reading the next
    /// 5. Writes outcome rows using csv_format::write_outcomes_csv
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let store = Arc::new(ConcurrentSessionStore::new());
            let tracker = AttemptTracker::with_system_clock(Arc::clone(&store), self.policy);
            let processor = BatchProcessor::new(Arc::new(TransactionProcessor::new(tracker)));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let mut reader = AsyncReader::new(compat_file, self.accounts.clone());

            let mut rows = Vec::new();
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for processed in processor.process_batch(batch).await {
                    match processed.result {
                        Ok(outcome) => rows.push(OutcomeRow {
                            seq: processed.record.seq,
                            session: processed.record.session,
                            result: TransferResult::from(outcome),
                        }),
                        Err(e) => {
                            tracing::error!(
                                seq = processed.record.seq,
                                session = %processed.record.session,
                                error = %e,
                                "Transfer processing failed"
                            );
                        }
                    }
                }
            }

            tracing::debug!(
                submissions = rows.len(),
                stored_values = store.len(),
                "Replay finished"
            );

            write_outcomes_csv(&rows, output)?;

            Ok(())
        })
    }
}
