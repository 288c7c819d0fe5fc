//! Batch processing with session-based partitioning for concurrent replay
//!
//! This module provides the `BatchProcessor` struct, which runs batches of
//! recorded transfer submissions through a shared [`TransactionProcessor`].
//!
//! # Design
//!
//! Each batch is partitioned by session. Sessions are processed concurrently
//! on tokio tasks; the submissions of one session are processed sequentially
//! in input order, because each attempt's outcome depends on the previous one.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<TransactionProcessor<S>>  (shared attempt processor)
//!             └── AttemptTracker<S>     (S: thread-safe SessionStore)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::processor::TransactionProcessor;
use crate::core::traits::SessionStore;
use crate::types::{LockoutError, SessionId, TransferOutcome, TransferRecord};

/// Result of processing a single recorded submission
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The submission that was processed
    pub record: TransferRecord,

    /// The outcome, or the storage error that prevented one
    pub result: Result<TransferOutcome, LockoutError>,
}

/// Batch processor with session-based partitioning
#[derive(Debug)]
pub struct BatchProcessor<S> {
    /// Shared transfer processor
    ///
    /// Wrapped in Arc to enable sharing across async tasks.
    processor: Arc<TransactionProcessor<S>>,
}

impl<S> Clone for BatchProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}

impl<S: SessionStore + 'static> BatchProcessor<S> {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `processor` - Arc-wrapped TransactionProcessor over a thread-safe store
    pub fn new(processor: Arc<TransactionProcessor<S>>) -> Self {
        Self { processor }
    }

    /// Partition a batch of submissions by session
    ///
    /// # Guarantees
    ///
    /// - Each submission appears in exactly one sub-batch
    /// - Submissions for each session keep their original order
    pub fn partition_by_session(
        &self,
        batch: Vec<TransferRecord>,
    ) -> HashMap<SessionId, Vec<TransferRecord>> {
        let mut session_batches: HashMap<SessionId, Vec<TransferRecord>> = HashMap::new();

        for record in batch {
            session_batches
                .entry(record.session.clone())
                .or_default()
                .push(record);
        }

        session_batches
    }

    /// Process all submissions of a single session sequentially
    ///
    /// Errors are captured in the results and don't stop processing of the
    /// remaining submissions.
    pub async fn process_session_submissions(
        &self,
        records: Vec<TransferRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let now = record
                .timestamp
                .unwrap_or_else(|| self.processor.tracker().now());
            let result = self
                .processor
                .process_at(&record.session, &record.request, now);
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch of submissions with session-based partitioning
    ///
    /// # Returns
    ///
    /// One `ProcessingResult` per submission. Results may be in a different
    /// order than the input; callers reorder by `record.seq`.
    pub async fn process_batch(&self, batch: Vec<TransferRecord>) -> Vec<ProcessingResult> {
        let session_batches = self.partition_by_session(batch);

        let mut tasks = Vec::with_capacity(session_batches.len());
        for (_session, records) in session_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_session_submissions(records).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(session_results) => results.extend(session_results),
                Err(e) => {
                    tracing::error!(error = %e, "Session task panicked");
                }
            }
        }

        results
    }
}
