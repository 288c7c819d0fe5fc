//! Transfer attempt processing
//!
//! This module provides the `TransactionProcessor` that decides the outcome of
//! one transfer attempt and drives the attempt counter.
//!
//! The processor enforces a fixed business rule of this dashboard: a transfer
//! is never authorized. The first attempt in a validity window receives a
//! generic failure message, and the attempt that reaches the block threshold
//! blocks the session. Blocked sessions are rejected without touching the
//! counter again.
//!
//! ```text
//!  Open ──process──▶ WarnedOnce ──process──▶ Blocked ──process──▶ Blocked
//!  (0)                 (1)                    (2)                (2, unchanged)
//! ```

use chrono::{DateTime, Utc};

use crate::core::attempt_tracker::AttemptTracker;
use crate::core::clock::SystemClock;
use crate::core::traits::{Clock, SessionStore};
use crate::types::{LockoutError, SessionId, TransferOutcome, TransferRequest};

/// Message returned for a retryable rejection
///
/// Deliberately reads like a transient failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Transaction failed. Unable to process your request at this time. Please verify your details and try again.";

/// Transfer attempt processor
///
/// Stateless apart from the tracker it drives; all per-session state lives in
/// the tracker's store.
#[derive(Debug, Clone)]
pub struct TransactionProcessor<S, C = SystemClock> {
    tracker: AttemptTracker<S, C>,
}

impl<S: SessionStore, C: Clock> TransactionProcessor<S, C> {
    /// Create a new TransactionProcessor driving `tracker`
    pub fn new(tracker: AttemptTracker<S, C>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &AttemptTracker<S, C> {
        &self.tracker
    }

    /// Process a single transfer attempt at the tracker's clock
    ///
    /// # Returns
    ///
    /// * `Ok(TransferOutcome::RejectedRetryable)` - attempt recorded, below the threshold
    /// * `Ok(TransferOutcome::RejectedBlocked)` - the session is or just became blocked
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` from the tracker, unchanged
    pub fn process(
        &self,
        session: &SessionId,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, LockoutError> {
        self.process_at(session, request, self.tracker.now())
    }

    /// Process a single transfer attempt evaluated at `now`
    pub fn process_at(
        &self,
        session: &SessionId,
        request: &TransferRequest,
        now: DateTime<Utc>,
    ) -> Result<TransferOutcome, LockoutError> {
        tracing::debug!(
            session = %session,
            from_account = %request.from_account_id,
            amount = %request.amount,
            recipient_bank = %request.recipient_bank,
            "Processing transfer attempt"
        );

        // Already blocked sessions must not keep incrementing
        if self.tracker.is_blocked_at(session, now)? {
            tracing::info!(session = %session, "Transfer rejected: session already blocked");
            return Ok(TransferOutcome::RejectedBlocked);
        }

        let attempt_count = self.tracker.increment_attempt_count_at(session, now)?;

        if attempt_count >= self.tracker.policy().block_threshold {
            tracing::warn!(
                session = %session,
                attempt_count,
                "Transfer rejected: block threshold reached, session blocked"
            );
            Ok(TransferOutcome::RejectedBlocked)
        } else {
            tracing::info!(
                session = %session,
                attempt_count,
                "Transfer rejected: retryable failure"
            );
            Ok(TransferOutcome::RejectedRetryable {
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            })
        }
    }

    /// Whether the session is currently blocked
    pub fn is_blocked(&self, session: &SessionId) -> Result<bool, LockoutError> {
        self.tracker.is_blocked(session)
    }

    /// Clear the session's attempt counter
    pub fn reset(&self, session: &SessionId) -> Result<(), LockoutError> {
        self.tracker.reset(session)
    }
}
