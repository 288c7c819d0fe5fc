//! Failed transfer attempt tracking
//!
//! This module provides the `AttemptTracker`, which owns the per-session
//! failed-attempt counter and the blocked/not-blocked determination.
//!
//! The counter lives in the session storage boundary under
//! [`ATTEMPTS_KEY`]. The tracker never caches it: every call reads or writes
//! through the store, so several trackers sharing one store always agree.
//!
//! # Validity Window
//!
//! Every increment rewrites the counter with a fresh time-to-live (24 hours
//! by default). Once that window elapses without another increment, the
//! counter reads as zero again.
//!
//! # Failure Semantics
//!
//! Storage failures are returned as `LockoutError::StorageUnavailable`. A
//! session whose counter cannot be read is never reported as unblocked.

use chrono::{DateTime, Utc};

use crate::core::clock::SystemClock;
use crate::core::session_store::parse_count;
use crate::core::traits::{Clock, SessionStore};
use crate::types::{LockoutError, LockoutPolicy, LockoutState, SessionId};

/// Storage key of the attempt counter
pub const ATTEMPTS_KEY: &str = "transaction-attempts";

/// Per-session failed-attempt counter
///
/// Each operation comes in two forms: one evaluated at the tracker's clock,
/// and an `_at` form taking the evaluation instant explicitly (used when
/// replaying recorded submissions).
#[derive(Debug, Clone)]
pub struct AttemptTracker<S, C = SystemClock> {
    store: S,
    clock: C,
    policy: LockoutPolicy,
}

impl<S: SessionStore> AttemptTracker<S> {
    /// Create a tracker reading wall-clock time
    pub fn with_system_clock(store: S, policy: LockoutPolicy) -> Self {
        Self::new(store, SystemClock, policy)
    }
}

impl<S: SessionStore, C: Clock> AttemptTracker<S, C> {
    /// Create a new AttemptTracker
    ///
    /// # Arguments
    ///
    /// * `store` - Session storage boundary holding the counter
    /// * `clock` - Time source used by the non-`_at` operations
    /// * `policy` - Block threshold and validity window
    pub fn new(store: S, clock: C, policy: LockoutPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current instant according to the tracker's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Read the current attempt count
    ///
    /// Returns 0 if no counter exists or its validity window has elapsed.
    pub fn get_attempt_count(&self, session: &SessionId) -> Result<u32, LockoutError> {
        self.get_attempt_count_at(session, self.clock.now())
    }

    pub fn get_attempt_count_at(
        &self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<u32, LockoutError> {
        match self.store.get(session, ATTEMPTS_KEY, now)? {
            Some(raw) => parse_count(session, ATTEMPTS_KEY, &raw),
            None => Ok(0),
        }
    }

    /// Add one to the counter and refresh its validity window
    ///
    /// # Returns
    ///
    /// The new count (always at least 1)
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` if the store fails or holds a corrupt counter
    pub fn increment_attempt_count(&self, session: &SessionId) -> Result<u32, LockoutError> {
        self.increment_attempt_count_at(session, self.clock.now())
    }

    pub fn increment_attempt_count_at(
        &self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<u32, LockoutError> {
        let count = self
            .store
            .increment(session, ATTEMPTS_KEY, self.policy.attempt_ttl, now)?;

        tracing::debug!(
            session = %session,
            attempt_count = count,
            ttl_seconds = self.policy.attempt_ttl.num_seconds(),
            "Transfer attempt recorded"
        );

        Ok(count)
    }

    /// Whether the session has reached the block threshold
    pub fn is_blocked(&self, session: &SessionId) -> Result<bool, LockoutError> {
        self.is_blocked_at(session, self.clock.now())
    }

    pub fn is_blocked_at(
        &self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<bool, LockoutError> {
        Ok(self.get_attempt_count_at(session, now)? >= self.policy.block_threshold)
    }

    /// Position of the session in the lockout state machine
    pub fn state(&self, session: &SessionId) -> Result<LockoutState, LockoutError> {
        self.state_at(session, self.clock.now())
    }

    pub fn state_at(
        &self,
        session: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<LockoutState, LockoutError> {
        let count = self.get_attempt_count_at(session, now)?;
        Ok(LockoutState::from_count(count, &self.policy))
    }

    /// Delete the counter, returning the session to the open state
    pub fn reset(&self, session: &SessionId) -> Result<(), LockoutError> {
        self.store.delete(session, ATTEMPTS_KEY)?;
        tracing::info!(session = %session, "Transfer attempts reset");
        Ok(())
    }
}
