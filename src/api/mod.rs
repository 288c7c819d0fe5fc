//! Presentation boundary
//!
//! The dashboard calls these actions. They are thin wrappers over the
//! processor that translate outcomes into the wire shapes the UI expects:
//!
//! - `check_status` → `{ blocked }`, used to show the restricted-account
//!   banner and to gate the transfer form
//! - `submit_transfer` → `{ success, error?, blocked? }`
//!
//! Storage failures come back as `Err(StorageUnavailable)`, never as a
//! blocked or retry result, so the UI can show an outage message instead.

mod form;

pub use form::TransferForm;

use crate::core::clock::SystemClock;
use crate::core::{AccountRepository, Clock, SessionStore, TransactionProcessor};
use crate::types::{
    AccountStatus, LockoutError, SessionId, TransferRequest, TransferResult,
};

/// Transfer actions exposed to the dashboard
#[derive(Debug, Clone)]
pub struct TransferActions<S, C = SystemClock> {
    processor: TransactionProcessor<S, C>,
    accounts: AccountRepository,
}

impl<S: SessionStore, C: Clock> TransferActions<S, C> {
    pub fn new(processor: TransactionProcessor<S, C>, accounts: AccountRepository) -> Self {
        Self {
            processor,
            accounts,
        }
    }

    pub fn processor(&self) -> &TransactionProcessor<S, C> {
        &self.processor
    }

    pub fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// Whether the session's transfers are currently blocked
    pub fn check_status(&self, session: &SessionId) -> Result<AccountStatus, LockoutError> {
        let blocked = self
            .processor
            .is_blocked(session)
            .inspect_err(|e| tracing::error!(session = %session, error = %e, "Status check failed"))?;
        Ok(AccountStatus { blocked })
    }

    /// Validate a submitted form and process it as one transfer attempt
    ///
    /// # Errors
    ///
    /// * `Validation` - the form is incomplete; no attempt is recorded
    /// * `StorageUnavailable` - the attempt counter could not be read or written
    pub fn submit_transfer(
        &self,
        session: &SessionId,
        form: &TransferForm,
    ) -> Result<TransferResult, LockoutError> {
        let request = form
            .validate(&self.accounts)
            .inspect_err(|e| tracing::info!(session = %session, error = %e, "Transfer form rejected"))?;
        self.submit_request(session, &request)
    }

    /// Process an already validated request
    pub fn submit_request(
        &self,
        session: &SessionId,
        request: &TransferRequest,
    ) -> Result<TransferResult, LockoutError> {
        let outcome = self
            .processor
            .process(session, request)
            .inspect_err(|e| tracing::error!(session = %session, error = %e, "Transfer processing failed"))?;
        Ok(TransferResult::from(outcome))
    }

    /// Clear the session's attempt counter (support-side unlock)
    pub fn reset_attempts(&self, session: &SessionId) -> Result<(), LockoutError> {
        self.processor.reset(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttemptTracker, MemorySessionStore, GENERIC_FAILURE_MESSAGE};
    use crate::types::LockoutPolicy;

    fn actions() -> TransferActions<MemorySessionStore> {
        let tracker =
            AttemptTracker::with_system_clock(MemorySessionStore::new(), LockoutPolicy::default());
        TransferActions::new(TransactionProcessor::new(tracker), AccountRepository::demo())
    }

    fn form() -> TransferForm {
        TransferForm {
            from_account_id: "1".to_string(),
            amount: "50".to_string(),
            recipient_name: "A".to_string(),
            recipient_bank: "B".to_string(),
            recipient_account: "999".to_string(),
        }
    }

    #[test]
    fn test_fresh_session_is_not_blocked() {
        let actions = actions();
        let status = actions.check_status(&SessionId::from("s1")).unwrap();
        assert_eq!(status, AccountStatus { blocked: false });
    }

    #[test]
    fn test_retry_then_block_then_status() {
        let actions = actions();
        let session = SessionId::from("s1");

        let first = actions.submit_transfer(&session, &form()).unwrap();
        assert_eq!(
            first,
            TransferResult {
                success: false,
                error: Some(GENERIC_FAILURE_MESSAGE.to_string()),
                blocked: None,
            }
        );

        let second = actions.submit_transfer(&session, &form()).unwrap();
        assert_eq!(
            second,
            TransferResult {
                success: false,
                error: None,
                blocked: Some(true),
            }
        );

        assert!(actions.check_status(&session).unwrap().blocked);
    }

    #[test]
    fn test_invalid_form_does_not_consume_attempt() {
        let actions = actions();
        let session = SessionId::from("s1");
        let mut incomplete = form();
        incomplete.recipient_bank.clear();

        let result = actions.submit_transfer(&session, &incomplete);

        assert!(matches!(result, Err(LockoutError::Validation { .. })));
        assert_eq!(
            actions
                .processor()
                .tracker()
                .get_attempt_count(&session)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_reset_attempts_unblocks() {
        let actions = actions();
        let session = SessionId::from("s1");

        actions.submit_transfer(&session, &form()).unwrap();
        actions.submit_transfer(&session, &form()).unwrap();
        actions.reset_attempts(&session).unwrap();

        assert!(!actions.check_status(&session).unwrap().blocked);
    }
}
