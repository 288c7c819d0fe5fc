//! Dashboard flow integration tests
//!
//! Drives the transfer actions the way the dashboard does: sign in, check
//! status, submit the form, and observe the restricted-account state.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use std::sync::Arc;
use transfer_lockout_engine::core::{
    AccountRepository, AttemptTracker, AuthService, ManualClock, MemorySessionStore,
    SessionStore, TransactionProcessor, GENERIC_FAILURE_MESSAGE,
};
use transfer_lockout_engine::types::{AccountStatus, LockoutError, LockoutPolicy, SessionId};
use transfer_lockout_engine::{TransferActions, TransferForm};

type Actions = TransferActions<Arc<MemorySessionStore>, Arc<ManualClock>>;

struct Dashboard {
    store: Arc<MemorySessionStore>,
    clock: Arc<ManualClock>,
    auth: AuthService<Arc<MemorySessionStore>, Arc<ManualClock>>,
    actions: Actions,
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
}

#[fixture]
fn dashboard() -> Dashboard {
    let store = Arc::new(MemorySessionStore::new());
    let clock = Arc::new(ManualClock::new(start()));
    let tracker = AttemptTracker::new(
        Arc::clone(&store),
        Arc::clone(&clock),
        LockoutPolicy::default(),
    );
    Dashboard {
        auth: AuthService::new(Arc::clone(&store), Arc::clone(&clock)),
        actions: TransferActions::new(TransactionProcessor::new(tracker), AccountRepository::demo()),
        store,
        clock,
    }
}

fn form() -> TransferForm {
    TransferForm {
        from_account_id: "1".to_string(),
        amount: "250.00".to_string(),
        recipient_name: "Jane Doe".to_string(),
        recipient_bank: "Chase".to_string(),
        recipient_account: "123456789".to_string(),
    }
}

#[rstest]
fn test_signed_in_user_is_blocked_on_second_attempt(dashboard: Dashboard) {
    let session = SessionId::from("browser-1");
    dashboard
        .auth
        .login(&session, "james.ashley@citibank.com", "secret")
        .unwrap();
    assert!(dashboard.auth.current_user(&session).unwrap().is_some());

    assert_eq!(
        dashboard.actions.check_status(&session).unwrap(),
        AccountStatus { blocked: false }
    );

    let first = dashboard.actions.submit_transfer(&session, &form()).unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::json!({ "success": false, "error": GENERIC_FAILURE_MESSAGE })
    );

    let second = dashboard.actions.submit_transfer(&session, &form()).unwrap();
    assert_eq!(
        serde_json::to_value(&second).unwrap(),
        serde_json::json!({ "success": false, "blocked": true })
    );

    assert_eq!(
        serde_json::to_value(dashboard.actions.check_status(&session).unwrap()).unwrap(),
        serde_json::json!({ "blocked": true })
    );
}

#[rstest]
fn test_block_lifts_after_validity_window(dashboard: Dashboard) {
    let session = SessionId::from("browser-1");
    dashboard.actions.submit_transfer(&session, &form()).unwrap();
    dashboard.actions.submit_transfer(&session, &form()).unwrap();

    dashboard.clock.advance(Duration::hours(24) - Duration::seconds(1));
    assert!(dashboard.actions.check_status(&session).unwrap().blocked);

    dashboard.clock.advance(Duration::seconds(1));
    assert!(!dashboard.actions.check_status(&session).unwrap().blocked);

    let retry = dashboard.actions.submit_transfer(&session, &form()).unwrap();
    assert_eq!(retry.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(retry.blocked, None);
}

#[rstest]
fn test_logout_does_not_clear_attempts(dashboard: Dashboard) {
    let session = SessionId::from("browser-1");
    dashboard.auth.login(&session, "james.ashley@citibank.com", "secret").unwrap();
    dashboard.actions.submit_transfer(&session, &form()).unwrap();
    dashboard.actions.submit_transfer(&session, &form()).unwrap();

    dashboard.auth.logout(&session).unwrap();
    assert!(dashboard.auth.current_user(&session).unwrap().is_none());
    assert!(dashboard.actions.check_status(&session).unwrap().blocked);
}

#[rstest]
fn test_invalid_form_does_not_consume_attempt(dashboard: Dashboard) {
    let session = SessionId::from("browser-1");
    let mut incomplete = form();
    incomplete.recipient_account = "   ".to_string();

    let err = dashboard
        .actions
        .submit_transfer(&session, &incomplete)
        .unwrap_err();
    assert!(matches!(err, LockoutError::Validation { .. }));

    let first = dashboard.actions.submit_transfer(&session, &form()).unwrap();
    assert_eq!(first.blocked, None);
}

#[rstest]
fn test_sessions_are_independent(dashboard: Dashboard) {
    let blocked = SessionId::from("browser-1");
    let other = SessionId::from("browser-2");
    dashboard.actions.submit_transfer(&blocked, &form()).unwrap();
    dashboard.actions.submit_transfer(&blocked, &form()).unwrap();

    assert!(dashboard.actions.check_status(&blocked).unwrap().blocked);
    assert!(!dashboard.actions.check_status(&other).unwrap().blocked);
    assert_eq!(dashboard.store.len().unwrap(), 1);
}

#[rstest]
fn test_reset_attempts_unblocks_session(dashboard: Dashboard) {
    let session = SessionId::from("browser-1");
    dashboard.actions.submit_transfer(&session, &form()).unwrap();
    dashboard.actions.submit_transfer(&session, &form()).unwrap();

    dashboard.actions.reset_attempts(&session).unwrap();

    assert!(!dashboard.actions.check_status(&session).unwrap().blocked);
}

/// Store whose backend is always down
struct OfflineStore;

impl SessionStore for OfflineStore {
    fn get(
        &self,
        _session: &SessionId,
        _key: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<String>, LockoutError> {
        Err(LockoutError::storage_unavailable("backend offline"))
    }

    fn set(
        &self,
        _session: &SessionId,
        _key: &str,
        _value: String,
        _ttl: Duration,
        _now: DateTime<Utc>,
    ) -> Result<(), LockoutError> {
        Err(LockoutError::storage_unavailable("backend offline"))
    }

    fn delete(&self, _session: &SessionId, _key: &str) -> Result<(), LockoutError> {
        Err(LockoutError::storage_unavailable("backend offline"))
    }

    fn increment(
        &self,
        _session: &SessionId,
        _key: &str,
        _ttl: Duration,
        _now: DateTime<Utc>,
    ) -> Result<u32, LockoutError> {
        Err(LockoutError::storage_unavailable("backend offline"))
    }
}

#[test]
fn test_storage_outage_surfaces_as_error() {
    let tracker = AttemptTracker::new(OfflineStore, ManualClock::new(start()), LockoutPolicy::default());
    let actions = TransferActions::new(TransactionProcessor::new(tracker), AccountRepository::demo());
    let session = SessionId::from("browser-1");

    let status = actions.check_status(&session).unwrap_err();
    assert!(status.is_storage_failure());

    let submit = actions.submit_transfer(&session, &form()).unwrap_err();
    assert!(submit.is_storage_failure());
}
