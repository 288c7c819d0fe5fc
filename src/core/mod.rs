//! Core business logic module
//!
//! This module contains the transfer lockout components:
//! - `traits` - Storage and clock abstractions
//! - `clock` - System and manual clocks
//! - `session_store` - Single-process session storage
//! - `attempt_tracker` - Per-session failed-attempt counter
//! - `processor` - Transfer attempt state machine
//! - `auth` - Demo authentication marker
//! - `accounts` - Dashboard account repository
//! - `async` - Concurrent store and batch processing

pub mod accounts;
pub mod r#async;
pub mod attempt_tracker;
pub mod auth;
pub mod clock;
pub mod processor;
pub mod session_store;
pub mod traits;

pub use accounts::AccountRepository;
pub use attempt_tracker::{AttemptTracker, ATTEMPTS_KEY};
pub use auth::{AuthService, AUTH_KEY};
pub use clock::{ManualClock, SystemClock};
pub use processor::{TransactionProcessor, GENERIC_FAILURE_MESSAGE};
pub use r#async::{BatchProcessor, ConcurrentSessionStore};
pub use session_store::MemorySessionStore;
pub use traits::{Clock, SessionStore};
