//! Transfer Lockout Engine Library
//! # Overview
//!
//! This library provides the money-transfer attempt lockout of a demo banking
//! dashboard: every processed transfer attempt is rejected, and after enough
//! attempts within the counter's lifetime the session is blocked.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (SessionId, TransferRequest, TransferResult, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::attempt_tracker`] - Per-session attempt counter with expiry
//!   - [`core::processor`] - Transfer decision (retry or block)
//!   - [`core::session_store`] - Session-scoped key/value storage with TTL
//!   - [`core::auth`] - Demo login and session marker
//!   - [`core::accounts`] - Static demo accounts
//! - [`api`] - Server actions backing the transfer page (form validation, status checks)
//! - [`io`] - CSV handling for replaying recorded submissions
//! - [`strategy`] - Sync and async replay pipelines
//!
//! # Outcomes
//!
//! For a fresh session with the default policy:
//!
//! - **First attempt**: rejected with a generic retry message
//! - **Second attempt**: rejected and the session becomes blocked
//! - **Any later attempt**: rejected as blocked without touching the counter
//!
//! The counter expires 24 hours after the last attempt, which unblocks the session.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use transfer_lockout_engine::core::{AttemptTracker, MemorySessionStore, TransactionProcessor};
//! use transfer_lockout_engine::types::{LockoutPolicy, SessionId, TransferOutcome, TransferRequest};
//!
//! let tracker = AttemptTracker::with_system_clock(MemorySessionStore::new(), LockoutPolicy::default());
//! let processor = TransactionProcessor::new(tracker);
//! let session = SessionId::from("browser-1");
//! let request = TransferRequest {
//!     from_account_id: "1".to_string(),
//!     amount: Decimal::new(5000, 2),
//!     recipient_name: "Jane Doe".to_string(),
//!     recipient_bank: "Chase".to_string(),
//!     recipient_account: "123456789".to_string(),
//! };
//!
//! assert!(!processor.process(&session, &request).unwrap().is_blocked());
//! assert_eq!(processor.process(&session, &request).unwrap(), TransferOutcome::RejectedBlocked);
//! ```

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use api::{TransferActions, TransferForm};
pub use core::{AttemptTracker, MemorySessionStore, TransactionProcessor};
pub use io::write_outcomes_csv;
pub use types::{
    LockoutError, LockoutPolicy, SessionId, TransferOutcome, TransferRequest, TransferResult,
};
