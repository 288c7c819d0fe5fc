//! Transfer-related types for the transfer lockout engine
//!
//! This module defines the transfer request submitted by the dashboard, the
//! outcome decided by the processor, and the wire shapes returned to the
//! presentation layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::session::SessionId;

/// A money-transfer request
///
/// Transient: never persisted. Field presence is checked by the form layer
/// before a request is built; the processor itself does not inspect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Reference of the account the money would leave
    pub from_account_id: String,

    /// Amount to transfer (positive)
    pub amount: Decimal,

    /// Name of the recipient
    pub recipient_name: String,

    /// Name of the recipient's bank
    pub recipient_bank: String,

    /// Recipient account reference
    pub recipient_account: String,
}

/// Result of processing one transfer attempt
///
/// Exactly one variant is produced per call. The current policy never
/// produces `Accepted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Transfer authorized
    Accepted,

    /// Soft failure; the user may retry
    RejectedRetryable {
        /// Generic user-facing message
        message: String,
    },

    /// The session is blocked for the rest of the validity window
    RejectedBlocked,
}

impl TransferOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, TransferOutcome::RejectedBlocked)
    }
}

/// Wire result of `submit_transfer`
///
/// Serializes as `{success, error?, blocked?}` with absent fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl From<TransferOutcome> for TransferResult {
    fn from(outcome: TransferOutcome) -> Self {
        match outcome {
            TransferOutcome::Accepted => TransferResult {
                success: true,
                error: None,
                blocked: None,
            },
            TransferOutcome::RejectedRetryable { message } => TransferResult {
                success: false,
                error: Some(message),
                blocked: None,
            },
            TransferOutcome::RejectedBlocked => TransferResult {
                success: false,
                error: None,
                blocked: Some(true),
            },
        }
    }
}

/// Wire result of `check_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub blocked: bool,
}

/// A transfer submission read from a replay file
///
/// Carries the data row number so that results can be put back in input
/// order after concurrent processing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    /// 1-based data row number in the input file
    pub seq: u64,

    /// Session the submission belongs to
    pub session: SessionId,

    /// Evaluation instant; `None` means "now"
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,

    /// The validated request
    pub request: TransferRequest,
}
