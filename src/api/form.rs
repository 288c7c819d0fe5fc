//! Transfer form validation
//!
//! Raw form input arrives as strings. Validation happens here, before the
//! processor runs, so a rejected form never consumes an attempt.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::AccountRepository;
use crate::types::{LockoutError, TransferRequest};

/// Raw transfer form as submitted by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferForm {
    pub from_account_id: String,
    pub amount: String,
    pub recipient_name: String,
    pub recipient_bank: String,
    pub recipient_account: String,
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, LockoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LockoutError::missing_field(field));
    }
    Ok(value)
}

impl TransferForm {
    /// Check every field and build a transfer request
    ///
    /// # Errors
    ///
    /// `Validation` naming the first offending field:
    /// - any field blank
    /// - amount not a decimal number, or not greater than zero
    /// - source account not in `accounts`
    pub fn validate(&self, accounts: &AccountRepository) -> Result<TransferRequest, LockoutError> {
        let from_account_id = required("from_account_id", &self.from_account_id)?;
        if accounts.get(from_account_id).is_none() {
            return Err(LockoutError::validation(
                "from_account_id",
                format!("unknown source account '{}'", from_account_id),
            ));
        }

        let raw_amount = required("amount", &self.amount)?;
        let amount = Decimal::from_str(raw_amount).map_err(|_| {
            LockoutError::validation("amount", format!("'{}' is not a valid amount", raw_amount))
        })?;
        if amount <= Decimal::ZERO {
            return Err(LockoutError::validation(
                "amount",
                "must be greater than zero",
            ));
        }

        let recipient_name = required("recipient_name", &self.recipient_name)?;
        let recipient_bank = required("recipient_bank", &self.recipient_bank)?;
        let recipient_account = required("recipient_account", &self.recipient_account)?;

        Ok(TransferRequest {
            from_account_id: from_account_id.to_string(),
            amount,
            recipient_name: recipient_name.to_string(),
            recipient_bank: recipient_bank.to_string(),
            recipient_account: recipient_account.to_string(),
        })
    }
}
