//! Dashboard account and user types
//!
//! These are fixture records shown by the dashboard. They are never mutated
//! by the transfer flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of a dashboard account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    /// Credit card; the balance is money owed
    Credit,
    /// Certificate of deposit
    Cd,
}

/// A bank account as displayed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account reference used by the transfer form
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(rename = "type")]
    pub kind: AccountKind,

    /// Current balance
    ///
    /// For credit accounts this is the outstanding amount owed.
    pub balance: Decimal,

    /// Masked account number (e.g. `****2589`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Credit limit, only set for credit accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
}

impl Account {
    /// Contribution of this account to the net total balance
    ///
    /// Credit balances are debts and count negatively.
    pub fn net_balance(&self) -> Decimal {
        match self.kind {
            AccountKind::Credit => -self.balance,
            _ => self.balance,
        }
    }
}

/// The signed-in dashboard user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}
