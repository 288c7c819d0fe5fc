//! Dashboard account repository
//!
//! An explicit, independently owned in-memory repository of the accounts the
//! dashboard displays. It is handed to the presentation boundary rather than
//! shared as global state, and nothing in the transfer flow mutates it.

use rust_decimal::Decimal;

use crate::types::{Account, AccountKind};

/// Read-only collection of dashboard accounts
#[derive(Debug, Clone, Default)]
pub struct AccountRepository {
    accounts: Vec<Account>,
}

impl AccountRepository {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// The four sample accounts of the demo user
    pub fn demo() -> Self {
        Self::new(vec![
            Account {
                id: "1".to_string(),
                name: "Checking Balance".to_string(),
                kind: AccountKind::Checking,
                balance: Decimal::new(16384093, 2),
                account_number: Some("****2589".to_string()),
                limit: None,
            },
            Account {
                id: "2".to_string(),
                name: "Saving Plus Account".to_string(),
                kind: AccountKind::Savings,
                balance: Decimal::new(8814354, 2),
                account_number: Some("****7821".to_string()),
                limit: None,
            },
            Account {
                id: "3".to_string(),
                name: "Citi Master Card".to_string(),
                kind: AccountKind::Credit,
                balance: Decimal::new(7487, 2),
                account_number: Some("****4532".to_string()),
                limit: Some(Decimal::new(1270489, 2)),
            },
            Account {
                id: "4".to_string(),
                name: "Certificate of Deposit".to_string(),
                kind: AccountKind::Cd,
                balance: Decimal::new(21829892, 2),
                account_number: Some("****9104".to_string()),
                limit: None,
            },
        ])
    }

    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Net balance across all accounts (credit balances subtract)
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(Account::net_balance).sum()
    }
}
