//! CSV format handling for transfer submissions and outcome output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to validated transfer records
//! - Outcome output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Write;

use crate::api::TransferForm;
use crate::core::AccountRepository;
use crate::types::{SessionId, TransferRecord, TransferResult};

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// `session,timestamp,from_account,amount,recipient_name,recipient_bank,recipient_account`.
/// Every column is optional at the parsing level; presence is checked during
/// conversion so that a missing field is reported as a validation error.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CsvRecord {
    pub session: Option<String>,
    pub timestamp: Option<String>,
    pub from_account: Option<String>,
    pub amount: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_bank: Option<String>,
    pub recipient_account: Option<String>,
}

/// Convert a CsvRecord to a TransferRecord
///
/// This function:
/// - Requires a non-blank session id
/// - Parses the optional RFC 3339 timestamp
/// - Validates the transfer fields the same way the dashboard form does
///
/// # Arguments
///
/// * `seq` - 1-based data row number of the record
/// * `csv_record` - The deserialized CSV record
/// * `accounts` - Accounts a transfer may originate from
pub fn convert_csv_record(
    seq: u64,
    csv_record: CsvRecord,
    accounts: &AccountRepository,
) -> Result<TransferRecord, String> {
    let session = csv_record.session.unwrap_or_default();
    let session = session.trim();
    if session.is_empty() {
        return Err(format!("Record {} has no session", seq));
    }

    let timestamp = match csv_record.timestamp {
        Some(raw) if !raw.trim().is_empty() => {
            let parsed = DateTime::parse_from_rfc3339(raw.trim())
                .map_err(|e| format!("Invalid timestamp '{}' for record {}: {}", raw, seq, e))?;
            Some(parsed.with_timezone(&Utc))
        }
        _ => None,
    };

    let form = TransferForm {
        from_account_id: csv_record.from_account.unwrap_or_default(),
        amount: csv_record.amount.unwrap_or_default(),
        recipient_name: csv_record.recipient_name.unwrap_or_default(),
        recipient_bank: csv_record.recipient_bank.unwrap_or_default(),
        recipient_account: csv_record.recipient_account.unwrap_or_default(),
    };

    let request = form
        .validate(accounts)
        .map_err(|e| format!("Record {} for session {}: {}", seq, session, e))?;

    Ok(TransferRecord {
        seq,
        session: SessionId::new(session),
        timestamp,
        request,
    })
}

/// One row of replay output
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRow {
    pub seq: u64,
    pub session: SessionId,
    pub result: TransferResult,
}

/// Write outcome rows to CSV format
///
/// Writes rows with columns: seq, session, success, blocked, error.
/// Rows are sorted by `seq` so that output order does not depend on the
/// processing strategy.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_outcomes_csv(rows: &[OutcomeRow], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["seq", "session", "success", "blocked", "error"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_rows = rows.to_vec();
    sorted_rows.sort_by_key(|row| row.seq);

    for row in sorted_rows {
        writer
            .write_record(&[
                row.seq.to_string(),
                row.session.to_string(),
                row.result.success.to_string(),
                row.result.blocked.unwrap_or(false).to_string(),
                row.result.error.clone().unwrap_or_default(),
            ])
            .map_err(|e| format!("Failed to write outcome record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
