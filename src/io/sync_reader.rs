//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over recorded transfer submissions from a CSV
//! file. Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<TransferRecord, String>` for each CSV row:
//!
//! ```no_run
//! use transfer_lockout_engine::core::AccountRepository;
//! use transfer_lockout_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("submissions.csv"), AccountRepository::demo()).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Replaying submission: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::core::AccountRepository;
use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LockoutError, TransferRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Every data row consumes one sequence number, including rows that fail to
/// parse, so sequence numbers always match the row position in the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    accounts: AccountRepository,
    seq: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    /// * `accounts` - Accounts submissions may originate from
    pub fn new(path: &Path, accounts: AccountRepository) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), LockoutError::from(e)))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            accounts,
            seq: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<TransferRecord, String>;

    /// Get the next submission from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(TransferRecord))` - Successfully parsed and validated row
    /// * `Some(Err(String))` - Parse or validation error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;

        self.seq += 1;
        let line = self.seq + 1;

        match next {
            Ok(csv_record) => Some(
                convert_csv_record(self.seq, csv_record, &self.accounts)
                    .map_err(|e| format!("Line {}: {}", line, e)),
            ),
            Err(e) => Some(Err(LockoutError::from(e).to_string())),
        }
    }
}
