//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of recorded transfer submissions for the async
//! replay strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of TransferRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::core::AccountRepository;
use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::TransferRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Numbers rows exactly like `SyncReader`, so both strategies produce the
/// same sequence numbers for the same file.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    accounts: AccountRepository,
    seq: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    /// * `accounts` - Accounts submissions may originate from
    pub fn new(reader: R, accounts: AccountRepository) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            accounts,
            seq: 0,
        }
    }

    /// Read a batch of transfer records
    ///
    /// Reads up to `batch_size` valid records. Invalid rows are logged and
    /// skipped (they do not count towards the batch size).
    ///
    /// # Returns
    ///
    /// A vector of successfully converted records; empty at end of file.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<TransferRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let next = match records.next().await {
                Some(next) => next,
                None => break,
            };

            self.seq += 1;
            let line = self.seq + 1;

            match next {
                Ok(csv_record) => match convert_csv_record(self.seq, csv_record, &self.accounts) {
                    Ok(record) => batch.push(record),
                    Err(e) => tracing::warn!(line, error = %e, "Skipping invalid submission"),
                },
                Err(e) => tracing::warn!(line, error = %e, "Skipping unparsable row"),
            }
        }

        batch
    }
}
