//! Exports transactions as CSV.

use std::io::Write;

use serde::Serialize;

use crate::{Error, transaction::Transaction};

/// One CSV row.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: &'a str,
    vendor: &'a str,
    category: &'a str,
    amount: String,
    status: String,
}

/// Write `transactions` as CSV with a header row to `writer`.
///
/// Amounts are written with two decimal places and no currency symbol.
///
/// # Errors
/// Returns an [Error::CsvExportError] if a row cannot be written.
pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for transaction in transactions {
        csv_writer.serialize(CsvRow {
            date: &transaction.date,
            vendor: &transaction.vendor,
            category: &transaction.category,
            amount: format!("{:.2}", transaction.amount),
            status: transaction.status.to_string(),
        })?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::CsvExportError(error.to_string()))
}

/// Render `transactions` as a CSV string.
///
/// # Errors
/// Returns an [Error::CsvExportError] if a row cannot be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut buffer = Vec::new();
    write_transactions_csv(transactions, &mut buffer)?;

    String::from_utf8(buffer).map_err(|error| Error::CsvExportError(error.to_string()))
}
