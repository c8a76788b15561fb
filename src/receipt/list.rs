//! Joins receipts with their transactions for listing, searching and filtering.

use time::Date;

use crate::{
    Error,
    receipt::{Receipt, get_all_receipts},
    store::RecordStore,
    transaction::{Transaction, TransactionStatus, get_all_transactions, parse_date},
};

/// A receipt together with the fields of its transaction.
///
/// When the transaction is missing, the text fields are empty, the amount is
/// zero and the status is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRow {
    /// The receipt.
    pub receipt: Receipt,
    /// The transaction's vendor.
    pub vendor: String,
    /// The transaction's amount.
    pub amount: f64,
    /// The transaction's category name.
    pub category: String,
    /// The transaction's date, as stored.
    pub date: String,
    /// The transaction's status.
    pub status: Option<TransactionStatus>,
}

impl ReceiptRow {
    /// Join `receipt` with its transaction in `transactions`.
    pub fn join(receipt: Receipt, transactions: &[Transaction]) -> Self {
        match transactions
            .iter()
            .find(|transaction| transaction.id == receipt.transaction_id)
        {
            Some(transaction) => Self {
                vendor: transaction.vendor.clone(),
                amount: transaction.amount,
                category: transaction.category.clone(),
                date: transaction.date.clone(),
                status: Some(transaction.status),
                receipt,
            },
            None => Self {
                receipt,
                vendor: String::new(),
                amount: 0.0,
                category: String::new(),
                date: String::new(),
                status: None,
            },
        }
    }
}

/// Retrieve every receipt joined with its transaction, in receipt order.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn receipt_rows(store: &impl RecordStore) -> Result<Vec<ReceiptRow>, Error> {
    let transactions = get_all_transactions(store)?;

    Ok(get_all_receipts(store)?
        .into_iter()
        .map(|receipt| ReceiptRow::join(receipt, &transactions))
        .collect())
}

/// Criteria for narrowing down a list of [ReceiptRow]s.
///
/// Every criterion that is set must match. The default filter matches all rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptFilter {
    /// Text to look for, ignoring case, in the vendor or category, or in the
    /// amount written as a plain number (e.g. "5.5").
    pub search: Option<String>,
    /// The earliest date to include.
    pub from: Option<Date>,
    /// The latest date to include.
    pub to: Option<Date>,
    /// The exact category name to include.
    pub category: Option<String>,
}

impl ReceiptFilter {
    /// Whether `row` meets every criterion of the filter.
    pub fn matches(&self, row: &ReceiptRow) -> bool {
        self.matches_search(row) && self.matches_dates(row) && self.matches_category(row)
    }

    fn matches_search(&self, row: &ReceiptRow) -> bool {
        let Some(search) = self.search.as_deref().filter(|search| !search.is_empty()) else {
            return true;
        };

        let needle = search.to_lowercase();

        row.vendor.to_lowercase().contains(&needle)
            || row.category.to_lowercase().contains(&needle)
            || row.amount.to_string().contains(search)
    }

    fn matches_dates(&self, row: &ReceiptRow) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        let Some(date) = parse_date(&row.date) else {
            return false;
        };

        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    fn matches_category(&self, row: &ReceiptRow) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| row.category == category)
    }
}

/// Keep the rows that match `filter`, preserving their order.
pub fn filter_receipt_rows(rows: Vec<ReceiptRow>, filter: &ReceiptFilter) -> Vec<ReceiptRow> {
    rows.into_iter().filter(|row| filter.matches(row)).collect()
}

#[cfg(test)]
mod receipt_list_tests {
    use time::macros::date;

    use crate::{
        RecordId,
        receipt::{Receipt, ReceiptFilter, ReceiptRow, add_receipt, filter_receipt_rows, receipt_rows},
        store::MemoryStore,
        transaction::{Transaction, add_transaction},
    };

    fn row(vendor: &str, amount: f64, category: &str, date: &str) -> ReceiptRow {
        let transaction = Transaction::new(vendor, amount, category, date);
        let receipt = Receipt::new(transaction.id.clone(), "file.jpg");

        ReceiptRow::join(receipt, &[transaction])
    }

    fn sample_rows() -> Vec<ReceiptRow> {
        vec![
            row("Starbucks", 5.75, "Dining", "2023-10-26"),
            row("Amazon", 42.99, "Shopping", "2023-10-20"),
            row("Trader Joe's", 88.14, "Groceries", "Oct 12, 2023"),
            row("United Airlines", 345.0, "Travel", "2023-09-30"),
        ]
    }

    fn vendors(rows: &[ReceiptRow]) -> Vec<&str> {
        rows.iter().map(|row| row.vendor.as_str()).collect()
    }

    #[test]
    fn rows_join_receipts_with_transactions() {
        let mut store = MemoryStore::default();
        let transaction = Transaction::new("Cafe", 5.0, "Food", "2024-01-05");
        add_transaction(transaction.clone(), &mut store).unwrap();
        add_receipt(Receipt::new(transaction.id.clone(), "cafe.jpg"), &mut store).unwrap();

        let rows = receipt_rows(&store).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vendor, "Cafe");
        assert_eq!(rows[0].status, Some(transaction.status));
    }

    #[test]
    fn missing_transaction_gives_blank_row() {
        let mut store = MemoryStore::default();
        add_receipt(Receipt::new(RecordId::from("gone"), "old.jpg"), &mut store).unwrap();

        let rows = receipt_rows(&store).unwrap();

        assert_eq!(rows[0].vendor, "");
        assert_eq!(rows[0].amount, 0.0);
        assert_eq!(rows[0].status, None);
    }

    #[test]
    fn default_filter_keeps_everything() {
        let rows = filter_receipt_rows(sample_rows(), &ReceiptFilter::default());

        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn search_matches_vendor_ignoring_case() {
        let filter = ReceiptFilter {
            search: Some("AMAZ".to_owned()),
            ..Default::default()
        };

        assert_eq!(vendors(&filter_receipt_rows(sample_rows(), &filter)), ["Amazon"]);
    }

    #[test]
    fn search_matches_category() {
        let filter = ReceiptFilter {
            search: Some("groc".to_owned()),
            ..Default::default()
        };

        assert_eq!(vendors(&filter_receipt_rows(sample_rows(), &filter)), ["Trader Joe's"]);
    }

    #[test]
    fn search_matches_amount_digits() {
        let filter = ReceiptFilter {
            search: Some("345".to_owned()),
            ..Default::default()
        };

        assert_eq!(vendors(&filter_receipt_rows(sample_rows(), &filter)), ["United Airlines"]);
    }

    #[test]
    fn date_range_is_inclusive_and_accepts_both_formats() {
        let filter = ReceiptFilter {
            from: Some(date!(2023 - 10 - 12)),
            to: Some(date!(2023 - 10 - 26)),
            ..Default::default()
        };

        assert_eq!(
            vendors(&filter_receipt_rows(sample_rows(), &filter)),
            ["Starbucks", "Amazon", "Trader Joe's"]
        );
    }

    #[test]
    fn unparseable_date_fails_active_date_filter() {
        let rows = vec![row("Mystery", 1.0, "", "someday")];
        let filter = ReceiptFilter {
            from: Some(date!(2000 - 01 - 01)),
            ..Default::default()
        };

        assert!(filter_receipt_rows(rows, &filter).is_empty());
    }

    #[test]
    fn category_must_match_exactly() {
        let filter = ReceiptFilter {
            category: Some("dining".to_owned()),
            ..Default::default()
        };

        assert!(filter_receipt_rows(sample_rows(), &filter).is_empty());
    }
}
