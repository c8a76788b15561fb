//! Core receipt domain types.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    record_id::{ReceiptId, TransactionId},
    transaction::{Transaction, TransactionStatus},
};

/// An uploaded proof of purchase for exactly one [Transaction].
///
/// Deleting a receipt does not delete its transaction and vice versa, see
/// [crate::receipt::delete_receipts_with_transactions] for doing both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// The ID of the receipt.
    pub id: ReceiptId,
    /// The ID of the transaction this receipt proves.
    pub transaction_id: TransactionId,
    /// The uploaded file's name or a data URI.
    pub file: String,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// The names of the tags on this receipt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// A data URI for a thumbnail of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_preview: Option<String>,
}

impl Receipt {
    /// Create a receipt with a fresh ID for the transaction `transaction_id`.
    pub fn new(transaction_id: TransactionId, file: &str) -> Self {
        Self {
            id: ReceiptId::new(),
            transaction_id,
            file: file.to_owned(),
            notes: None,
            tags: None,
            image_preview: None,
        }
    }

    /// The tag names on this receipt, empty if it has none.
    pub fn tag_names(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// The fields entered when uploading or editing a receipt.
///
/// One form fills in both the [Transaction] and the [Receipt].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewReceipt {
    /// Who was paid. Required.
    pub vendor: String,
    /// How much was paid. Must be a finite number.
    pub amount: f64,
    /// The category name, may be empty.
    pub category: String,
    /// When the purchase happened. Required.
    pub date: String,
    /// Where the expense is in the approval process.
    pub status: TransactionStatus,
    /// The uploaded file's name or a data URI. Required.
    pub file: String,
    /// Free-text notes, ignored when blank.
    pub notes: Option<String>,
    /// Tag names, blank names are dropped.
    pub tags: Vec<String>,
    /// A data URI for a thumbnail of the file.
    pub image_preview: Option<String>,
}

impl NewReceipt {
    /// Check that the required fields are filled in.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if the vendor, date or file is blank,
    /// - [Error::InvalidAmount] if the amount is NaN or infinite.
    pub fn validate(&self) -> Result<(), Error> {
        if self.vendor.trim().is_empty() {
            return Err(Error::MissingField("vendor"));
        }

        if self.date.trim().is_empty() {
            return Err(Error::MissingField("date"));
        }

        if self.file.trim().is_empty() {
            return Err(Error::MissingField("file"));
        }

        if !self.amount.is_finite() {
            return Err(Error::InvalidAmount(self.amount.to_string()));
        }

        Ok(())
    }

    /// Fill in `transaction` from the form, keeping its ID.
    pub(crate) fn apply_to_transaction(&self, transaction: &mut Transaction) {
        transaction.vendor = self.vendor.trim().to_owned();
        transaction.amount = self.amount;
        transaction.category = self.category.trim().to_owned();
        transaction.date = self.date.trim().to_owned();
        transaction.status = self.status;
    }

    /// Fill in `receipt` from the form, keeping its IDs.
    pub(crate) fn apply_to_receipt(&self, receipt: &mut Receipt) {
        let tags: Vec<String> = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect();

        receipt.file = self.file.trim().to_owned();
        receipt.notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_owned);
        receipt.tags = (!tags.is_empty()).then_some(tags);
        receipt.image_preview = self.image_preview.clone();
    }
}
