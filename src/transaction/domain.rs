//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::record_id::TransactionId;

/// The date format produced by HTML date inputs, e.g. "2024-01-05".
const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The date format used for display, e.g. "Oct 26, 2023".
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// A single expense, e.g. a coffee or a plane ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Who was paid.
    pub vendor: String,
    /// How much was paid. Expected to be non-negative, but not validated.
    pub amount: f64,
    /// The name of the category the transaction belongs to, or an empty string.
    ///
    /// This is the category's name rather than its ID, so renaming a category
    /// must rewrite every transaction that uses it.
    pub category: String,
    /// When the transaction happened, as entered by the user.
    ///
    /// Kept as a string so that records in any format survive a round trip,
    /// see [Transaction::parsed_date].
    pub date: String,
    /// Where the expense is in the approval process.
    #[serde(default)]
    pub status: TransactionStatus,
}

impl Transaction {
    /// Create a transaction with a fresh ID and a pending status.
    pub fn new(vendor: &str, amount: f64, category: &str, date: &str) -> Self {
        Self {
            id: TransactionId::new(),
            vendor: vendor.to_owned(),
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
            status: TransactionStatus::default(),
        }
    }

    /// Set the status of the transaction.
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// Parse [Transaction::date].
    ///
    /// Accepts "2024-01-05" and "Jan 5, 2024". Returns `None` for any other
    /// format.
    pub fn parsed_date(&self) -> Option<Date> {
        parse_date(&self.date)
    }
}

/// Parse a date in either the ISO or the display format.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    Date::parse(text, ISO_DATE_FORMAT)
        .or_else(|_| Date::parse(text, DISPLAY_DATE_FORMAT))
        .ok()
}

/// Where an expense is in the approval process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// The expense was accepted.
    Approved,
    /// The expense has not been reviewed yet.
    #[default]
    Pending,
    /// The expense was refused.
    Rejected,
    /// The expense was paid back.
    Reimbursed,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TransactionStatus::Approved => "Approved",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Rejected => "Rejected",
            TransactionStatus::Reimbursed => "Reimbursed",
        };

        f.write_str(text)
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Ok(TransactionStatus::Approved),
            "pending" => Ok(TransactionStatus::Pending),
            "rejected" => Ok(TransactionStatus::Rejected),
            "reimbursed" => Ok(TransactionStatus::Reimbursed),
            other => Err(format!("unknown status \"{other}\"")),
        }
    }
}
