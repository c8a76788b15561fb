//! Receipts: uploaded proof of purchase for transactions.

mod db;
mod domain;
mod list;
mod workflow;

pub use db::{add_receipt, delete_receipt, get_all_receipts, get_receipt, update_receipt};
pub use domain::{NewReceipt, Receipt};
pub use list::{ReceiptFilter, ReceiptRow, filter_receipt_rows, receipt_rows};
pub use workflow::{delete_receipts_with_transactions, edit_receipt, upload_receipt};
