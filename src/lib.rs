//! Receiptify is a local receipt and expense tracker.
//!
//! Transactions, the receipts that prove them, categories, tags and settings
//! are kept as JSON collections in a key-value [store::RecordStore]. The
//! library provides typed CRUD over those collections, the cascades that keep
//! denormalized category and tag names consistent, dashboard aggregation and a
//! simple single-user login.
//!
//! The `receiptify` binary is a command-line front end over a SQLite-backed
//! store.

#![warn(missing_docs)]

mod app_state;
pub mod auth;
pub mod category;
pub mod dashboard;
mod error;
pub mod export;
pub mod format;
mod label;
pub mod logging;
pub mod notification;
pub mod pagination;
pub mod receipt;
mod record_id;
pub mod settings;
pub mod store;
pub mod tag;
pub mod timezone;
pub mod transaction;

pub use app_state::AppState;
pub use auth::User;
pub use category::Category;
pub use error::Error;
pub use label::{LabelName, random_color};
pub use receipt::Receipt;
pub use record_id::{ReceiptId, RecordId, TransactionId};
pub use settings::Preferences;
pub use tag::Tag;
pub use transaction::Transaction;
