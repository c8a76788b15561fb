//! Transactions: the expenses that receipts prove.

mod db;
mod domain;

pub use db::{
    add_transaction, delete_transaction, get_all_transactions, get_transaction,
    update_transaction,
};
pub use domain::{Transaction, TransactionStatus, parse_date};
