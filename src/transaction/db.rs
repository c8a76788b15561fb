//! Storage operations for transactions.

use crate::{
    Error,
    record_id::TransactionId,
    store::{RecordStore, StorageKey, read_collection, write_collection},
    transaction::Transaction,
};

/// Retrieve every stored transaction, in insertion order.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_all_transactions(store: &impl RecordStore) -> Result<Vec<Transaction>, Error> {
    read_collection(StorageKey::Transactions, store)
}

/// Retrieve a single transaction by ID.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_transaction(
    id: &TransactionId,
    store: &impl RecordStore,
) -> Result<Option<Transaction>, Error> {
    Ok(get_all_transactions(store)?
        .into_iter()
        .find(|transaction| &transaction.id == id))
}

/// Append `transaction` to the stored transactions.
///
/// The caller is responsible for giving the transaction a fresh ID.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn add_transaction(transaction: Transaction, store: &mut impl RecordStore) -> Result<(), Error> {
    let mut transactions = get_all_transactions(store)?;
    transactions.push(transaction);

    write_collection(StorageKey::Transactions, &transactions, store)
}

/// Replace the stored transaction that has the same ID as `updated`.
///
/// If no transaction has that ID, `updated` is dropped and nothing changes.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn update_transaction(updated: Transaction, store: &mut impl RecordStore) -> Result<(), Error> {
    let mut transactions = get_all_transactions(store)?;

    match transactions
        .iter_mut()
        .find(|transaction| transaction.id == updated.id)
    {
        Some(transaction) => *transaction = updated,
        None => tracing::debug!("Ignoring update of missing transaction {}", updated.id),
    }

    write_collection(StorageKey::Transactions, &transactions, store)
}

/// Remove the transaction with the given ID. Deleting a missing ID does nothing.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn delete_transaction(id: &TransactionId, store: &mut impl RecordStore) -> Result<(), Error> {
    let mut transactions = get_all_transactions(store)?;
    transactions.retain(|transaction| &transaction.id != id);

    write_collection(StorageKey::Transactions, &transactions, store)
}
