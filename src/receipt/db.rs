//! Storage operations for receipts.

use crate::{
    Error,
    receipt::Receipt,
    record_id::ReceiptId,
    store::{RecordStore, StorageKey, read_collection, write_collection},
};

/// Retrieve every stored receipt, in insertion order.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_all_receipts(store: &impl RecordStore) -> Result<Vec<Receipt>, Error> {
    read_collection(StorageKey::Receipts, store)
}

/// Retrieve a single receipt by ID.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_receipt(id: &ReceiptId, store: &impl RecordStore) -> Result<Option<Receipt>, Error> {
    Ok(get_all_receipts(store)?
        .into_iter()
        .find(|receipt| &receipt.id == id))
}

/// Append `receipt` to the stored receipts.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn add_receipt(receipt: Receipt, store: &mut impl RecordStore) -> Result<(), Error> {
    let mut receipts = get_all_receipts(store)?;
    receipts.push(receipt);

    write_collection(StorageKey::Receipts, &receipts, store)
}

/// Replace the stored receipt that has the same ID as `updated`.
///
/// If no receipt has that ID, `updated` is dropped and nothing changes.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn update_receipt(updated: Receipt, store: &mut impl RecordStore) -> Result<(), Error> {
    let mut receipts = get_all_receipts(store)?;

    match receipts.iter_mut().find(|receipt| receipt.id == updated.id) {
        Some(receipt) => *receipt = updated,
        None => tracing::debug!("Ignoring update of missing receipt {}", updated.id),
    }

    write_collection(StorageKey::Receipts, &receipts, store)
}

/// Remove the receipt with the given ID. Deleting a missing ID does nothing.
///
/// The receipt's transaction is left alone.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn delete_receipt(id: &ReceiptId, store: &mut impl RecordStore) -> Result<(), Error> {
    let mut receipts = get_all_receipts(store)?;
    receipts.retain(|receipt| &receipt.id != id);

    write_collection(StorageKey::Receipts, &receipts, store)
}

#[cfg(test)]
mod receipt_db_tests {
    use crate::{
        RecordId,
        receipt::{
            Receipt, add_receipt, delete_receipt, get_all_receipts, get_receipt, update_receipt,
        },
        store::{MemoryStore, SqliteStore},
        transaction::{Transaction, add_transaction, get_all_transactions},
    };

    fn receipt() -> Receipt {
        Receipt::new(RecordId::from("t1"), "cafe.jpg")
    }

    #[test]
    fn add_then_get_returns_same_receipt() {
        let mut store = MemoryStore::default();
        let receipt = receipt();

        add_receipt(receipt.clone(), &mut store).unwrap();

        assert_eq!(get_receipt(&receipt.id, &store), Ok(Some(receipt)));
    }

    #[test]
    fn add_then_get_with_sqlite_store() {
        let mut store = SqliteStore::open_in_memory().expect("Could not open database");
        let mut receipt = receipt();
        receipt.tags = Some(vec!["work".to_owned()]);

        add_receipt(receipt.clone(), &mut store).unwrap();

        assert_eq!(get_receipt(&receipt.id, &store), Ok(Some(receipt)));
    }

    #[test]
    fn update_replaces_matching_receipt() {
        let mut store = MemoryStore::default();
        let receipt = receipt();
        add_receipt(receipt.clone(), &mut store).unwrap();

        let mut updated = receipt.clone();
        updated.notes = Some("Team lunch".to_owned());
        update_receipt(updated.clone(), &mut store).unwrap();

        assert_eq!(get_all_receipts(&store).unwrap(), vec![updated]);
    }

    #[test]
    fn update_of_missing_receipt_is_not_inserted() {
        let mut store = MemoryStore::default();

        update_receipt(receipt(), &mut store).unwrap();

        assert!(get_all_receipts(&store).unwrap().is_empty());
    }

    #[test]
    fn delete_twice_is_same_as_once() {
        let mut store = MemoryStore::default();
        let keep = receipt();
        let remove = receipt();
        add_receipt(keep.clone(), &mut store).unwrap();
        add_receipt(remove.clone(), &mut store).unwrap();

        delete_receipt(&remove.id, &mut store).unwrap();
        let after_once = get_all_receipts(&store).unwrap();
        delete_receipt(&remove.id, &mut store).unwrap();

        assert_eq!(after_once, vec![keep]);
        assert_eq!(get_all_receipts(&store).unwrap(), after_once);
    }

    #[test]
    fn delete_does_not_touch_transaction() {
        let mut store = MemoryStore::default();
        let transaction = Transaction::new("Cafe", 5.0, "Food", "2024-01-05");
        let receipt = Receipt::new(transaction.id.clone(), "cafe.jpg");
        add_transaction(transaction.clone(), &mut store).unwrap();
        add_receipt(receipt.clone(), &mut store).unwrap();

        delete_receipt(&receipt.id, &mut store).unwrap();

        assert_eq!(get_all_transactions(&store).unwrap(), vec![transaction]);
    }
}
