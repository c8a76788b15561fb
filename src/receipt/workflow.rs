//! Receipt operations that touch both a receipt and its transaction.
//!
//! The two collections are written one after the other. If the second write
//! fails the first is not rolled back.

use crate::{
    Error,
    notification::{ChangeAction, notify_receipt},
    receipt::{NewReceipt, Receipt, add_receipt, delete_receipt, get_receipt, update_receipt},
    record_id::{ReceiptId, TransactionId},
    store::RecordStore,
    transaction::{
        Transaction, add_transaction, delete_transaction, get_transaction, update_transaction,
    },
};

/// Store the transaction and receipt described by `form`.
///
/// The transaction is written first, then the receipt, then a "Receipt added"
/// notification.
///
/// # Errors
/// Returns an error if the form is invalid (see [NewReceipt::validate]) or the
/// store could not be read or written.
pub fn upload_receipt(
    form: &NewReceipt,
    store: &mut impl RecordStore,
) -> Result<(Transaction, Receipt), Error> {
    form.validate()?;

    let mut transaction = Transaction::new("", 0.0, "", "");
    form.apply_to_transaction(&mut transaction);

    let mut receipt = Receipt::new(transaction.id.clone(), "");
    form.apply_to_receipt(&mut receipt);

    add_transaction(transaction.clone(), store)?;
    add_receipt(receipt.clone(), store)?;
    notify_receipt(ChangeAction::Added, &transaction.vendor, transaction.amount, store)?;

    tracing::info!("Uploaded receipt {} for {}", receipt.id, transaction.vendor);
    Ok((transaction, receipt))
}

/// Overwrite the receipt `receipt_id` and its transaction with `form`.
///
/// Returns `Ok(None)` without changing anything if there is no such receipt.
/// If the receipt's transaction is missing, it is recreated with the same ID.
///
/// # Errors
/// Returns an error if the form is invalid or the store could not be read or
/// written.
pub fn edit_receipt(
    receipt_id: &ReceiptId,
    form: &NewReceipt,
    store: &mut impl RecordStore,
) -> Result<Option<(Transaction, Receipt)>, Error> {
    form.validate()?;

    let Some(mut receipt) = get_receipt(receipt_id, store)? else {
        tracing::debug!("Ignoring edit of missing receipt {receipt_id}");
        return Ok(None);
    };

    let transaction = match get_transaction(&receipt.transaction_id, store)? {
        Some(mut transaction) => {
            form.apply_to_transaction(&mut transaction);
            update_transaction(transaction.clone(), store)?;
            transaction
        }
        None => {
            let mut transaction = Transaction::new("", 0.0, "", "");
            transaction.id = receipt.transaction_id.clone();
            form.apply_to_transaction(&mut transaction);
            tracing::warn!(
                "Receipt {receipt_id} pointed to missing transaction {}, recreating it",
                transaction.id
            );
            add_transaction(transaction.clone(), store)?;
            transaction
        }
    };

    form.apply_to_receipt(&mut receipt);
    update_receipt(receipt.clone(), store)?;
    notify_receipt(ChangeAction::Updated, &transaction.vendor, transaction.amount, store)?;

    Ok(Some((transaction, receipt)))
}

/// Delete each receipt in `receipt_ids` and then its transaction.
///
/// IDs that do not match a receipt are skipped. The deletes are sequential and
/// best effort: an error stops the loop, leaving earlier deletes in place.
/// Returns the number of receipts deleted.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn delete_receipts_with_transactions(
    receipt_ids: &[ReceiptId],
    store: &mut impl RecordStore,
) -> Result<usize, Error> {
    let mut deleted = 0;

    for receipt_id in receipt_ids {
        let Some(receipt) = get_receipt(receipt_id, store)? else {
            tracing::debug!("Skipping delete of missing receipt {receipt_id}");
            continue;
        };

        let vendor = vendor_for(&receipt.transaction_id, store)?;

        delete_receipt(&receipt.id, store)?;
        delete_transaction(&receipt.transaction_id, store)?;
        notify_receipt(ChangeAction::Deleted, &vendor, 0.0, store)?;

        deleted += 1;
    }

    tracing::info!("Deleted {deleted} receipt(s) and their transactions");
    Ok(deleted)
}

fn vendor_for(transaction_id: &TransactionId, store: &impl RecordStore) -> Result<String, Error> {
    Ok(get_transaction(transaction_id, store)?
        .map(|transaction| transaction.vendor)
        .unwrap_or_default())
}
