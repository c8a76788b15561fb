//! Defines the category model and its storage operations.
//!
//! Transactions refer to categories by name, not by ID. Renaming or deleting a
//! category therefore rewrites the transactions that use it, and the number of
//! transactions per category is always recomputed from the transactions.

use serde::{Deserialize, Serialize};

use crate::{
    Error, RecordId,
    label::{LabelName, ensure_unique, random_color},
    store::{RecordStore, StorageKey, read_collection, write_collection},
    transaction::{Transaction, get_all_transactions},
};

// ============================================================================
// MODELS
// ============================================================================

/// A user-defined label for transactions, e.g. "Groceries" or "Travel".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: RecordId,
    /// The name of the category, unique ignoring case.
    pub name: LabelName,
    /// A CSS color used when drawing the category.
    pub color: String,
}

/// A category and the number of transactions that use it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUsage {
    /// The category being counted.
    pub category: Category,
    /// How many transactions have this category's name.
    pub transaction_count: usize,
}

// ============================================================================
// STORAGE FUNCTIONS
// ============================================================================

/// Retrieve all categories, newest first.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_all_categories(store: &impl RecordStore) -> Result<Vec<Category>, Error> {
    read_collection(StorageKey::Categories, store)
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_category(id: &RecordId, store: &impl RecordStore) -> Result<Option<Category>, Error> {
    Ok(get_all_categories(store)?
        .into_iter()
        .find(|category| &category.id == id))
}

/// Create a category with a random color and store it in front of the others.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyLabelName] if `name` is blank,
/// - [Error::DuplicateLabelName] if a category with the same name, ignoring case, exists,
/// - or an error if the store could not be read or written.
pub fn add_category(name: &str, store: &mut impl RecordStore) -> Result<Category, Error> {
    let name = LabelName::new(name)?;
    let mut categories = get_all_categories(store)?;
    ensure_unique(&name, categories.iter().map(|category| &category.name))?;

    let category = Category {
        id: RecordId::new(),
        name,
        color: random_color(),
    };
    categories.insert(0, category.clone());
    write_collection(StorageKey::Categories, &categories, store)?;

    tracing::info!("Created category \"{}\"", category.name);
    Ok(category)
}

/// Rename a category and every transaction that uses its old name.
///
/// Only transactions whose category is exactly the old name are rewritten.
/// Renaming an ID that does not exist does nothing and returns `Ok(None)`,
/// otherwise the renamed category is returned.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyLabelName] if `new_name` is blank,
/// - [Error::DuplicateLabelName] if another category has `new_name`, ignoring case,
/// - or an error if the store could not be read or written.
pub fn rename_category(
    id: &RecordId,
    new_name: &str,
    store: &mut impl RecordStore,
) -> Result<Option<Category>, Error> {
    let new_name = LabelName::new(new_name)?;
    let mut categories = get_all_categories(store)?;

    let Some(position) = categories.iter().position(|category| &category.id == id) else {
        tracing::debug!("Ignoring rename of missing category {id}");
        return Ok(None);
    };

    ensure_unique(
        &new_name,
        categories
            .iter()
            .filter(|category| &category.id != id)
            .map(|category| &category.name),
    )?;

    let category = &mut categories[position];
    let old_name = std::mem::replace(&mut category.name, new_name.clone());
    let renamed = category.clone();
    write_collection(StorageKey::Categories, &categories, store)?;

    rewrite_transaction_categories(old_name.as_ref(), new_name.as_ref(), store)?;

    tracing::info!("Renamed category \"{old_name}\" to \"{new_name}\"");
    Ok(Some(renamed))
}

/// Delete a category and clear it from every transaction that used it.
///
/// The transactions are kept with an empty category. Deleting an ID that does
/// not exist does nothing and returns `Ok(None)`, otherwise the deleted
/// category is returned.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn delete_category(
    id: &RecordId,
    store: &mut impl RecordStore,
) -> Result<Option<Category>, Error> {
    let mut categories = get_all_categories(store)?;

    let Some(position) = categories.iter().position(|category| &category.id == id) else {
        tracing::debug!("Ignoring delete of missing category {id}");
        return Ok(None);
    };

    let deleted = categories.remove(position);
    write_collection(StorageKey::Categories, &categories, store)?;

    rewrite_transaction_categories(deleted.name.as_ref(), "", store)?;

    tracing::info!("Deleted category \"{}\"", deleted.name);
    Ok(Some(deleted))
}

/// Count how many transactions use each stored category.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_category_usage(store: &impl RecordStore) -> Result<Vec<CategoryUsage>, Error> {
    let categories = get_all_categories(store)?;
    let transactions = get_all_transactions(store)?;

    Ok(count_category_usage(categories, &transactions))
}

/// Count how many of `transactions` use each of `categories`, keeping the
/// order of `categories`.
pub fn count_category_usage(
    categories: Vec<Category>,
    transactions: &[Transaction],
) -> Vec<CategoryUsage> {
    categories
        .into_iter()
        .map(|category| {
            let transaction_count = transactions
                .iter()
                .filter(|transaction| transaction.category == category.name.as_ref())
                .count();

            CategoryUsage {
                category,
                transaction_count,
            }
        })
        .collect()
}

fn rewrite_transaction_categories(
    old_name: &str,
    new_name: &str,
    store: &mut impl RecordStore,
) -> Result<(), Error> {
    let mut transactions = get_all_transactions(store)?;
    let mut rewritten = 0;

    for transaction in transactions
        .iter_mut()
        .filter(|transaction| transaction.category == old_name)
    {
        transaction.category = new_name.to_owned();
        rewritten += 1;
    }

    if rewritten > 0 {
        write_collection(StorageKey::Transactions, &transactions, store)?;
        tracing::debug!("Rewrote the category of {rewritten} transaction(s)");
    }

    Ok(())
}
