//! The record store: a flat key-value namespace holding every collection as a
//! JSON string.
//!
//! Every mutation of a collection reads the whole collection, transforms it in
//! memory and writes the whole collection back. There is no partial update,
//! merge or concurrency check, the last write wins.

mod memory;
mod sqlite;

use std::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Read and write access to string values stored under string keys.
pub trait RecordStore {
    /// Get the value stored under `key`, or `None` if nothing is stored there.
    ///
    /// # Errors
    /// Returns an error if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, overwriting any existing value.
    ///
    /// # Errors
    /// Returns an error if the backend could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backend could not be written.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

/// The keys the application stores its records under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The list of [crate::Transaction]s.
    Transactions,
    /// The list of [crate::Receipt]s.
    Receipts,
    /// The list of [crate::Category]s.
    Categories,
    /// The list of [crate::Tag]s.
    Tags,
    /// The single [crate::User].
    User,
    /// The raw session token string.
    AuthToken,
    /// The user's [crate::Preferences].
    Preferences,
    /// The notification feed.
    Notifications,
    /// Which events send emails or push notifications.
    NotificationSettings,
    /// Connected third-party apps.
    Integrations,
    /// The raw name of the billing plan.
    BillingPlan,
    /// The saved payment method.
    PaymentMethod,
    /// Past invoices.
    BillingHistory,
}

impl StorageKey {
    /// The string key used in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Transactions => "transactions",
            StorageKey::Receipts => "receipts",
            StorageKey::Categories => "categories",
            StorageKey::Tags => "tags",
            StorageKey::User => "user",
            StorageKey::AuthToken => "authToken",
            StorageKey::Preferences => "preferences",
            StorageKey::Notifications => "notifications",
            StorageKey::NotificationSettings => "notificationSettings",
            StorageKey::Integrations => "integrations",
            StorageKey::BillingPlan => "billingPlan",
            StorageKey::PaymentMethod => "paymentMethod",
            StorageKey::BillingHistory => "billingHistory",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

/// Read the collection stored under `key`.
///
/// A missing key gives an empty collection. So does a value that is not valid
/// JSON for `T`: the problem is logged and then ignored, and the next write
/// to `key` overwrites the corrupt value.
///
/// # Errors
/// Returns an error only if the backend could not be read.
pub fn read_collection<T: DeserializeOwned>(
    key: StorageKey,
    store: &impl RecordStore,
) -> Result<Vec<T>, Error> {
    match try_read_collection(key, store) {
        Err(Error::CorruptRecord { key, reason }) => {
            tracing::warn!("Treating corrupt collection \"{key}\" as empty: {reason}");
            Ok(Vec::new())
        }
        result => result,
    }
}

/// Read the collection stored under `key`, rejecting corrupt JSON.
///
/// # Errors
/// Returns an [Error::CorruptRecord] if the stored value is not valid JSON for
/// a list of `T`, or an error if the backend could not be read.
pub fn try_read_collection<T: DeserializeOwned>(
    key: StorageKey,
    store: &impl RecordStore,
) -> Result<Vec<T>, Error> {
    Ok(try_read_record(key, store)?.unwrap_or_default())
}

/// Serialize `items` and store them under `key`, replacing the old collection.
///
/// # Errors
/// Returns an error if the items cannot be serialized or the backend could
/// not be written.
pub fn write_collection<T: Serialize>(
    key: StorageKey,
    items: &[T],
    store: &mut impl RecordStore,
) -> Result<(), Error> {
    write_record(key, &items, store)
}

// ============================================================================
// SINGLE RECORDS
// ============================================================================

/// Read the JSON object stored under `key`.
///
/// Corrupt values are logged and treated as missing.
///
/// # Errors
/// Returns an error only if the backend could not be read.
pub fn read_record<T: DeserializeOwned>(
    key: StorageKey,
    store: &impl RecordStore,
) -> Result<Option<T>, Error> {
    match try_read_record(key, store) {
        Err(Error::CorruptRecord { key, reason }) => {
            tracing::warn!("Treating corrupt record \"{key}\" as missing: {reason}");
            Ok(None)
        }
        result => result,
    }
}

/// Read the JSON object stored under `key`, rejecting corrupt JSON.
///
/// # Errors
/// Returns an [Error::CorruptRecord] if the stored value cannot be parsed as
/// `T`, or an error if the backend could not be read.
pub fn try_read_record<T: DeserializeOwned>(
    key: StorageKey,
    store: &impl RecordStore,
) -> Result<Option<T>, Error> {
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|error| Error::CorruptRecord {
            key: key.to_string(),
            reason: error.to_string(),
        })
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
/// Returns an error if the value cannot be serialized or the backend could
/// not be written.
pub fn write_record<T: Serialize + ?Sized>(
    key: StorageKey,
    value: &T,
    store: &mut impl RecordStore,
) -> Result<(), Error> {
    let json = serde_json::to_string(value)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    store.set(key.as_str(), &json)
}

/// Read the raw, unparsed string stored under `key`.
///
/// # Errors
/// Returns an error if the backend could not be read.
pub fn read_raw(key: StorageKey, store: &impl RecordStore) -> Result<Option<String>, Error> {
    store.get(key.as_str())
}

/// Store `value` under `key` as is, without JSON encoding.
///
/// # Errors
/// Returns an error if the backend could not be written.
pub fn write_raw(key: StorageKey, value: &str, store: &mut impl RecordStore) -> Result<(), Error> {
    store.set(key.as_str(), value)
}

/// Remove whatever is stored under `key`.
///
/// # Errors
/// Returns an error if the backend could not be written.
pub fn remove_record(key: StorageKey, store: &mut impl RecordStore) -> Result<(), Error> {
    store.remove(key.as_str())
}
