//! The opaque session token that marks the user as logged in.

use uuid::Uuid;

use crate::{
    Error,
    store::{RecordStore, StorageKey, read_raw, remove_record, write_raw},
};

/// Store a fresh random token, replacing any previous one, and return it.
pub(super) fn issue_token(store: &mut impl RecordStore) -> Result<String, Error> {
    let token = Uuid::new_v4().to_string();
    write_raw(StorageKey::AuthToken, &token, store)?;

    Ok(token)
}

/// Get the current session token, if there is a non-empty one.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn current_token(store: &impl RecordStore) -> Result<Option<String>, Error> {
    Ok(read_raw(StorageKey::AuthToken, store)?.filter(|token| !token.is_empty()))
}

/// Forget the session token.
pub(super) fn revoke_token(store: &mut impl RecordStore) -> Result<(), Error> {
    remove_record(StorageKey::AuthToken, store)
}
