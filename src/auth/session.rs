//! Signing up, logging in and out.
//!
//! A user is authenticated while a non-empty token is stored. Logging out
//! forgets the token but keeps the account, deleting the account forgets both.

use crate::{
    Error, RecordId,
    auth::{
        User,
        token::{current_token, issue_token, revoke_token},
        user::{get_user, required, save_user},
    },
    store::{RecordStore, StorageKey, remove_record},
};

/// Create the user account, replacing any existing one, and log it in.
///
/// The name and email are trimmed. The password is stored exactly as given.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingField] if the name, email or password is blank,
/// - [Error::PasswordMismatch] if `password` and `confirm_password` differ,
/// - or an error if the store could not be written.
pub fn sign_up(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    store: &mut impl RecordStore,
) -> Result<User, Error> {
    let name = required(name, "name")?;
    let email = required(email, "email")?;

    if password.is_empty() {
        return Err(Error::MissingField("password"));
    }

    if password != confirm_password {
        return Err(Error::PasswordMismatch);
    }

    let user = User {
        id: RecordId::new(),
        name,
        email,
        password: password.to_owned(),
        profile_picture: None,
    };

    save_user(&user, store)?;
    issue_token(store)?;
    tracing::info!("Signed up {}", user.email);

    Ok(user)
}

/// Log in with the stored user's email and password and return the new token.
///
/// The email is trimmed like it is when signing up. The password must match
/// exactly.
///
/// # Errors
/// Returns an [Error::InvalidCredentials] if they do not match or no user is
/// stored, or an error if the store could not be read or written.
pub fn log_in(email: &str, password: &str, store: &mut impl RecordStore) -> Result<String, Error> {
    match get_user(store)? {
        Some(user) if user.email == email.trim() && user.password == password => {
            let token = issue_token(store)?;
            tracing::info!("Logged in {}", user.email);
            Ok(token)
        }
        _ => {
            tracing::debug!("Rejected log in attempt for {email}");
            Err(Error::InvalidCredentials)
        }
    }
}

/// End the session. The user account is kept.
///
/// # Errors
/// Returns an error if the store could not be written.
pub fn log_out(store: &mut impl RecordStore) -> Result<(), Error> {
    revoke_token(store)
}

/// End the session and forget the user account.
///
/// Receipts and other records are kept.
///
/// # Errors
/// Returns an error if the store could not be written.
pub fn delete_account(store: &mut impl RecordStore) -> Result<(), Error> {
    revoke_token(store)?;
    remove_record(StorageKey::User, store)?;
    tracing::info!("Deleted user account");

    Ok(())
}

/// Whether a session token is stored.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn is_authenticated(store: &impl RecordStore) -> Result<bool, Error> {
    Ok(current_token(store)?.is_some())
}

/// Get the logged in user, or `None` if there is no session or no user.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn current_user(store: &impl RecordStore) -> Result<Option<User>, Error> {
    if !is_authenticated(store)? {
        return Ok(None);
    }

    get_user(store)
}

/// Get the logged in user.
///
/// # Errors
/// Returns an [Error::NotAuthenticated] if there is no session or no user.
pub fn require_user(store: &impl RecordStore) -> Result<User, Error> {
    current_user(store)?.ok_or(Error::NotAuthenticated)
}
