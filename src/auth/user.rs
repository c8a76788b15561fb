//! The single user account and its profile.

use serde::{Deserialize, Serialize};

use crate::{
    Error, RecordId,
    store::{RecordStore, StorageKey, read_record, write_record},
};

/// The one user account the store can hold.
///
/// The password is kept in plain text. This is a single-user local tool and
/// the password only guards against casual use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The ID of the user.
    pub id: RecordId,
    /// The user's full name.
    pub name: String,
    /// The email used to log in.
    pub email: String,
    /// The password used to log in.
    pub password: String,
    /// A data URI for the user's avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Get the stored user, or `None` if no one has signed up or the record is corrupt.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_user(store: &impl RecordStore) -> Result<Option<User>, Error> {
    read_record(StorageKey::User, store)
}

/// Overwrite the stored user.
pub(super) fn save_user(user: &User, store: &mut impl RecordStore) -> Result<(), Error> {
    write_record(StorageKey::User, user, store)
}

/// The profile fields a user may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    /// A new full name, ignored when `None`.
    pub name: Option<String>,
    /// A new email, ignored when `None`.
    pub email: Option<String>,
    /// A new avatar data URI. `Some("")` removes the avatar.
    pub profile_picture: Option<String>,
}

/// Apply `update` to the stored user and return the result.
///
/// # Errors
/// This function will return a:
/// - [Error::NotAuthenticated] if no user is stored,
/// - [Error::MissingField] if the new name or email is blank,
/// - or an error if the store could not be read or written.
pub fn update_profile(update: ProfileUpdate, store: &mut impl RecordStore) -> Result<User, Error> {
    let Some(mut user) = get_user(store)? else {
        return Err(Error::NotAuthenticated);
    };

    if let Some(name) = update.name {
        user.name = required(&name, "name")?;
    }

    if let Some(email) = update.email {
        user.email = required(&email, "email")?;
    }

    if let Some(picture) = update.profile_picture {
        user.profile_picture = (!picture.is_empty()).then_some(picture);
    }

    save_user(&user, store)?;
    tracing::info!("Updated profile for {}", user.email);

    Ok(user)
}

/// Trim `value`, failing with [Error::MissingField] if nothing is left.
pub(super) fn required(value: &str, field: &'static str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        Err(Error::MissingField(field))
    } else {
        Ok(value.to_owned())
    }
}

#[cfg(test)]
mod user_tests {
    use crate::{
        Error, RecordId,
        auth::{ProfileUpdate, User, get_user, update_profile, user::save_user},
        store::MemoryStore,
    };

    fn ada() -> User {
        User {
            id: RecordId::from("u1"),
            name: "Ada".to_owned(),
            email: "ada@x.com".to_owned(),
            password: "pw1".to_owned(),
            profile_picture: None,
        }
    }

    #[test]
    fn reads_user_without_profile_picture() {
        let store = MemoryStore::with_entries([(
            "user",
            r#"{"id":"u1","name":"Ada","email":"ada@x.com","password":"pw1"}"#,
        )]);

        assert_eq!(get_user(&store), Ok(Some(ada())));
    }

    #[test]
    fn update_profile_changes_only_given_fields() {
        let mut store = MemoryStore::default();
        save_user(&ada(), &mut store).unwrap();

        let updated = update_profile(
            ProfileUpdate {
                name: Some(" Ada Lovelace ".to_owned()),
                profile_picture: Some("data:image/png;base64,AAAA".to_owned()),
                ..Default::default()
            },
            &mut store,
        )
        .unwrap();

        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.email, "ada@x.com");
        assert_eq!(get_user(&store), Ok(Some(updated)));
    }

    #[test]
    fn update_profile_rejects_blank_email() {
        let mut store = MemoryStore::default();
        save_user(&ada(), &mut store).unwrap();

        let result = update_profile(
            ProfileUpdate {
                email: Some("".to_owned()),
                ..Default::default()
            },
            &mut store,
        );

        assert_eq!(result, Err(Error::MissingField("email")));
        assert_eq!(get_user(&store), Ok(Some(ada())));
    }

    #[test]
    fn update_profile_without_user_fails() {
        let mut store = MemoryStore::default();

        let result = update_profile(ProfileUpdate::default(), &mut store);

        assert_eq!(result, Err(Error::NotAuthenticated));
    }
}
