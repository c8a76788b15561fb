//! The in-app notification feed.
//!
//! Changes to receipts, categories and tags leave a short message in the feed,
//! newest first. The feed is stored as a single collection, so marking
//! everything as read or clearing it rewrites the whole list.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    format::format_currency,
    store::{RecordStore, StorageKey, read_collection, write_collection},
};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Something the user did worked.
    Success,
    /// A neutral change.
    Info,
    /// Something was removed.
    Warning,
}

/// A message in the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Milliseconds since the Unix epoch when the notification was created,
    /// bumped if needed so that IDs are strictly increasing.
    pub id: i64,
    /// A short heading, e.g. "Receipt added".
    pub title: String,
    /// The full message.
    pub message: String,
    /// When the notification was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// How the notification should be presented.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Whether the user has seen the notification.
    #[serde(default)]
    pub read: bool,
}

/// What happened to the record a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    /// The record was created.
    Added,
    /// The record was changed.
    Updated,
    /// The record was removed.
    Deleted,
}

impl ChangeAction {
    fn kind(self, added_kind: NotificationKind) -> NotificationKind {
        match self {
            ChangeAction::Deleted => NotificationKind::Warning,
            ChangeAction::Added | ChangeAction::Updated => added_kind,
        }
    }
}

impl Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ChangeAction::Added => "added",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        };

        f.write_str(text)
    }
}

/// Retrieve the notification feed, newest first.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_notifications(store: &impl RecordStore) -> Result<Vec<Notification>, Error> {
    read_collection(StorageKey::Notifications, store)
}

/// Whether any notification in the feed has not been read.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn has_unread(store: &impl RecordStore) -> Result<bool, Error> {
    Ok(get_notifications(store)?
        .iter()
        .any(|notification| !notification.read))
}

/// Add an unread notification to the front of the feed and return it.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn push_notification(
    title: &str,
    message: &str,
    kind: NotificationKind,
    store: &mut impl RecordStore,
) -> Result<Notification, Error> {
    let mut notifications = get_notifications(store)?;
    let created_at = OffsetDateTime::now_utc();
    let now_ms = (created_at.unix_timestamp_nanos() / 1_000_000) as i64;
    let newest_id = notifications.iter().map(|notification| notification.id).max();

    let notification = Notification {
        id: newest_id.map_or(now_ms, |newest| now_ms.max(newest + 1)),
        title: title.to_owned(),
        message: message.to_owned(),
        created_at,
        kind,
        read: false,
    };

    notifications.insert(0, notification.clone());
    write_collection(StorageKey::Notifications, &notifications, store)?;

    Ok(notification)
}

/// Record that the receipt for `vendor` was added, updated or deleted.
///
/// The amount is only shown for added receipts.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn notify_receipt(
    action: ChangeAction,
    vendor: &str,
    amount: f64,
    store: &mut impl RecordStore,
) -> Result<Notification, Error> {
    let message = match action {
        ChangeAction::Added => {
            format!("Receipt from {vendor} ({}) was added.", format_currency(amount))
        }
        _ => format!("Receipt from {vendor} was {action}."),
    };

    push_notification(
        &format!("Receipt {action}"),
        &message,
        action.kind(NotificationKind::Success),
        store,
    )
}

/// Record that the category `name` was added, updated or deleted.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn notify_category(
    action: ChangeAction,
    name: &str,
    store: &mut impl RecordStore,
) -> Result<Notification, Error> {
    notify_label("Category", action, name, store)
}

/// Record that the tag `name` was added, updated or deleted.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn notify_tag(
    action: ChangeAction,
    name: &str,
    store: &mut impl RecordStore,
) -> Result<Notification, Error> {
    notify_label("Tag", action, name, store)
}

fn notify_label(
    label: &str,
    action: ChangeAction,
    name: &str,
    store: &mut impl RecordStore,
) -> Result<Notification, Error> {
    push_notification(
        &format!("{label} {action}"),
        &format!("{label} \"{name}\" was {action}."),
        action.kind(NotificationKind::Info),
        store,
    )
}

/// Mark every notification in the feed as read.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn mark_all_as_read(store: &mut impl RecordStore) -> Result<(), Error> {
    let mut notifications = get_notifications(store)?;
    notifications
        .iter_mut()
        .for_each(|notification| notification.read = true);

    write_collection(StorageKey::Notifications, &notifications, store)
}

/// Remove every notification from the feed.
///
/// # Errors
/// Returns an error if the store could not be written.
pub fn clear_all(store: &mut impl RecordStore) -> Result<(), Error> {
    write_collection::<Notification>(StorageKey::Notifications, &[], store)
}
