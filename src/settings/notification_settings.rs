//! Which events send an email or a push notification.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    store::{RecordStore, StorageKey, read_record, write_record},
};

/// Whether an event is delivered by email and by push notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channels {
    pub email: bool,
    pub push: bool,
}

/// A way of delivering a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Push,
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "push" => Ok(Channel::Push),
            other => Err(format!("unknown channel \"{other}\", expected email or push")),
        }
    }
}

/// Something the user can be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    /// A new receipt was uploaded.
    ReceiptUploaded,
    /// A receipt was approved or rejected.
    ApprovalStatus,
    /// A summary of the week's spending.
    WeeklyReport,
    /// A log in from a new device.
    SecurityAlerts,
}

impl NotificationEvent {
    /// Every event, in display order.
    pub const ALL: [NotificationEvent; 4] = [
        NotificationEvent::ReceiptUploaded,
        NotificationEvent::ApprovalStatus,
        NotificationEvent::WeeklyReport,
        NotificationEvent::SecurityAlerts,
    ];

    /// The key of the event in the stored record.
    pub fn key(self) -> &'static str {
        match self {
            NotificationEvent::ReceiptUploaded => "receiptUploaded",
            NotificationEvent::ApprovalStatus => "approvalStatus",
            NotificationEvent::WeeklyReport => "weeklyReport",
            NotificationEvent::SecurityAlerts => "securityAlerts",
        }
    }

    /// A short description of when the event happens.
    pub fn description(self) -> &'static str {
        match self {
            NotificationEvent::ReceiptUploaded => "When a new receipt is successfully uploaded.",
            NotificationEvent::ApprovalStatus => "When a receipt is approved or rejected.",
            NotificationEvent::WeeklyReport => "A summary of your weekly spending.",
            NotificationEvent::SecurityAlerts => "Login attempts from new devices.",
        }
    }
}

impl Display for NotificationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NotificationEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], "").to_lowercase();

        NotificationEvent::ALL
            .into_iter()
            .find(|event| event.key().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown notification event \"{s}\""))
    }
}

/// The delivery channels for every [NotificationEvent].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub receipt_uploaded: Channels,
    pub approval_status: Channels,
    pub weekly_report: Channels,
    pub security_alerts: Channels,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            receipt_uploaded: Channels {
                email: true,
                push: false,
            },
            approval_status: Channels {
                email: true,
                push: false,
            },
            weekly_report: Channels {
                email: false,
                push: false,
            },
            security_alerts: Channels {
                email: true,
                push: true,
            },
        }
    }
}

impl NotificationSettings {
    /// The channels for `event`.
    pub fn channels(&self, event: NotificationEvent) -> Channels {
        match event {
            NotificationEvent::ReceiptUploaded => self.receipt_uploaded,
            NotificationEvent::ApprovalStatus => self.approval_status,
            NotificationEvent::WeeklyReport => self.weekly_report,
            NotificationEvent::SecurityAlerts => self.security_alerts,
        }
    }

    fn channels_mut(&mut self, event: NotificationEvent) -> &mut Channels {
        match event {
            NotificationEvent::ReceiptUploaded => &mut self.receipt_uploaded,
            NotificationEvent::ApprovalStatus => &mut self.approval_status,
            NotificationEvent::WeeklyReport => &mut self.weekly_report,
            NotificationEvent::SecurityAlerts => &mut self.security_alerts,
        }
    }
}

/// Get the stored notification settings, storing the defaults if there are none.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn load_notification_settings(
    store: &mut impl RecordStore,
) -> Result<NotificationSettings, Error> {
    if let Some(settings) = read_record(StorageKey::NotificationSettings, store)? {
        return Ok(settings);
    }

    let settings = NotificationSettings::default();
    write_record(StorageKey::NotificationSettings, &settings, store)?;

    Ok(settings)
}

/// Flip one channel of one event and store the result.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn toggle_notification_setting(
    event: NotificationEvent,
    channel: Channel,
    store: &mut impl RecordStore,
) -> Result<NotificationSettings, Error> {
    let mut settings = load_notification_settings(store)?;
    let channels = settings.channels_mut(event);

    match channel {
        Channel::Email => channels.email = !channels.email,
        Channel::Push => channels.push = !channels.push,
    }

    write_record(StorageKey::NotificationSettings, &settings, store)?;

    Ok(settings)
}
