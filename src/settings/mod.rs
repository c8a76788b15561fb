//! User settings: preferences, notification delivery, integrations and billing.

mod billing;
mod integrations;
mod notification_settings;
mod preferences;

pub use billing::{
    BillingHistoryItem, BillingPlan, PaymentMethod, get_billing_history, get_billing_plan,
    get_payment_method, save_payment_method, toggle_plan,
};
pub use integrations::{Integration, get_integrations, toggle_integration};
pub use notification_settings::{
    Channel, Channels, NotificationEvent, NotificationSettings, load_notification_settings,
    toggle_notification_setting,
};
pub use preferences::{Preferences, load_preferences, save_preferences};
