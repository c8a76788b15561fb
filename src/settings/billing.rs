//! The billing plan, payment method and invoice history.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    store::{
        RecordStore, StorageKey, read_collection, read_raw, read_record, write_collection,
        write_raw, write_record,
    },
};

/// The subscription plan. Stored as its display name without JSON quoting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BillingPlan {
    #[default]
    Pro,
    FreeTrial,
}

impl BillingPlan {
    /// The stored and displayed name of the plan.
    pub fn as_str(self) -> &'static str {
        match self {
            BillingPlan::Pro => "Pro",
            BillingPlan::FreeTrial => "Free Trial",
        }
    }

    /// The other plan.
    pub fn toggled(self) -> Self {
        match self {
            BillingPlan::Pro => BillingPlan::FreeTrial,
            BillingPlan::FreeTrial => BillingPlan::Pro,
        }
    }
}

impl Display for BillingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A saved card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// The card brand, e.g. "VISA".
    #[serde(rename = "type")]
    pub kind: String,
    /// The last four digits of the card number.
    pub last4: String,
    /// The expiry date, e.g. "12/2024".
    pub expiry: String,
}

/// A past invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingHistoryItem {
    pub date: String,
    pub desc: String,
    pub amount: String,
    pub status: String,
}

/// Get the billing plan. A missing or unknown value means [BillingPlan::Pro].
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_billing_plan(store: &impl RecordStore) -> Result<BillingPlan, Error> {
    let plan = match read_raw(StorageKey::BillingPlan, store)?.as_deref() {
        Some("Free Trial") => BillingPlan::FreeTrial,
        Some("Pro") | None => BillingPlan::Pro,
        Some(other) => {
            tracing::warn!("Unknown billing plan \"{other}\", using Pro");
            BillingPlan::Pro
        }
    };

    Ok(plan)
}

/// Switch between the Pro and Free Trial plans and return the new plan.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn toggle_plan(store: &mut impl RecordStore) -> Result<BillingPlan, Error> {
    let plan = get_billing_plan(store)?.toggled();
    write_raw(StorageKey::BillingPlan, plan.as_str(), store)?;

    Ok(plan)
}

/// Get the saved payment method, if any.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_payment_method(store: &impl RecordStore) -> Result<Option<PaymentMethod>, Error> {
    read_record(StorageKey::PaymentMethod, store)
}

/// Save `method` as the payment method, replacing any previous one.
///
/// # Errors
/// Returns an error if the store could not be written.
pub fn save_payment_method(method: &PaymentMethod, store: &mut impl RecordStore) -> Result<(), Error> {
    write_record(StorageKey::PaymentMethod, method, store)
}

fn default_billing_history() -> Vec<BillingHistoryItem> {
    [
        ("Oct 26, 2023", "Paid"),
        ("Sep 26, 2023", "Paid"),
        ("Aug 26, 2023", "Pending"),
    ]
    .into_iter()
    .map(|(date, status)| BillingHistoryItem {
        date: date.to_owned(),
        desc: "Pro Plan - Monthly".to_owned(),
        amount: "$12.00".to_owned(),
        status: status.to_owned(),
    })
    .collect()
}

/// Get the invoice history, storing the sample history if none is stored.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn get_billing_history(store: &mut impl RecordStore) -> Result<Vec<BillingHistoryItem>, Error> {
    if read_raw(StorageKey::BillingHistory, store)?.is_some() {
        return read_collection(StorageKey::BillingHistory, store);
    }

    let history = default_billing_history();
    write_collection(StorageKey::BillingHistory, &history, store)?;

    Ok(history)
}

#[cfg(test)]
mod tests {
    use crate::{
        settings::{
            BillingPlan, PaymentMethod, get_billing_history, get_billing_plan,
            get_payment_method, save_payment_method, toggle_plan,
        },
        store::{MemoryStore, RecordStore},
    };

    #[test]
    fn plan_defaults_to_pro() {
        let store = MemoryStore::default();

        assert_eq!(get_billing_plan(&store), Ok(BillingPlan::Pro));
    }

    #[test]
    fn toggle_plan_stores_raw_name() {
        let mut store = MemoryStore::default();

        assert_eq!(toggle_plan(&mut store), Ok(BillingPlan::FreeTrial));
        assert_eq!(store.get("billingPlan").unwrap().as_deref(), Some("Free Trial"));
        assert_eq!(toggle_plan(&mut store), Ok(BillingPlan::Pro));
    }

    #[test]
    fn payment_method_uses_type_field() {
        let mut store = MemoryStore::default();
        let method = PaymentMethod {
            kind: "VISA".to_owned(),
            last4: "4242".to_owned(),
            expiry: "12/2024".to_owned(),
        };

        save_payment_method(&method, &mut store).unwrap();

        let raw = store.get("paymentMethod").unwrap().unwrap();
        assert!(raw.contains("\"type\":\"VISA\""), "{raw}");
        assert_eq!(get_payment_method(&store), Ok(Some(method)));
    }

    #[test]
    fn history_defaults_are_persisted() {
        let mut store = MemoryStore::default();

        let history = get_billing_history(&mut store).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[2].status, "Pending");
        assert!(store.get("billingHistory").unwrap().is_some());
    }

    #[test]
    fn stored_empty_history_stays_empty() {
        let mut store = MemoryStore::with_entries([("billingHistory", "[]")]);

        assert_eq!(get_billing_history(&mut store), Ok(vec![]));
    }
}
