//! Record ID type definition.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A randomly generated, unique string identifying a stored record.
///
/// Serialized as a plain JSON string so stored records keep their original
/// layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh, random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifies a [crate::Transaction].
pub type TransactionId = RecordId;
/// Identifies a [crate::Receipt].
pub type ReceiptId = RecordId;

#[cfg(test)]
mod tests {
    use crate::RecordId;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::from("abc-123");

        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
    }
}
