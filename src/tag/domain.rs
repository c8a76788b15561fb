//! Core tag domain types.

use serde::{Deserialize, Serialize};

use crate::{RecordId, label::LabelName};

/// A free-form label for receipts (e.g., 'work', 'tax-deductible').
///
/// Receipts refer to tags by name, see [crate::Receipt::tags].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Tag {
    pub id: RecordId,
    pub name: LabelName,
}

/// A tag and the number of times receipts use it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagUsage {
    pub tag: Tag,
    /// A receipt that lists the tag twice counts twice.
    pub receipt_count: usize,
}
