//! Names shared by categories and tags.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty category or tag name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct LabelName(String);

impl LabelName {
    /// Create a label name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyLabelName] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyLabelName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a label name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Whether the two names are the same when case is ignored.
    pub fn matches_ignoring_case(&self, other: &LabelName) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl AsRef<str> for LabelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for LabelName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabelName::new(s)
    }
}

impl Display for LabelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Pick a random, fully saturated display color as a CSS `hsl()` string.
pub fn random_color() -> String {
    let hue: u16 = rand::random_range(0..360);
    format!("hsl({hue}, 70%, 50%)")
}

/// Check that no existing name equals `name` when case is ignored.
///
/// # Errors
/// Returns an [Error::DuplicateLabelName] naming the clash.
pub(crate) fn ensure_unique<'a>(
    name: &LabelName,
    mut existing: impl Iterator<Item = &'a LabelName>,
) -> Result<(), Error> {
    match existing.find(|other| other.matches_ignoring_case(name)) {
        Some(other) => Err(Error::DuplicateLabelName(other.to_string())),
        None => Ok(()),
    }
}
