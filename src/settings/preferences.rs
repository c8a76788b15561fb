//! Display preferences.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    store::{RecordStore, StorageKey, read_record, write_record},
};

/// How the user wants things displayed.
///
/// Missing fields in a stored record take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// The display language, e.g. "English (US)".
    pub language: String,
    /// The display currency, e.g. "USD ($)".
    pub currency: String,
    /// The display timezone label, e.g. "(GMT+00:00) UTC".
    pub timezone: String,
    /// The display date format, e.g. "MM/DD/YYYY".
    pub date_format: String,
    /// Whether to use the dark theme.
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "English (US)".to_owned(),
            currency: "USD ($)".to_owned(),
            timezone: "(GMT+00:00) UTC".to_owned(),
            date_format: "MM/DD/YYYY".to_owned(),
            dark_mode: false,
        }
    }
}

/// Get the stored preferences.
///
/// If none are stored, or the stored record is corrupt, the defaults are
/// stored and returned.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn load_preferences(store: &mut impl RecordStore) -> Result<Preferences, Error> {
    if let Some(preferences) = read_record(StorageKey::Preferences, store)? {
        return Ok(preferences);
    }

    let preferences = Preferences::default();
    save_preferences(&preferences, store)?;

    Ok(preferences)
}

/// Overwrite the stored preferences.
///
/// # Errors
/// Returns an error if the store could not be written.
pub fn save_preferences(preferences: &Preferences, store: &mut impl RecordStore) -> Result<(), Error> {
    write_record(StorageKey::Preferences, preferences, store)
}

#[cfg(test)]
mod tests {
    use crate::{
        settings::{Preferences, load_preferences, save_preferences},
        store::{MemoryStore, RecordStore},
    };

    #[test]
    fn load_persists_defaults() {
        let mut store = MemoryStore::default();

        let preferences = load_preferences(&mut store).unwrap();

        assert_eq!(preferences, Preferences::default());
        let raw = store.get("preferences").unwrap().unwrap();
        assert!(raw.contains("\"dateFormat\":\"MM/DD/YYYY\""), "{raw}");
        assert!(raw.contains("\"darkMode\":false"), "{raw}");
    }

    #[test]
    fn saved_preferences_are_loaded() {
        let mut store = MemoryStore::default();
        let preferences = Preferences {
            dark_mode: true,
            currency: "NZD ($)".to_owned(),
            ..Default::default()
        };

        save_preferences(&preferences, &mut store).unwrap();

        assert_eq!(load_preferences(&mut store), Ok(preferences));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut store = MemoryStore::with_entries([("preferences", r#"{"darkMode":true}"#)]);

        let preferences = load_preferences(&mut store).unwrap();

        assert!(preferences.dark_mode);
        assert_eq!(preferences.language, "English (US)");
    }
}
