//! Third-party apps that can be connected.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    store::{RecordStore, StorageKey, read_collection, write_collection},
};

/// A third-party app and whether it is connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// The app's name, e.g. "Slack".
    pub name: String,
    /// A URL of the app's icon.
    pub icon: String,
    /// What connecting the app does.
    pub desc: String,
    /// Whether the app is connected.
    #[serde(default)]
    pub connected: bool,
}

fn default_integrations() -> Vec<Integration> {
    [
        (
            "Slack",
            "https://cdn-icons-png.flaticon.com/512/2111/2111615.png",
            "Get notifications in your Slack channels.",
        ),
        (
            "QuickBooks",
            "https://cdn-icons-png.flaticon.com/512/888/888870.png",
            "Sync expenses automatically.",
        ),
        (
            "Google Drive",
            "https://cdn-icons-png.flaticon.com/512/2965/2965278.png",
            "Backup receipt images to Drive.",
        ),
    ]
    .into_iter()
    .map(|(name, icon, desc)| Integration {
        name: name.to_owned(),
        icon: icon.to_owned(),
        desc: desc.to_owned(),
        connected: false,
    })
    .collect()
}

/// Get the integrations, all disconnected if none are stored.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn get_integrations(store: &impl RecordStore) -> Result<Vec<Integration>, Error> {
    let integrations = read_collection(StorageKey::Integrations, store)?;

    if integrations.is_empty() {
        Ok(default_integrations())
    } else {
        Ok(integrations)
    }
}

/// Connect or disconnect the integration called `name`, ignoring case.
///
/// Returns the updated integration, or `Ok(None)` without writing anything if
/// there is no integration with that name.
///
/// # Errors
/// Returns an error if the store could not be read or written.
pub fn toggle_integration(
    name: &str,
    store: &mut impl RecordStore,
) -> Result<Option<Integration>, Error> {
    let mut integrations = get_integrations(store)?;

    let Some(integration) = integrations
        .iter_mut()
        .find(|integration| integration.name.eq_ignore_ascii_case(name.trim()))
    else {
        tracing::debug!("Ignoring toggle of unknown integration {name}");
        return Ok(None);
    };

    integration.connected = !integration.connected;
    let toggled = integration.clone();
    write_collection(StorageKey::Integrations, &integrations, store)?;

    tracing::info!(
        "{} {}",
        if toggled.connected { "Connected" } else { "Disconnected" },
        toggled.name
    );
    Ok(Some(toggled))
}

#[cfg(test)]
mod tests {
    use crate::{
        settings::{get_integrations, toggle_integration},
        store::MemoryStore,
    };

    #[test]
    fn defaults_are_disconnected() {
        let store = MemoryStore::default();

        let integrations = get_integrations(&store).unwrap();

        let names: Vec<&str> = integrations
            .iter()
            .map(|integration| integration.name.as_str())
            .collect();
        assert_eq!(names, ["Slack", "QuickBooks", "Google Drive"]);
        assert!(integrations.iter().all(|integration| !integration.connected));
    }

    #[test]
    fn toggle_persists() {
        let mut store = MemoryStore::default();

        let toggled = toggle_integration("google drive", &mut store).unwrap().unwrap();

        assert!(toggled.connected);
        let stored = get_integrations(&store).unwrap();
        assert!(stored[2].connected);
        assert!(!stored[0].connected);
    }

    #[test]
    fn toggle_twice_disconnects() {
        let mut store = MemoryStore::default();

        toggle_integration("Slack", &mut store).unwrap();
        let toggled = toggle_integration("Slack", &mut store).unwrap().unwrap();

        assert!(!toggled.connected);
    }

    #[test]
    fn toggle_unknown_integration_is_noop() {
        let mut store = MemoryStore::default();

        assert_eq!(toggle_integration("Dropbox", &mut store), Ok(None));
    }
}
