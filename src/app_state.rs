//! Implements a struct that holds the state shared by every command.

use time::Date;

use crate::{
    Error,
    pagination::PaginationConfig,
    store::{RecordStore, SqliteStore},
    timezone::{get_local_offset, today_in},
};

/// The state of the application: where records live and how to show them.
#[derive(Debug)]
pub struct AppState<S: RecordStore> {
    /// The record store.
    pub store: S,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl<S: RecordStore> AppState<S> {
    /// Create a new [AppState].
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if `local_timezone` is not a
    /// valid, canonical timezone name.
    pub fn new(
        store: S,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            store,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        })
    }

    /// Today's date in the local timezone.
    ///
    /// # Errors
    /// Returns an error if the timezone can no longer be resolved.
    pub fn today(&self) -> Result<Date, Error> {
        today_in(&self.local_timezone)
    }
}

impl AppState<SqliteStore> {
    /// Open the SQLite database at `db_path` and create the [AppState] around it.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized, or
    /// the timezone is invalid.
    pub fn open(
        db_path: &str,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        let store = SqliteStore::open(db_path)?;

        Self::new(store, local_timezone, pagination_config)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AppState, Error, pagination::PaginationConfig, store::MemoryStore};

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(
            MemoryStore::default(),
            "Middle/Earth",
            PaginationConfig::default(),
        );

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }

    #[test]
    fn accepts_canonical_timezone() {
        let state = AppState::new(
            MemoryStore::default(),
            "Pacific/Auckland",
            PaginationConfig::default(),
        )
        .unwrap();

        assert_eq!(state.local_timezone, "Pacific/Auckland");
        assert!(state.today().is_ok());
    }
}
