//! Defines the app level error type.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password did not match the stored user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The password and its confirmation were not the same.
    #[error("the passwords do not match")]
    PasswordMismatch,

    /// A required form field was left empty.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The operation requires a logged in user.
    #[error("you must be logged in to do that")]
    NotAuthenticated,

    /// An empty string was used to create a category or tag name.
    #[error("category and tag names cannot be empty")]
    EmptyLabelName,

    /// A category or tag with the same name (ignoring case) already exists.
    #[error("\"{0}\" already exists")]
    DuplicateLabelName(String),

    /// The amount of a transaction was not a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The stored JSON for `key` could not be parsed.
    ///
    /// Only returned by the strict read functions, the lenient ones treat
    /// corrupt records as missing.
    #[error("the record \"{key}\" is corrupt: {reason}")]
    CorruptRecord {
        /// The storage key that holds the corrupt record.
        key: String,
        /// The parser's description of the problem.
        reason: String,
    },

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Logging could not be set up, e.g. because the log file could not be opened.
    #[error("could not set up logging: {0}")]
    LoggingError(String),

    /// The report could not be written as CSV.
    #[error("could not export CSV: {0}")]
    CsvExportError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvExportError(value.to_string())
    }
}
