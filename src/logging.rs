//! Sets up `tracing` output for the binaries.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::Error;

/// The filter used for the terminal when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global tracing subscriber.
///
/// Events are written to stderr, filtered by the `RUST_LOG` environment
/// variable (default [DEFAULT_LOG_FILTER]). If `log_file` is given, every
/// event at `debug` level or above is also appended to that file.
///
/// # Errors
/// Returns an [Error::LoggingError] if the log file cannot be opened or a
/// global subscriber is already installed.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), Error> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse(std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned()))
        .map_err(|error| Error::LoggingError(error.to_string()))?;

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|error| {
                    Error::LoggingError(format!("could not open {}: {error}", path.display()))
                })?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .try_init()
        .map_err(|error| Error::LoggingError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{Error, logging::init_logging};

    #[test]
    fn fails_when_log_file_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("debug.log");

        let result = init_logging(Some(&path));

        assert!(matches!(result, Err(Error::LoggingError(_))), "{result:?}");
    }
}
