//! Tracing subscriber initialization.
//!
//! Logs go to a file instead of the terminal so they never corrupt the TUI;
//! monitor them with `tail -f` in a separate terminal. Payload decode
//! warnings and stale-load discards land here.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log path has no usable file name component.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize file-based tracing.
///
/// Respects `RUST_LOG`, defaults to `info`. Creates the log directory when
/// missing. Returns an error if a subscriber is already set.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("scanview_test_logs_create");
        let log_file = test_dir.join("test.log");
        let _ = fs::remove_dir_all(&test_dir);

        // May fail if a subscriber is already set; the directory must exist
        // regardless.
        let _ = init(&log_file);

        assert!(test_dir.exists(), "log directory should be created");
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let test_dir = std::env::temp_dir().join("scanview_test_logs_double");
        let log_file = test_dir.join("test.log");

        let first = init(&log_file);
        let second = init(&log_file);

        // Whichever call set the subscriber, the other must report it.
        assert!(
            first.is_err() || second.is_err(),
            "double init cannot both succeed"
        );
        if first.is_ok() {
            assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        }
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn invalid_path_reports_error() {
        let result = init(Path::new(".."));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }
}
