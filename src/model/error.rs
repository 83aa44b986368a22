//! Error types for the scanview application.
//!
//! Structured error taxonomy built on `thiserror`. The split follows the
//! application's recovery strategy:
//!
//! - [`InputError`] — the CSV file could not be read at all. Fatal: without
//!   input there is nothing to display.
//! - Terminal I/O failures — fatal; surfaced through [`AppError::Terminal`].
//!
//! Parse-level problems are deliberately **not** errors. A payload cell that
//! fails to decode as JSON keeps its raw text and logs a warning; a row with
//! more or fewer fields than the header is resolved by the synthetic-column
//! and omission rules; a file with no data rows yields an empty table. The
//! core pipeline has no fatal states.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// All domain errors convert to `AppError` via `From`, so startup and the
/// event loop propagate with `?` without manual mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the CSV input file.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Terminal or TUI rendering error from the crossterm/ratatui layer.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered while reading the CSV export from disk.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// Generic I/O failure (permissions, disk errors, decode failures).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
