//! Domain model types (pure).
//!
//! All types in this module are pure data; parsing and presentation live in
//! `parser` and `view`.

pub mod cell;
pub mod error;
pub mod table;

// Re-export for convenience
pub use cell::{Cell, Record};
pub use error::{AppError, InputError};
pub use table::TableData;

/// The column whose text value holds a JSON-encoded document.
pub const PAYLOAD_COLUMN: &str = "payload";

/// The column holding the scan identifier, extracted from the first row.
pub const SCAN_REFERENCE_COLUMN: &str = "scanreference";
