//! The immutable parse product for one loaded file.

use crate::model::Record;

/// Parsed table: visible column order, records in file order, and the scan
/// reference extracted from the first record.
///
/// Built once per loaded file and never mutated afterwards; search and
/// expansion state live in [`crate::state::AppState`] and reset on a new
/// load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    /// Visible columns: first record's key order, `scanreference` removed,
    /// `payload` moved last.
    pub columns: Vec<String>,
    /// Data records in original file order.
    pub records: Vec<Record>,
    /// Value of the `scanreference` column in the first record, if present
    /// and non-empty. Computed once, never re-derived per row.
    pub scan_reference: Option<String>,
}

impl TableData {
    /// An empty table (no columns, no records, no scan reference).
    pub fn empty() -> Self {
        Self::default()
    }
}
