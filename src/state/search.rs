//! Search predicate over heterogeneous cell values.

use crate::model::Record;

/// True when `record` matches `query`.
///
/// Case-insensitive substring test: each cell contributes its searchable
/// string (structured payloads serialized to JSON text, plain cells as-is)
/// and the record matches when any of them contains the lower-cased query.
/// The empty query matches every record.
///
/// Re-evaluated against every record on every query change; at this scale no
/// index is warranted.
pub fn record_matches(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .cells()
        .any(|cell| cell.searchable_text().to_lowercase().contains(&needle))
}
