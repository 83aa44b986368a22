//! Application state snapshot and its pure transforms.

use crate::model::{Record, TableData};
use crate::state::{record_matches, ExpansionSet};

/// Everything scoped to one loaded file.
///
/// The parse product (`table`) is immutable once applied; the search query
/// and expansion set are the only mutable pieces, and both reset when a new
/// file's parse result is applied. `table == None` is the "not ready" state:
/// the read/parse is still outstanding.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    table: Option<TableData>,
    search_query: String,
    expanded: ExpansionSet,
    /// Position of the selection within the currently visible (filtered)
    /// row sequence.
    selected: usize,
}

impl AppState {
    /// State before any file has finished loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once records are available, even if the record sequence is empty.
    pub fn ready(&self) -> bool {
        self.table.is_some()
    }

    /// Apply a finished parse, superseding the previous file's state.
    ///
    /// Search query, expansion set and selection are explicitly reset — they
    /// are scoped to one loaded file, not to the application.
    pub fn apply_load(&mut self, table: TableData) {
        self.table = Some(table);
        self.search_query.clear();
        self.expanded.clear();
        self.selected = 0;
    }

    /// Visible column order, per the column planner.
    pub fn columns(&self) -> &[String] {
        self.table.as_ref().map(|t| t.columns.as_slice()).unwrap_or(&[])
    }

    /// Scan reference extracted from the first record, if any.
    pub fn scan_reference(&self) -> Option<&str> {
        self.table.as_ref()?.scan_reference.as_deref()
    }

    /// Current search query text.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Replace the search query. Selection snaps back to the top since the
    /// visible sequence may have changed entirely.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.selected = 0;
    }

    /// Indices (into the unfiltered record sequence) of rows matching the
    /// current query, in original file order.
    pub fn visible_rows(&self) -> Vec<usize> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        table
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record_matches(record, &self.search_query))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Records matching the current query, in original file order.
    pub fn rows(&self) -> Vec<&Record> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        self.visible_rows()
            .into_iter()
            .map(|idx| &table.records[idx])
            .collect()
    }

    /// Record at unfiltered index `row`, if it exists.
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.table.as_ref()?.records.get(row)
    }

    /// True when `row` (unfiltered index) is expanded.
    pub fn is_row_expanded(&self, row: usize) -> bool {
        self.expanded.is_expanded(row)
    }

    /// Toggle expansion of `row` (unfiltered index).
    pub fn toggle_row_expanded(&mut self, row: usize) {
        self.expanded.toggle(row);
    }

    /// Selection position within the visible row sequence.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Unfiltered index of the selected row, if any row is visible.
    pub fn selected_row(&self) -> Option<usize> {
        self.visible_rows().get(self.selected).copied()
    }

    /// Move the selection by `delta`, clamped to the visible sequence.
    pub fn move_selection(&mut self, delta: isize) {
        let visible = self.visible_rows().len();
        if visible == 0 {
            self.selected = 0;
            return;
        }
        let max = visible - 1;
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, max as isize) as usize;
    }
}
