//! Per-row expansion toggles for payload rendering.

use std::collections::HashSet;

/// Set of expanded row indices.
///
/// Indices address the unfiltered record sequence (original file order), so
/// a toggle keeps pointing at the same record while the search query
/// changes. Every row starts collapsed; the only transition is an explicit
/// user toggle — there is no automatic expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    expanded: HashSet<usize>,
}

impl ExpansionSet {
    /// All rows collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `row` is currently expanded.
    pub fn is_expanded(&self, row: usize) -> bool {
        self.expanded.contains(&row)
    }

    /// Flip `row` between collapsed and expanded.
    pub fn toggle(&mut self, row: usize) {
        if !self.expanded.insert(row) {
            self.expanded.remove(&row);
        }
    }

    /// Collapse everything (used when a new file is loaded).
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}
