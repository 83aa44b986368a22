//! Cell values and header-keyed records.
//!
//! A `Cell` is a tagged value: plain text, or a decoded JSON document for the
//! payload column. The tag keeps downstream code from treating a decoded
//! object as a plain string.

use serde_json::Value;

/// A single cell value in a record.
///
/// Only the `payload` column may hold `Structured`; every other column holds
/// `Text`. A payload value that fails to decode as JSON stays `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Raw text exactly as tokenized from the line.
    Text(String),
    /// Successfully decoded JSON document.
    Structured(Value),
}

impl Cell {
    /// The string this cell contributes to search matching.
    ///
    /// `Structured` cells are serialized back to compact JSON text so queries
    /// can match inside decoded payloads; `Text` cells are used as-is.
    pub fn searchable_text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Structured(value) => value.to_string(),
        }
    }

    /// The raw text of a `Text` cell, or `None` for `Structured`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Structured(_) => None,
        }
    }

    /// The decoded JSON of a `Structured` cell, or `None` for `Text`.
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Cell::Text(_) => None,
            Cell::Structured(value) => Some(value),
        }
    }
}

/// One data row: an insertion-ordered mapping from column name to cell.
///
/// Insertion order is significant — the column planner derives the visible
/// column order from the first record's keys as encountered. Duplicate header
/// names are permitted; lookup returns the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Cell)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Does not deduplicate.
    pub fn push(&mut self, name: impl Into<String>, cell: Cell) {
        self.fields.push((name.into(), cell));
    }

    /// Look up the first cell stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, cell)| cell)
    }

    /// Column names in encountered order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Cells in encountered order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.fields.iter().map(|(_, cell)| cell)
    }

    /// Number of columns present in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record holds no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
