//! CSV-to-structured-table pipeline.
//!
//! Pure functions that turn one file's text into a [`TableData`]:
//!
//! 1. [`tokenize_line`] — quote-aware split of one physical line
//! 2. [`build_records`] — header reconciliation and payload decoding
//! 3. [`plan_columns`] — visible column order from the first record
//! 4. [`parse_table`] — the whole pipeline, blank-line filtering included
//!
//! All failure modes degrade to a visible-but-reduced result; nothing in
//! this module returns an error.

use crate::model::{Cell, Record, TableData, PAYLOAD_COLUMN, SCAN_REFERENCE_COLUMN};
use tracing::warn;

/// Split one line into raw field tokens, honoring double-quote enclosure.
///
/// An explicit character scanner tracks whether the cursor is inside a
/// quoted region: a comma splits only at even quote parity. Each token is
/// then trimmed of surrounding whitespace, stripped of a single enclosing
/// quote pair (when both ends carry one), and doubled quotes inside it are
/// collapsed to one (RFC 4180 unescaping).
///
/// Limitation: a field value is confined to one physical line. The file is
/// split into lines before tokenization, so a quoted field containing a
/// literal newline arrives here already broken across two lines; this module
/// does not attempt to rejoin it.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                tokens.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    tokens.push(current);

    tokens.iter().map(|raw| clean_token(raw)).collect()
}

/// Trim, strip one enclosing quote pair, collapse doubled quotes.
fn clean_token(raw: &str) -> String {
    let trimmed = raw.trim();
    // Strips only when both a leading and a trailing quote are present; a
    // lone quote character survives (prefix-stripping leaves nothing for the
    // suffix to match).
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.replace("\"\"", "\"")
}

/// Build records from the header tokens and the remaining data lines.
///
/// Tokens are zipped against header positions. A row with more tokens than
/// the header gains synthetic `col<N>` names (N = zero-based token index); a
/// row with fewer tokens simply omits the unmatched header keys — missing
/// columns are absent, not zero-filled.
///
/// The `payload` column's text is decoded as JSON on a best-effort basis:
/// success stores [`Cell::Structured`], failure keeps the raw text and logs
/// a warning. A decode failure never aborts the row or the file.
pub fn build_records<'a, I>(header: &[String], lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| build_record(header, line))
        .collect()
}

fn build_record(header: &[String], line: &str) -> Record {
    let mut record = Record::new();
    for (idx, token) in tokenize_line(line).into_iter().enumerate() {
        let name = match header.get(idx) {
            Some(name) => name.clone(),
            None => format!("col{idx}"),
        };
        let cell = if name == PAYLOAD_COLUMN {
            decode_payload(token)
        } else {
            Cell::Text(token)
        };
        record.push(name, cell);
    }
    record
}

/// Best-effort JSON decode for the payload column.
fn decode_payload(text: String) -> Cell {
    match serde_json::from_str(&text) {
        Ok(value) => Cell::Structured(value),
        Err(error) => {
            warn!(%error, payload = %text, "invalid JSON in payload column, keeping raw text");
            Cell::Text(text)
        }
    }
}

/// Extract the scan reference from the first record, if any.
///
/// Inspected once per loaded file, never re-derived per row. Present only
/// when the first record carries a non-empty `scanreference` text value.
pub fn extract_scan_reference(records: &[Record]) -> Option<String> {
    let cell = records.first()?.get(SCAN_REFERENCE_COLUMN)?;
    match cell.as_text() {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => None,
    }
}

/// Derive the visible column order from the first record.
///
/// Takes the record's keys in encountered order, removes `scanreference`,
/// then stably moves every `payload` key after all other columns while
/// leaving the remaining relative positions unchanged. Zero records yield an
/// empty order.
pub fn plan_columns(records: &[Record]) -> Vec<String> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    let mut columns = Vec::new();
    let mut payload = Vec::new();
    for key in first.keys() {
        if key == SCAN_REFERENCE_COLUMN {
            continue;
        }
        if key == PAYLOAD_COLUMN {
            payload.push(key.to_string());
        } else {
            columns.push(key.to_string());
        }
    }
    columns.extend(payload);
    columns
}

/// Run the whole pipeline over one file's text.
///
/// Blank (empty after trimming) lines are filtered out of the whole file
/// first; line 1 of what remains is the header, the rest are data rows.
/// Fewer than two non-blank lines is not an error: the result is an empty
/// table and the presentation shows it as such.
pub fn parse_table(text: &str) -> TableData {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return TableData::empty();
    }

    let header = tokenize_line(lines[0]);
    let records = build_records(&header, lines[1..].iter().copied());
    let scan_reference = extract_scan_reference(&records);
    let columns = plan_columns(&records);

    TableData {
        columns,
        records,
        scan_reference,
    }
}
