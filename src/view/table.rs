//! Results table widget.
//!
//! Renders the parsed records with the planned column order. The payload
//! column shows pretty-printed JSON, capped to a configurable height while
//! the row is collapsed and in full once expanded; date-like columns are
//! normalized at display time.

use crate::model::{Cell, PAYLOAD_COLUMN};
use crate::state::AppState;
use crate::view::datefmt;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell as TableCell, Row, StatefulWidget, Table, TableState, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a collapsed payload preview line may render.
const PAYLOAD_PREVIEW_WIDTH: usize = 120;

/// Table over the currently visible (filtered) records.
pub struct ResultsTable<'a> {
    state: &'a AppState,
    collapse_height: u16,
}

impl<'a> ResultsTable<'a> {
    /// Create the widget for the given state snapshot.
    ///
    /// `collapse_height` is the number of payload lines shown while a row is
    /// collapsed.
    pub fn new(state: &'a AppState, collapse_height: u16) -> Self {
        Self {
            state,
            collapse_height,
        }
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.state.columns();

        let header = Row::new(
            columns
                .iter()
                .map(|name| TableCell::from(name.as_str()))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

        let rows: Vec<Row> = self
            .state
            .visible_rows()
            .into_iter()
            .filter_map(|row_idx| {
                let record = self.state.record(row_idx)?;
                let expanded = self.state.is_row_expanded(row_idx);
                let mut height = 1u16;
                let cells: Vec<TableCell> = columns
                    .iter()
                    .map(|column| {
                        let lines = cell_lines(
                            column,
                            record.get(column),
                            expanded,
                            self.collapse_height,
                        );
                        height = height.max(lines.len() as u16);
                        TableCell::from(Text::from(lines.join("\n")))
                    })
                    .collect();
                Some(Row::new(cells).height(height))
            })
            .collect();

        let widths: Vec<Constraint> = columns
            .iter()
            .map(|column| {
                if column.as_str() == PAYLOAD_COLUMN {
                    Constraint::Percentage(40)
                } else {
                    Constraint::Fill(1)
                }
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        let mut table_state = TableState::default();
        table_state.select(Some(self.state.selected()));
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

/// Display lines for one cell.
fn cell_lines(column: &str, cell: Option<&Cell>, expanded: bool, collapse_height: u16) -> Vec<String> {
    let Some(cell) = cell else {
        // Missing columns are absent from short rows; render nothing.
        return vec![String::new()];
    };

    if column == PAYLOAD_COLUMN {
        return payload_lines(cell, expanded, collapse_height);
    }

    match cell {
        Cell::Text(text) if datefmt::is_date_like(column) => vec![datefmt::normalize_date(text)],
        Cell::Text(text) => vec![text.clone()],
        // Only the payload column holds Structured; render defensively anyway.
        Cell::Structured(value) => vec![value.to_string()],
    }
}

fn payload_lines(cell: &Cell, expanded: bool, collapse_height: u16) -> Vec<String> {
    let rendered = match cell {
        Cell::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        // Decode failed at parse time; the raw text is what we have.
        Cell::Text(text) => text.clone(),
    };

    let lines: Vec<String> = rendered
        .lines()
        .map(|line| truncate_to_width(line, PAYLOAD_PREVIEW_WIDTH))
        .collect();

    if expanded || lines.len() <= collapse_height as usize {
        return lines;
    }

    let shown = collapse_height.max(1) as usize;
    let hidden = lines.len() - shown;
    let mut capped: Vec<String> = lines.into_iter().take(shown).collect();
    capped.push(format!("… ({hidden} more lines)"));
    capped
}

/// Cap a line at `max` terminal columns, appending an ellipsis when cut.
fn truncate_to_width(line: &str, max: usize) -> String {
    if line.width() <= max {
        return line.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
