//! TUI rendering and terminal management (impure shell).

pub mod datefmt;
mod table;

pub use table::ResultsTable;

use crate::config::ResolvedConfig;
use crate::model::AppError;
use crate::parser::parse_table;
use crate::source::FileLoader;
use crate::state::AppState;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Poll interval for the event loop; also paces loader polling.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error (input read failures surface here).
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Which component receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    /// Table navigation.
    Normal,
    /// Typing into the search bar; filtering is live.
    Search,
}

/// Main TUI application.
///
/// Generic over the backend so tests can drive it with `TestBackend`.
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    loader: FileLoader,
    config: ResolvedConfig,
    mode: InputMode,
    /// Search query requested on the command line, applied once the first
    /// load settles (loading resets per-file state).
    initial_search: Option<String>,
}

/// Run the viewer against `path` until the user quits.
///
/// Owns terminal setup and teardown: raw mode and the alternate screen are
/// always restored, also on the error path.
pub fn run(
    path: &Path,
    config: ResolvedConfig,
    initial_search: Option<String>,
) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut loader = FileLoader::new();
    loader.begin_load(path);
    info!(path = %path.display(), "started loading file");

    let mut app = TuiApp {
        terminal,
        state: AppState::new(),
        loader,
        config,
        mode: InputMode::Normal,
        initial_search,
    };

    let result = app.event_loop();
    restore_terminal();
    result
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

impl TuiApp<CrosstermBackend<Stdout>> {
    fn event_loop(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        loop {
            if event::poll(TICK_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
            } else {
                self.poll_loader()?;
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Apply a settled read, if any. Stale results were already discarded by
    /// the loader; whatever arrives here belongs to the current file.
    fn poll_loader(&mut self) -> Result<(), TuiError> {
        if let Some(outcome) = self.loader.poll() {
            let text = outcome.map_err(AppError::from)?;
            self.state.apply_load(parse_table(&text));
            if let Some(query) = self.initial_search.take() {
                self.state.set_search_query(query);
            }
            info!(
                records = self.state.visible_rows().len(),
                columns = self.state.columns().len(),
                "file parsed"
            );
        }
        Ok(())
    }

    /// Handle one key event. Returns true when the user quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // crossterm also emits release/repeat events on some platforms.
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Normal => return self.handle_normal_key(key),
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.set_search_query("");
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => self.mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut query = self.state.search_query().to_string();
                query.pop();
                self.state.set_search_query(query);
            }
            KeyCode::Char(ch) => {
                let mut query = self.state.search_query().to_string();
                query.push(ch);
                self.state.set_search_query(query);
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Esc => self.state.set_search_query(""),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(row) = self.state.selected_row() {
                    self.state.toggle_row_expanded(row);
                }
            }
            _ => {}
        }
        false
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.state;
        let mode = self.mode;
        let collapse_height = self.config.collapse_height;
        self.terminal.draw(|frame| {
            render(frame, state, mode, collapse_height);
        })?;
        Ok(())
    }
}

fn render(frame: &mut Frame, state: &AppState, mode: InputMode, collapse_height: u16) {
    if !state.ready() {
        let loading = Paragraph::new("Loading…")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, frame.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(scan_reference_header(state), chunks[0]);
    frame.render_widget(search_bar(state, mode), chunks[1]);
    frame.render_widget(ResultsTable::new(state, collapse_height), chunks[2]);
    frame.render_widget(help_line(), chunks[3]);
}

fn scan_reference_header(state: &AppState) -> Paragraph<'_> {
    let line = match state.scan_reference() {
        Some(reference) => Line::from(vec![
            Span::styled("Scan Ref: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(reference, Style::default().fg(Color::Green)),
        ]),
        None => Line::from(Span::styled(
            "No Scan Ref available",
            Style::default().fg(Color::Red),
        )),
    };
    Paragraph::new(line).block(Block::default().borders(Borders::ALL))
}

fn search_bar(state: &AppState, mode: InputMode) -> Paragraph<'_> {
    let (title, style) = match mode {
        InputMode::Search => ("Search (typing)", Style::default().bg(Color::DarkGray)),
        InputMode::Normal => ("Search", Style::default()),
    };
    let mut spans = vec![Span::raw(state.search_query())];
    if mode == InputMode::Search {
        spans.push(Span::styled(
            " ",
            Style::default().bg(Color::White).fg(Color::Black),
        ));
    }
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(style),
    )
}

fn help_line() -> Paragraph<'static> {
    Paragraph::new("/ search  Up/Down select  Enter expand/collapse  Esc clear  q quit")
        .style(Style::default().fg(Color::DarkGray))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn test_app(state: AppState) -> TuiApp<TestBackend> {
        TuiApp {
            terminal: Terminal::new(TestBackend::new(80, 24)).unwrap(),
            state,
            loader: FileLoader::new(),
            config: ResolvedConfig::default(),
            mode: InputMode::Normal,
            initial_search: None,
        }
    }

    fn loaded_app(text: &str) -> TuiApp<TestBackend> {
        let mut state = AppState::new();
        state.apply_load(parse_table(text));
        test_app(state)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_text(app: &TuiApp<TestBackend>) -> String {
        let buffer = app.terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn draws_loading_screen_before_ready() {
        let mut app = test_app(AppState::new());
        app.draw().unwrap();
        assert!(buffer_text(&app).contains("Loading"));
    }

    #[test]
    fn draws_scan_reference_when_present() {
        let mut app = loaded_app("scanreference,a\nref-42,x\n");
        app.draw().unwrap();
        let text = buffer_text(&app);
        assert!(text.contains("Scan Ref:"));
        assert!(text.contains("ref-42"));
    }

    #[test]
    fn draws_placeholder_without_scan_reference() {
        let mut app = loaded_app("a,b\n1,2\n");
        app.draw().unwrap();
        assert!(buffer_text(&app).contains("No Scan Ref available"));
    }

    #[test]
    fn q_quits_in_normal_mode() {
        let mut app = loaded_app("a\n1\n");
        assert!(app.handle_key(press(KeyCode::Char('q'))));
    }

    #[test]
    fn slash_enters_search_and_typing_filters_live() {
        let mut app = loaded_app("name\nalpha\nbeta\n");
        assert!(!app.handle_key(press(KeyCode::Char('/'))));
        assert_eq!(app.mode, InputMode::Search);
        app.handle_key(press(KeyCode::Char('b')));
        assert_eq!(app.state.search_query(), "b");
        assert_eq!(app.state.visible_rows(), vec![1]);
        // 'q' while typing is query text, not quit
        assert!(!app.handle_key(press(KeyCode::Char('q'))));
        assert_eq!(app.state.search_query(), "bq");
    }

    #[test]
    fn escape_in_search_clears_query_and_leaves_mode() {
        let mut app = loaded_app("name\nalpha\n");
        app.handle_key(press(KeyCode::Char('/')));
        app.handle_key(press(KeyCode::Char('x')));
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.state.search_query(), "");
    }

    #[test]
    fn enter_toggles_selected_row_expansion() {
        let mut app = loaded_app("payload\n\"{\"\"x\"\":1}\"\n\"{\"\"y\"\":2}\"\n");
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Enter));
        assert!(app.state.is_row_expanded(1));
        assert!(!app.state.is_row_expanded(0));
        app.handle_key(press(KeyCode::Enter));
        assert!(!app.state.is_row_expanded(1));
    }

    #[test]
    fn ctrl_c_quits_in_any_mode() {
        let mut app = loaded_app("a\n1\n");
        app.handle_key(press(KeyCode::Char('/')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(ctrl_c));
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut app = loaded_app("a\n1\n");
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert!(!app.handle_key(release));
    }
}
