//! Interactive application loop.
//!
//! One tokio task owns the terminal and the session; searches run in
//! spawned tasks that report back over a channel, stamped with the ticket
//! sequence so a superseded search can never clobber a newer one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use voyager_core::{
    ArchiveError, ArchiveItem, ArchiveSearcher, Config, ItemLinks, PreferenceStore, SearchSession,
    SearchTicket,
};

use crate::ui;

/// Which control owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Creator,
    MediaType,
    Results,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Query => Focus::Creator,
            Focus::Creator => Focus::MediaType,
            Focus::MediaType => Focus::Results,
            Focus::Results => Focus::Query,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Query => Focus::Results,
            Focus::Creator => Focus::Query,
            Focus::MediaType => Focus::Creator,
            Focus::Results => Focus::MediaType,
        }
    }
}

/// Outcome of one spawned search task.
pub struct SearchOutcome {
    seq: u64,
    outcome: Result<Vec<ArchiveItem>, ArchiveError>,
}

pub struct App {
    pub session: SearchSession,
    pub config: Config,
    pub focus: Focus,
    /// Cursor position within the result grid.
    pub cursor: usize,
    /// First visible card row.
    pub scroll_row: usize,
    /// Grid geometry, written back by the renderer each frame.
    pub grid_cols: usize,
    pub grid_rows: usize,

    searcher: Arc<dyn ArchiveSearcher>,
    outcome_tx: mpsc::Sender<SearchOutcome>,
    in_flight: Option<JoinHandle<()>>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        store: Arc<dyn PreferenceStore>,
        searcher: Arc<dyn ArchiveSearcher>,
    ) -> (Self, mpsc::Receiver<SearchOutcome>) {
        let debounce_window = Duration::from_millis(config.ui.debounce_ms);
        let session = SearchSession::restore(store, debounce_window);
        let (outcome_tx, outcome_rx) = mpsc::channel(4);

        let app = Self {
            session,
            config,
            focus: Focus::Query,
            cursor: 0,
            scroll_row: 0,
            grid_cols: 1,
            grid_rows: 1,
            searcher,
            outcome_tx,
            in_flight: None,
            should_quit: false,
        };
        (app, outcome_rx)
    }

    pub async fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut outcome_rx: mpsc::Receiver<SearchOutcome>,
    ) -> Result<()> {
        let mut events = EventStream::new();

        // One startup search when the restored filters allow it.
        if self.session.wants_initial_search() {
            if let Some(ticket) = self.session.submit() {
                self.start_search(ticket);
            }
        }

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, &mut self))?;

            let deadline = self.session.debounce_deadline();
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {} // resize etc; redrawn next pass
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
                Some(done) = outcome_rx.recv() => {
                    self.session.apply_result(done.seq, done.outcome);
                    self.clamp_cursor();
                }
                _ = sleep_until(deadline), if deadline.is_some() => {
                    if let Some(ticket) = self.session.poll_debounce(Instant::now()) {
                        self.start_search(ticket);
                    }
                }
            }
        }

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        Ok(())
    }

    fn start_search(&mut self, ticket: SearchTicket) {
        // Drop the previous transport operation; its outcome would be
        // discarded by the sequence stamp anyway.
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        let searcher = Arc::clone(&self.searcher);
        let tx = self.outcome_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = searcher.search(&ticket.request).await;
            let _ = tx
                .send(SearchOutcome {
                    seq: ticket.seq,
                    outcome,
                })
                .await;
        }));

        self.cursor = 0;
        self.scroll_row = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // The detail view owns input while open; grid navigation and the
        // grid's scroll position are untouched until it closes.
        if self.session.selected().is_some() {
            self.handle_detail_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                Focus::Results => self.open_selected(),
                _ => {
                    if let Some(ticket) = self.session.submit() {
                        self.start_search(ticket);
                    }
                }
            },
            _ => match self.focus {
                Focus::Query => self.edit_query(key),
                Focus::Creator => self.edit_creator(key),
                Focus::MediaType => self.edit_media_type(key),
                Focus::Results => self.navigate_results(key),
            },
        }
    }

    fn edit_query(&mut self, key: KeyEvent) {
        let mut text = self.session.query().to_string();
        match key.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }
        self.session.set_query(text, Instant::now());
    }

    fn edit_creator(&mut self, key: KeyEvent) {
        let mut text = self.session.creator().to_string();
        match key.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }
        self.session.set_creator(text, Instant::now());
    }

    fn edit_media_type(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Left => {
                self.session
                    .set_media_type(self.session.media_type().prev(), now);
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.session
                    .set_media_type(self.session.media_type().next(), now);
            }
            _ => {}
        }
    }

    fn navigate_results(&mut self, key: KeyEvent) {
        let len = self.session.results().len();
        if len == 0 {
            return;
        }
        let cols = self.grid_cols.max(1);

        match key.code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len - 1),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(cols),
            KeyCode::Down => self.cursor = (self.cursor + cols).min(len - 1),
            KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(cols * self.grid_rows),
            KeyCode::PageDown => {
                self.cursor = (self.cursor + cols * self.grid_rows).min(len - 1);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len - 1,
            _ => {}
        }
        self.ensure_cursor_visible();
    }

    /// Open the detail view for the card under the cursor; the item's
    /// identifier is the only correlation between card and detail view.
    fn open_selected(&mut self) {
        let identifier = match self.session.results().get(self.cursor) {
            Some(item) => item.identifier.clone(),
            None => return,
        };
        self.session.select(&identifier);
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let identifier = match self.session.selected() {
            Some(item) => item.identifier.clone(),
            None => return,
        };
        let links = ItemLinks::build(&self.config.archive, &identifier);

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.session.close_detail(),
            KeyCode::Char('o') => open_external(&links.viewer),
            KeyCode::Char('d') => open_external(&links.page),
            KeyCode::Char('z') => open_external(&links.archive_zip),
            _ => {}
        }
    }

    fn ensure_cursor_visible(&mut self) {
        let cols = self.grid_cols.max(1);
        let rows = self.grid_rows.max(1);
        let row = self.cursor / cols;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + rows {
            self.scroll_row = row + 1 - rows;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.session.results().len();
        if len == 0 {
            self.cursor = 0;
            self.scroll_row = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
            self.ensure_cursor_visible();
        }
    }
}

fn open_external(url: &str) {
    if let Err(e) = open::that(url) {
        warn!(url, error = %e, "failed to open external resource");
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyager_core::testing::{fixtures, MemoryPreferenceStore, MockSearcher};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_results(items: Vec<ArchiveItem>) -> App {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let searcher: Arc<dyn ArchiveSearcher> = Arc::new(MockSearcher::new());
        let (mut app, _rx) = App::new(Config::default(), store, searcher);

        app.session.set_query("cats".to_string(), Instant::now());
        let ticket = app.session.submit().unwrap();
        app.session.apply_result(ticket.seq, Ok(items));
        app.focus = Focus::Results;
        app.grid_cols = 2;
        app.grid_rows = 2;
        app
    }

    #[tokio::test]
    async fn test_cards_key_on_unique_identifiers() {
        let app = app_with_results(vec![
            fixtures::item("a", "First"),
            fixtures::item("b", "Second"),
            fixtures::film("c", "Third", "1931"),
        ]);

        let mut seen = std::collections::HashSet::new();
        for item in app.session.results() {
            assert!(seen.insert(item.identifier.clone()), "duplicate card key");
        }
    }

    #[tokio::test]
    async fn test_enter_opens_detail_for_card_under_cursor() {
        let mut app = app_with_results(vec![
            fixtures::item("a", "First"),
            fixtures::item("b", "Second"),
        ]);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.session.selected().unwrap().identifier, "b");
    }

    #[tokio::test]
    async fn test_escape_closes_detail_then_quits() {
        let mut app = app_with_results(vec![fixtures::item("a", "First")]);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.session.selected().is_some());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.session.selected().is_none());
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_grid_navigation_suppressed_while_detail_open() {
        let mut app = app_with_results(vec![
            fixtures::item("a", "A"),
            fixtures::item("b", "B"),
            fixtures::item("c", "C"),
        ]);
        app.handle_key(key(KeyCode::Enter));
        let cursor_before = app.cursor;
        let scroll_before = app.scroll_row;

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));

        assert_eq!(app.cursor, cursor_before);
        assert_eq!(app.scroll_row, scroll_before);
    }

    #[tokio::test]
    async fn test_navigation_clamps_to_result_bounds() {
        let mut app = app_with_results(vec![
            fixtures::item("a", "A"),
            fixtures::item("b", "B"),
            fixtures::item("c", "C"),
        ]);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor, 0);

        app.handle_key(key(KeyCode::End));
        assert_eq!(app.cursor, 2);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.cursor, 2);
    }

    #[tokio::test]
    async fn test_typing_edits_focused_field() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let searcher: Arc<dyn ArchiveSearcher> = Arc::new(MockSearcher::new());
        let (mut app, _rx) = App::new(Config::default(), store, searcher);

        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('i')));
        assert_eq!(app.session.query(), "hi");

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.session.creator(), "x");
        assert_eq!(app.session.query(), "hi");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.session.creator(), "");
    }

    #[tokio::test]
    async fn test_media_type_cycles_with_arrows() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let searcher: Arc<dyn ArchiveSearcher> = Arc::new(MockSearcher::new());
        let (mut app, _rx) = App::new(Config::default(), store, searcher);
        app.focus = Focus::MediaType;

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.media_type(), voyager_core::MediaType::Audio);

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.session.media_type(), voyager_core::MediaType::All);
    }
}
