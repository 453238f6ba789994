//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod layout;
pub mod results;
pub mod search_form;
pub mod styles;

pub use help::render_help_overlay;
pub use layout::render_layout;
pub use results::{format_count, ResultList};
pub use search_form::SearchForm;
pub use styles::{CardStyles, ColorConfig};

use crate::api::{GithubClient, SearchBackend};
use crate::config::keybindings::KeyBindings;
use crate::model::{ApiError, AppError, KeyAction, Query, RepoDetails, Repository};
use crate::pagination::{EngineOptions, PaginationEngine};
use crate::state::input::{
    activate_input, cancel_input, clear_input, handle_backspace, handle_char_input,
    handle_cursor_end, handle_cursor_home, handle_cursor_left, handle_cursor_right, handle_delete,
    submit_input,
};
use crate::state::{AppState, DetailState, FocusPane, SearchStore};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Poll interval for terminal events. Background fetch results are picked up
/// on each tick.
const TICK: Duration = Duration::from_millis(50);

/// Rough height of one result card, used for page-wise selection moves.
const CARD_HEIGHT: u16 = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

type DetailResult = (u64, Result<RepoDetails, ApiError>);

/// Main TUI application
///
/// Generic over the terminal backend (tests use `TestBackend`) and over the
/// search backend (tests use a scripted one).
pub struct TuiApp<B, S = GithubClient>
where
    B: ratatui::backend::Backend,
    S: SearchBackend + 'static,
{
    terminal: Terminal<B>,
    app_state: AppState,
    store: SearchStore,
    query_rx: watch::Receiver<Query>,
    engine: PaginationEngine<S>,
    runtime: Handle,
    key_bindings: KeyBindings,
    styles: CardStyles,
    detail_tx: mpsc::UnboundedSender<DetailResult>,
    detail_rx: mpsc::UnboundedReceiver<DetailResult>,
    /// Background fetches not yet finished.
    tasks: Vec<JoinHandle<()>>,
    last_revision: u64,
    /// Last rendered result list area (for page-wise selection)
    last_results_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>, GithubClient> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        client: GithubClient,
        options: EngineOptions,
        initial: Query,
        styles: CardStyles,
        runtime: Handle,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let engine = PaginationEngine::with_options(Arc::new(client), options);
        Ok(Self::assemble(
            terminal,
            engine,
            initial,
            KeyBindings::default(),
            styles,
            runtime,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws on input and whenever
    /// a background fetch changed the search state.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                    }
                    _ => continue,
                }
                self.process_updates();
                self.draw()?;
            } else if self.process_updates() {
                self.draw()?;
            }
        }
    }
}

impl<B, S> TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: SearchBackend + 'static,
{
    fn assemble(
        terminal: Terminal<B>,
        engine: PaginationEngine<S>,
        initial: Query,
        key_bindings: KeyBindings,
        styles: CardStyles,
        runtime: Handle,
    ) -> Self {
        let app_state = AppState::new(initial.text());
        let store = SearchStore::new(initial);
        let query_rx = store.subscribe();
        let (detail_tx, detail_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            terminal,
            app_state,
            store,
            query_rx,
            engine,
            runtime,
            key_bindings,
            styles,
            detail_tx,
            detail_rx,
            tasks: Vec::new(),
            last_revision: 0,
            last_results_area: None,
        };
        let initial = app.store.current();
        app.apply_query(initial);
        app
    }

    // ===== Background work =====

    /// Hand a new query to the engine and start fetching its first page.
    fn apply_query(&mut self, query: Query) {
        if !self.engine.set_query(query.clone()) {
            return;
        }
        self.app_state.reset_for_query();
        if query.is_searchable() {
            info!(text = query.text(), search_type = %query.search_type(), "Searching");
            self.spawn_fetch_first_page();
        }
    }

    fn spawn_fetch_first_page(&mut self) {
        let engine = self.engine.clone();
        let task = self.runtime.spawn(async move {
            if let Err(err) = engine.fetch_next_page().await {
                debug!(error = %err, "First page fetch failed");
            }
        });
        self.tasks.push(task);
    }

    fn spawn_load_more(&mut self) {
        let engine = self.engine.clone();
        let task = self.runtime.spawn(async move {
            if let Err(err) = engine.load_more_items(None).await {
                debug!(error = %err, "Load more failed");
            }
        });
        self.tasks.push(task);
    }

    fn spawn_detail(&mut self, repo: Repository) {
        let backend = Arc::clone(self.engine.backend());
        let tx = self.detail_tx.clone();
        let task = self.runtime.spawn(async move {
            let result = backend.repo_details(&repo).await;
            if let Err(err) = &result {
                warn!(repo = %repo.full_name, error = %err, "Repository details failed");
            }
            // Receiver gone means the app is shutting down.
            let _ = tx.send((repo.id, result));
        });
        self.tasks.push(task);
    }

    /// Pull in store changes, finished detail requests and engine progress.
    ///
    /// Returns true when the screen needs a redraw.
    fn process_updates(&mut self) -> bool {
        let mut dirty = false;
        self.tasks.retain(|task| !task.is_finished());

        if self.query_rx.has_changed().unwrap_or(false) {
            let query = self.query_rx.borrow_and_update().clone();
            self.apply_query(query);
            dirty = true;
        }

        while let Ok((repo_id, result)) = self.detail_rx.try_recv() {
            self.app_state.detail_finished(repo_id, result);
            dirty = true;
        }

        self.sync_detail();

        dirty || self.engine.revision() != self.last_revision
    }

    /// Request details when the selection lands on a new repository card.
    fn sync_detail(&mut self) {
        if self.app_state.focus != FocusPane::Results {
            return;
        }
        let snapshot = self.engine.snapshot();
        match self.app_state.selected_repository(&snapshot) {
            Some(repo) => {
                if self.app_state.request_detail(repo.id) {
                    self.spawn_detail(repo.clone());
                }
            }
            None => self.app_state.detail = DetailState::None,
        }
    }

    fn maybe_auto_load(&mut self) {
        let snapshot = self.engine.snapshot();
        if self.app_state.should_auto_load(&snapshot) {
            debug!(selected = self.app_state.selected, "Selection reached end of list");
            self.spawn_load_more();
        }
    }

    fn retry(&mut self) {
        if self.engine.snapshot().pages.is_empty() {
            if self.engine.query().is_searchable() {
                self.spawn_fetch_first_page();
            }
        } else {
            self.spawn_load_more();
        }
    }

    // ===== Keys =====

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.app_state.help_visible = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.app_state.focus == FocusPane::Input {
            return self.handle_input_key(key);
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.dispatch(action)
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = KeyBindings::input_action(key) {
            return self.dispatch(action);
        }

        let input = self.app_state.input.clone();
        self.app_state.input = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                clear_input(input)
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app_state.notice = None;
                handle_char_input(input, ch)
            }
            KeyCode::Backspace => handle_backspace(input),
            KeyCode::Delete => handle_delete(input),
            KeyCode::Left => handle_cursor_left(input),
            KeyCode::Right => handle_cursor_right(input),
            KeyCode::Home => handle_cursor_home(input),
            KeyCode::End => handle_cursor_end(input),
            _ => input,
        };
        false
    }

    fn dispatch(&mut self, action: KeyAction) -> bool {
        let visible = self.engine.visible_count();
        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.app_state.toggle_help(),

            KeyAction::FocusInput => self.app_state.focus_input(),
            KeyAction::SubmitSearch => self.submit(),
            KeyAction::CancelInput => {
                let previous = self.store.current();
                self.app_state.input = cancel_input(self.app_state.input.clone(), previous.text());
                self.app_state.focus_results();
            }
            KeyAction::ToggleSearchType => {
                let next = self.store.current().search_type().toggled();
                self.store.set_search_type(next);
            }

            KeyAction::SelectNext => {
                self.app_state.select_next(visible);
                self.maybe_auto_load();
            }
            KeyAction::SelectPrev => self.app_state.select_prev(),
            KeyAction::PageDown => {
                self.app_state.page_down(visible, self.cards_per_page());
                self.maybe_auto_load();
            }
            KeyAction::PageUp => self.app_state.page_up(self.cards_per_page()),
            KeyAction::SelectFirst => self.app_state.select_first(),
            KeyAction::SelectLast => {
                self.app_state.select_last(visible);
                self.maybe_auto_load();
            }

            KeyAction::LoadMore => self.spawn_load_more(),
            KeyAction::Refresh => self.retry(),
        }
        false
    }

    fn submit(&mut self) {
        let (input, text) = submit_input(self.app_state.input.clone());
        let Some(text) = text else {
            return;
        };

        match self.store.submit(&text) {
            Ok(changed) => {
                self.app_state.input = input;
                self.app_state.focus_results();
                if !changed && self.engine.last_error().is_some() {
                    self.retry();
                }
            }
            Err(err) => {
                debug!(error = %err, "Rejected search submit");
                self.app_state.input = activate_input(input);
                self.app_state.notice = Some(err.to_string());
            }
        }
    }

    fn cards_per_page(&self) -> usize {
        self.last_results_area
            .map_or(1, |area| (area.height / CARD_HEIGHT).max(1) as usize)
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let snapshot = self.engine.snapshot();
        self.app_state.clamp_selection(snapshot.visible_count);
        self.last_revision = snapshot.revision;

        let search_type = self.store.current().search_type();
        let state = &self.app_state;
        let styles = &self.styles;
        let mut results_area = None;
        self.terminal.draw(|frame| {
            results_area = Some(render_layout(frame, state, &snapshot, search_type, styles));
        })?;
        self.last_results_area = results_area;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B, S> TuiApp<B, S>
where
    B: ratatui::backend::Backend,
    S: SearchBackend + 'static,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        engine: PaginationEngine<S>,
        initial: Query,
        runtime: Handle,
    ) -> Self {
        let styles = CardStyles::with_color_config(ColorConfig::disabled());
        Self::assemble(
            terminal,
            engine,
            initial,
            KeyBindings::default(),
            styles,
            runtime,
        )
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn engine(&self) -> &PaginationEngine<S> {
        &self.engine
    }

    pub(crate) fn store(&self) -> &SearchStore {
        &self.store
    }

    /// Handle a key and pick up any resulting store change.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        let quit = self.handle_key(key);
        self.process_updates();
        quit
    }

    pub(crate) fn process_updates_test(&mut self) -> bool {
        self.process_updates()
    }

    pub(crate) fn has_pending_tasks(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_tui(
    client: GithubClient,
    options: EngineOptions,
    initial: Query,
    styles: CardStyles,
    runtime: Handle,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(client, options, initial, styles, runtime)?;

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
