//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.
//! Network access is replaced by a [`ScriptedBackend`]; background fetches run
//! on a private tokio runtime and [`AcceptanceTestHarness::settle`] waits for them.

use crate::api::testing::ScriptedBackend;
use crate::model::{Query, SearchType};
use crate::pagination::{EngineOptions, PaginationEngine, SearchSnapshot};
use crate::state::AppState;
use crate::view::TuiApp;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Upper bound for [`AcceptanceTestHarness::settle`].
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep assertions simple.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    // Declared before the runtime so the app's task handles drop first.
    app: TuiApp<TestBackend, ScriptedBackend>,
    backend: Arc<ScriptedBackend>,
    _runtime: Runtime,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Start with an empty query (input focused) and default terminal size (80x24).
    pub fn new(backend: ScriptedBackend) -> Self {
        Self::with_query(backend, Query::default())
    }

    /// Start with `query` already submitted, as `ghsearch <QUERY>` does.
    pub fn with_query(backend: ScriptedBackend, query: Query) -> Self {
        Self::with_size(backend, query, 80, 24)
    }

    pub fn with_size(backend: ScriptedBackend, query: Query, width: u16, height: u16) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("test runtime should build");

        let backend = Arc::new(backend);
        let engine = PaginationEngine::with_options(Arc::clone(&backend), EngineOptions::default());
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        let app = TuiApp::new_for_test(terminal, engine, query, runtime.handle().clone());

        let mut harness = Self {
            app,
            backend,
            _runtime: runtime,
            running: true,
        };
        harness.settle();
        harness
    }

    /// Wait until every background fetch has finished and been applied.
    ///
    /// # Panics
    /// Panics if fetches are still running after five seconds.
    pub fn settle(&mut self) {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        loop {
            self.app.process_updates_test();
            if !self.app.has_pending_tasks() {
                // One more pass drains results sent just before the task ended.
                self.app.process_updates_test();
                if !self.app.has_pending_tasks() {
                    return;
                }
            }
            assert!(Instant::now() < deadline, "background fetches did not settle");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    /// Send a single key event and wait for the work it started.
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        } else {
            self.settle();
        }

        quit
    }

    /// Send a sequence of keys
    ///
    /// Continues sending keys until the sequence is exhausted or app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text (sends individual character key events)
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Type `text` into a focused input and press Enter.
    pub fn search(&mut self, text: &str) {
        self.type_text(text);
        self.send_key(KeyCode::Enter);
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.app.engine().snapshot()
    }

    pub fn active_search_type(&self) -> SearchType {
        self.app.store().current().search_type()
    }

    /// Scripted backend, for inspecting issued requests.
    pub fn backend(&self) -> &ScriptedBackend {
        &self.backend
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");

        let buffer = self.app.terminal().backend().buffer();
        buffer_to_string(buffer)
    }
}
