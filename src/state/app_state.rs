//! Application state and transitions.
//!
//! AppState holds UI-only state: input editing, focus, the selected result and
//! the detail panel. Search data lives in the pagination engine and is passed in
//! as a [`SearchSnapshot`] where a transition needs it.

use crate::model::{ApiError, RepoDetails, Repository};
use crate::pagination::SearchSnapshot;
use crate::state::InputState;

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Focus**: Input ⇄ Results. Submitting moves focus to Results.
/// - **Selection**: index into the visible items, reset on query change.
/// - **Detail**: languages and forks of the selected repository card.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search text field.
    pub input: InputState,

    /// Which pane receives key input.
    pub focus: FocusPane,

    /// Selected index into the visible items.
    pub selected: usize,

    /// Whether the help overlay is shown.
    pub help_visible: bool,

    /// Detail panel for the selected repository.
    pub detail: DetailState,

    /// Message from the last rejected submit, cleared on the next edit.
    pub notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}

impl AppState {
    /// Start with `initial_text` in the (inactive) input.
    ///
    /// Focus starts on the input when there is nothing to show yet.
    pub fn new(initial_text: &str) -> Self {
        let focus = if initial_text.trim().is_empty() {
            FocusPane::Input
        } else {
            FocusPane::Results
        };
        let input = InputState::with_text(initial_text);
        let input = if focus == FocusPane::Input {
            crate::state::input::activate_input(input)
        } else {
            input
        };

        Self {
            input,
            focus,
            selected: 0,
            help_visible: false,
            detail: DetailState::None,
            notice: None,
        }
    }

    /// Focus the search input and start editing.
    pub fn focus_input(&mut self) {
        self.focus = FocusPane::Input;
        self.input = crate::state::input::activate_input(self.input.clone());
        self.notice = None;
    }

    /// Focus the result list.
    pub fn focus_results(&mut self) {
        self.focus = FocusPane::Results;
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// A new query is active: selection and detail belong to old results.
    pub fn reset_for_query(&mut self) {
        self.selected = 0;
        self.detail = DetailState::None;
    }

    // ===== Selection =====

    /// Keep the selection inside `0..visible_len`.
    pub fn clamp_selection(&mut self, visible_len: usize) {
        self.selected = self.selected.min(visible_len.saturating_sub(1));
    }

    /// Move the selection down, stopping at the last visible item.
    pub fn select_next(&mut self, visible_len: usize) {
        if visible_len > 0 {
            self.selected = (self.selected + 1).min(visible_len - 1);
        }
    }

    /// Move the selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the selection down by `page` cards.
    pub fn page_down(&mut self, visible_len: usize, page: usize) {
        if visible_len > 0 {
            self.selected = (self.selected + page.max(1)).min(visible_len - 1);
        }
    }

    /// Move the selection up by `page` cards.
    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page.max(1));
    }

    /// Select the first card.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Select the last visible card.
    pub fn select_last(&mut self, visible_len: usize) {
        self.selected = visible_len.saturating_sub(1);
    }

    /// Selection sits on the last visible item and more data may exist.
    ///
    /// No auto-load while a fetch is in flight, after the last page, or while
    /// an error is shown; an explicit load-more retries in that case.
    pub fn should_auto_load(&self, snapshot: &SearchSnapshot) -> bool {
        snapshot.visible_count > 0
            && self.selected + 1 >= snapshot.visible_count
            && !snapshot.has_reached_end
            && !snapshot.is_validating
            && snapshot.last_error.is_none()
    }

    /// The selected repository, if the selection is on a repository card.
    pub fn selected_repository<'a>(&self, snapshot: &'a SearchSnapshot) -> Option<&'a Repository> {
        snapshot
            .visible_items()
            .nth(self.selected)
            .and_then(|item| item.as_repository())
    }

    // ===== Detail panel =====

    /// Mark details for `repo_id` as loading.
    ///
    /// Returns `false` when that repository is already loading or loaded, so
    /// the caller only issues one request per selection.
    pub fn request_detail(&mut self, repo_id: u64) -> bool {
        if self.detail.repo_id() == Some(repo_id) {
            return false;
        }
        self.detail = DetailState::Loading { repo_id };
        true
    }

    /// Store a detail result. Results for a repository no longer selected are ignored.
    pub fn detail_finished(&mut self, repo_id: u64, result: Result<RepoDetails, ApiError>) {
        if self.detail.repo_id() != Some(repo_id) {
            return;
        }
        self.detail = match result {
            Ok(details) => DetailState::Loaded { repo_id, details },
            Err(err) => DetailState::Failed {
                repo_id,
                message: err.to_string(),
            },
        };
    }
}

// ===== FocusPane =====

/// Which pane currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    /// Search text field.
    Input,
    /// Result list.
    Results,
}

// ===== DetailState =====

/// Languages and forks of the selected repository.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    /// Nothing selected, or the selection is not a repository.
    #[default]
    None,
    /// Request in flight.
    Loading {
        /// Repository the details belong to.
        repo_id: u64,
    },
    /// Details ready to render.
    Loaded {
        /// Repository the details belong to.
        repo_id: u64,
        /// Languages and newest forks.
        details: RepoDetails,
    },
    /// Request failed; the card shows `message`.
    Failed {
        /// Repository the details belong to.
        repo_id: u64,
        /// Rendered error.
        message: String,
    },
}

impl DetailState {
    /// Repository this state refers to, if any.
    pub fn repo_id(&self) -> Option<u64> {
        match self {
            DetailState::None => None,
            DetailState::Loading { repo_id }
            | DetailState::Loaded { repo_id, .. }
            | DetailState::Failed { repo_id, .. } => Some(*repo_id),
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
