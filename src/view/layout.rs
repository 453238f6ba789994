//! Screen layout rendering.
//!
//! Pure layout logic: header, search form, result list and status bar stacked
//! vertically, with the help overlay drawn on top when visible.

use crate::model::SearchType;
use crate::pagination::SearchSnapshot;
use crate::state::{AppState, FocusPane};
use crate::view::constants::{HEADER_HEIGHT, SEARCH_FORM_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::help::render_help_overlay;
use crate::view::results::ResultList;
use crate::view::search_form::SearchForm;
use crate::view::styles::CardStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the full search screen. Returns the area used by the result list.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    snapshot: &SearchSnapshot,
    search_type: SearchType,
    styles: &CardStyles,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_FORM_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    let header_area = chunks[0];
    let form_area = chunks[1];
    let results_area = chunks[2];
    let status_area = chunks[3];

    render_header(frame, header_area, styles);

    frame.render_widget(
        SearchForm::new(
            &state.input,
            search_type,
            state.focus == FocusPane::Input,
            styles,
        ),
        form_area,
    );

    frame.render_widget(
        ResultList::new(snapshot, state.selected, &state.detail, styles),
        results_area,
    );

    render_status_bar(frame, status_area, state, styles);

    if state.help_visible {
        render_help_overlay(frame, styles);
    }

    results_area
}

fn render_header(frame: &mut Frame, area: Rect, styles: &CardStyles) {
    let lines = vec![
        Line::from(Span::styled("Search GitHub", styles.heading)),
        Line::from(Span::styled(
            "Search for GitHub users and repositories using the search bar",
            styles.muted,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Key hints for the focused pane, shortened on narrow terminals.
pub(crate) fn build_keyboard_hints(focus: FocusPane, terminal_width: u16) -> &'static str {
    let narrow = terminal_width < 70;
    match (focus, narrow) {
        (FocusPane::Input, false) => "Enter: search | Esc: results | Tab: type | Ctrl+c: quit",
        (FocusPane::Input, true) => "Enter | Esc | Tab",
        (FocusPane::Results, false) => "/: search | j/k: select | m: more | r: retry | ?: help | q: quit",
        (FocusPane::Results, true) => "/ j k m r ? q",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &CardStyles) {
    let line = match &state.notice {
        Some(notice) => Line::from(Span::styled(notice.clone(), styles.error)),
        None => Line::from(Span::styled(
            build_keyboard_hints(state.focus, area.width),
            styles.muted,
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
