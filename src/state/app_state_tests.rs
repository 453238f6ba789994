//! Tests for AppState transitions.

use super::*;
use crate::api::testing::{repository, user};
use crate::model::{Item, Page, Query, SearchType};
use crate::pagination::FetchStatus;

fn snapshot_with(items: Vec<Item>, visible_count: usize) -> SearchSnapshot {
    let has_reached_end = items.len() < 10;
    SearchSnapshot {
        query: Query::new("q", SearchType::Repositories),
        pages: vec![Page::new(items.len() as u64, items)],
        size: 1,
        visible_count,
        is_loading: false,
        is_validating: false,
        has_reached_end,
        last_error: None,
        status: FetchStatus::Ready,
        revision: 1,
    }
}

fn full_page_of_repos() -> Vec<Item> {
    (0..10)
        .map(|i| Item::Repository(repository(i, "owner", &format!("repo{i}"))))
        .collect()
}

// ===== Construction and focus =====

#[test]
fn empty_start_focuses_editing_input() {
    let state = AppState::new("");
    assert_eq!(state.focus, FocusPane::Input);
    assert!(state.input.is_editing());
}

#[test]
fn start_with_query_focuses_results() {
    let state = AppState::new("ratatui");
    assert_eq!(state.focus, FocusPane::Results);
    assert_eq!(state.input.text(), "ratatui");
    assert!(!state.input.is_editing());
}

#[test]
fn focus_input_starts_editing_and_clears_notice() {
    let mut state = AppState::new("x");
    state.notice = Some("Search query cannot be empty".to_string());
    state.focus_input();
    assert_eq!(state.focus, FocusPane::Input);
    assert!(state.input.is_editing());
    assert_eq!(state.notice, None);
}

#[test]
fn toggle_help_flips() {
    let mut state = AppState::default();
    state.toggle_help();
    assert!(state.help_visible);
    state.toggle_help();
    assert!(!state.help_visible);
}

// ===== Selection =====

#[test]
fn select_next_stops_at_last_visible() {
    let mut state = AppState::new("x");
    for _ in 0..20 {
        state.select_next(3);
    }
    assert_eq!(state.selected, 2);
}

#[test]
fn select_next_with_no_items_is_noop() {
    let mut state = AppState::new("x");
    state.select_next(0);
    assert_eq!(state.selected, 0);
}

#[test]
fn paging_moves_and_clamps() {
    let mut state = AppState::new("x");
    state.page_down(25, 10);
    assert_eq!(state.selected, 10);
    state.page_down(25, 10);
    state.page_down(25, 10);
    assert_eq!(state.selected, 24);
    state.page_up(10);
    assert_eq!(state.selected, 14);
    state.page_up(100);
    assert_eq!(state.selected, 0);
}

#[test]
fn first_and_last() {
    let mut state = AppState::new("x");
    state.select_last(7);
    assert_eq!(state.selected, 6);
    state.select_first();
    assert_eq!(state.selected, 0);
}

#[test]
fn clamp_selection_after_shrink() {
    let mut state = AppState::new("x");
    state.selected = 9;
    state.clamp_selection(4);
    assert_eq!(state.selected, 3);
    state.clamp_selection(0);
    assert_eq!(state.selected, 0);
}

#[test]
fn reset_for_query_clears_selection_and_detail() {
    let mut state = AppState::new("x");
    state.selected = 5;
    state.request_detail(42);
    state.reset_for_query();
    assert_eq!(state.selected, 0);
    assert_eq!(state.detail, DetailState::None);
}

// ===== Auto-load =====

#[test]
fn auto_load_when_selection_reaches_last_visible_item() {
    let snapshot = snapshot_with(full_page_of_repos(), 10);
    let mut state = AppState::new("x");

    state.selected = 8;
    assert!(!state.should_auto_load(&snapshot));
    state.selected = 9;
    assert!(state.should_auto_load(&snapshot));
}

#[test]
fn no_auto_load_after_end_of_results() {
    let items: Vec<Item> = full_page_of_repos().into_iter().take(4).collect();
    let snapshot = snapshot_with(items, 4);
    let mut state = AppState::new("x");
    state.selected = 3;
    assert!(!state.should_auto_load(&snapshot));
}

#[test]
fn no_auto_load_while_fetching_or_failed() {
    let mut snapshot = snapshot_with(full_page_of_repos(), 10);
    let mut state = AppState::new("x");
    state.selected = 9;

    snapshot.is_validating = true;
    assert!(!state.should_auto_load(&snapshot));

    snapshot.is_validating = false;
    snapshot.last_error = Some(ApiError::RemoteApi {
        status: 502,
        status_text: "Bad Gateway".to_string(),
    });
    assert!(!state.should_auto_load(&snapshot));
}

#[test]
fn no_auto_load_with_nothing_visible() {
    let snapshot = snapshot_with(Vec::new(), 0);
    let state = AppState::new("x");
    assert!(!state.should_auto_load(&snapshot));
}

// ===== Detail panel =====

#[test]
fn selected_repository_only_for_repository_cards() {
    let snapshot = snapshot_with(full_page_of_repos(), 10);
    let mut state = AppState::new("x");
    state.selected = 3;
    assert_eq!(
        state.selected_repository(&snapshot).map(|r| r.name.as_str()),
        Some("repo3")
    );

    let users = snapshot_with(vec![Item::User(user(1, "octocat"))], 1);
    state.selected = 0;
    assert!(state.selected_repository(&users).is_none());
}

#[test]
fn detail_requested_once_per_repository() {
    let mut state = AppState::new("x");
    assert!(state.request_detail(7));
    assert!(!state.request_detail(7));
    assert!(state.request_detail(8));
    assert_eq!(state.detail, DetailState::Loading { repo_id: 8 });
}

#[test]
fn detail_result_for_other_repository_is_ignored() {
    let mut state = AppState::new("x");
    state.request_detail(8);
    state.detail_finished(7, Ok(RepoDetails::default()));
    assert_eq!(state.detail, DetailState::Loading { repo_id: 8 });
}

#[test]
fn detail_success_and_failure() {
    let mut state = AppState::new("x");
    state.request_detail(1);
    let details = RepoDetails {
        languages: vec!["Rust".to_string()],
        forks: vec![repository(2, "fork", "r")],
    };
    state.detail_finished(1, Ok(details.clone()));
    assert_eq!(
        state.detail,
        DetailState::Loaded {
            repo_id: 1,
            details
        }
    );

    state.request_detail(3);
    state.detail_finished(
        3,
        Err(ApiError::RemoteApi {
            status: 404,
            status_text: "Not Found".to_string(),
        }),
    );
    assert_eq!(
        state.detail,
        DetailState::Failed {
            repo_id: 3,
            message: "GitHub API error: 404 Not Found".to_string()
        }
    );
}
