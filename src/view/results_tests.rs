//! Tests for the result list widget.

use super::*;
use crate::api::testing::{repository, user};
use crate::model::{ApiError, Page, Query, RepoDetails, SearchType};
use crate::test_harness::buffer_to_string;
use crate::view::styles::ColorConfig;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn snapshot(search_type: SearchType, pages: Vec<Page>) -> SearchSnapshot {
    let merged: usize = pages.iter().map(Page::len).sum();
    SearchSnapshot {
        query: Query::new("octocat", search_type),
        size: pages.len(),
        visible_count: merged.min(10),
        is_loading: false,
        is_validating: false,
        has_reached_end: false,
        last_error: None,
        status: FetchStatus::Ready,
        revision: 1,
        pages,
    }
}

fn user_page(total: u64, logins: &[&str]) -> Page {
    let items = logins
        .iter()
        .enumerate()
        .map(|(i, login)| Item::User(user(i as u64 + 1, login)))
        .collect();
    Page::new(total, items)
}

fn render(snapshot: &SearchSnapshot, selected: usize, detail: &DetailState, height: u16) -> String {
    let styles = CardStyles::with_color_config(ColorConfig::disabled());
    let mut terminal = Terminal::new(TestBackend::new(70, height)).unwrap();
    terminal
        .draw(|frame| {
            let widget = ResultList::new(snapshot, selected, detail, &styles);
            frame.render_widget(widget, frame.area());
        })
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn server_error() -> ApiError {
    ApiError::RemoteApi {
        status: 500,
        status_text: "Internal Server Error".to_string(),
    }
}

// ===== Pure helpers =====

#[test]
fn format_count_groups_thousands() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1000), "1,000");
    assert_eq!(format_count(1234567), "1,234,567");
}

#[test]
fn heading_uses_type_label_and_total() {
    let snap = snapshot(SearchType::Repositories, vec![Page::new(12345, vec![])]);
    assert_eq!(
        result_heading(&snap).as_deref(),
        Some("12,345 Repositories found")
    );
}

#[test]
fn heading_absent_without_pages() {
    let snap = snapshot(SearchType::Users, vec![]);
    assert_eq!(result_heading(&snap), None);
}

#[test]
fn no_results_message_uses_lowercase_type() {
    let snap = snapshot(SearchType::Users, vec![Page::new(0, vec![])]);
    assert_eq!(no_results_message(&snap), "No users results found.");
}

#[test]
fn scroll_offset_keeps_selected_card_visible() {
    // Three cards of two lines each, separated by blank lines.
    let ranges = [(0, 2), (3, 5), (6, 8)];
    assert_eq!(scroll_offset(&ranges, 0, 4), 0);
    assert_eq!(scroll_offset(&ranges, 1, 4), 1);
    assert_eq!(scroll_offset(&ranges, 2, 4), 4);
    assert_eq!(scroll_offset(&ranges, 2, 10), 0);
}

#[test]
fn scroll_offset_never_hides_card_start() {
    // A card taller than the viewport is shown from its first line.
    let ranges = [(0, 2), (3, 12)];
    assert_eq!(scroll_offset(&ranges, 1, 4), 3);
}

#[test]
fn scroll_offset_without_cards_is_zero() {
    assert_eq!(scroll_offset(&[], 3, 10), 0);
}

// ===== Rendering states =====

#[test]
fn idle_shows_hint() {
    let mut snap = snapshot(SearchType::Users, vec![]);
    snap.query = Query::new("", SearchType::Users);
    snap.status = FetchStatus::Idle;
    let output = render(&snap, 0, &DetailState::None, 5);
    assert!(output.contains("Search for GitHub users and repositories"));
}

#[test]
fn first_load_shows_loader() {
    let mut snap = snapshot(SearchType::Users, vec![]);
    snap.status = FetchStatus::Loading;
    snap.is_loading = true;
    snap.is_validating = true;
    let output = render(&snap, 0, &DetailState::None, 5);
    assert!(output.contains("Loading..."));
}

#[test]
fn error_without_pages_shows_message_and_retry_hint() {
    let mut snap = snapshot(SearchType::Users, vec![]);
    snap.status = FetchStatus::Error;
    snap.last_error = Some(server_error());
    let output = render(&snap, 0, &DetailState::None, 5);
    assert!(output.contains("GitHub API error: 500 Internal Server Error"));
    assert!(output.contains("r: retry"));
}

#[test]
fn empty_result_shows_no_results() {
    let snap = snapshot(SearchType::Repositories, vec![Page::new(0, vec![])]);
    let output = render(&snap, 0, &DetailState::None, 5);
    assert!(output.contains("No repositories results found."));
    assert!(!output.contains("found\n"));
}

#[test]
fn user_cards_show_login_and_profile_url() {
    let snap = snapshot(SearchType::Users, vec![user_page(2048, &["octocat", "hubot"])]);
    let output = render(&snap, 0, &DetailState::None, 12);
    assert!(output.contains("2,048 Users found"));
    assert!(output.contains("octocat"));
    assert!(output.contains("https://github.com/hubot"));
}

#[test]
fn only_visible_items_are_rendered() {
    let mut snap = snapshot(SearchType::Users, vec![user_page(3, &["first", "second", "third"])]);
    snap.visible_count = 2;
    let output = render(&snap, 0, &DetailState::None, 15);
    assert!(output.contains("second"));
    assert!(!output.contains("third"));
}

#[test]
fn validating_with_data_shows_loading_more_footer() {
    let mut snap = snapshot(SearchType::Users, vec![user_page(30, &["octocat"])]);
    snap.is_validating = true;
    snap.status = FetchStatus::LoadingMore;
    let output = render(&snap, 0, &DetailState::None, 10);
    assert!(output.contains("octocat"));
    assert!(output.contains("loading more..."));
}

#[test]
fn error_after_data_keeps_cards_and_shows_error() {
    let mut snap = snapshot(SearchType::Users, vec![user_page(30, &["octocat"])]);
    snap.last_error = Some(server_error());
    snap.status = FetchStatus::Error;
    let output = render(&snap, 0, &DetailState::None, 10);
    assert!(output.contains("octocat"));
    assert!(output.contains("500 Internal Server Error"));
}

// ===== Repository cards =====

#[test]
fn repository_card_shows_name_counts_and_description() {
    let mut repo = repository(5, "rust-lang", "rust");
    repo.stargazers_count = 90000;
    repo.forks_count = 12000;
    let snap = snapshot(
        SearchType::Repositories,
        vec![Page::new(1, vec![Item::Repository(repo)])],
    );
    let output = render(&snap, 0, &DetailState::None, 8);
    assert!(output.contains("rust-lang/rust"));
    assert!(output.contains("★ 90000"));
    assert!(output.contains("⑂ 12000"));
    assert!(output.contains("The rust project"));
}

#[test]
fn selected_repository_shows_languages_and_forks() {
    let mut repo = repository(5, "rust-lang", "rust");
    repo.forks_count = 12;
    let details = RepoDetails {
        languages: vec!["Rust".to_string(), "Shell".to_string()],
        forks: vec![repository(9, "alice", "rust"), repository(10, "bob", "rust")],
    };
    let detail = DetailState::Loaded {
        repo_id: 5,
        details,
    };
    let snap = snapshot(
        SearchType::Repositories,
        vec![Page::new(1, vec![Item::Repository(repo)])],
    );
    let output = render(&snap, 0, &detail, 12);
    assert!(output.contains("Rust"));
    assert!(output.contains("Shell"));
    assert!(output.contains("Last 3 forks of 12"));
    assert!(output.contains("Forked by alice"));
    assert!(output.contains("Forked by bob"));
}

#[test]
fn repository_without_forks_has_no_fork_caption() {
    let mut repo = repository(5, "octo", "solo");
    repo.forks_count = 0;
    let detail = DetailState::Loaded {
        repo_id: 5,
        details: RepoDetails {
            languages: vec!["Go".to_string()],
            forks: vec![],
        },
    };
    let snap = snapshot(
        SearchType::Repositories,
        vec![Page::new(1, vec![Item::Repository(repo)])],
    );
    let output = render(&snap, 0, &detail, 10);
    assert!(output.contains("Go"));
    assert!(!output.contains("forks"));
}

#[test]
fn detail_for_other_repository_is_not_shown() {
    let repo = repository(5, "octo", "one");
    let detail = DetailState::Failed {
        repo_id: 77,
        message: "GitHub API error: 404 Not Found".to_string(),
    };
    let snap = snapshot(
        SearchType::Repositories,
        vec![Page::new(1, vec![Item::Repository(repo)])],
    );
    let output = render(&snap, 0, &detail, 10);
    assert!(!output.contains("404"));
}

#[test]
fn loading_detail_shows_placeholder() {
    let repo = repository(5, "octo", "one");
    let snap = snapshot(
        SearchType::Repositories,
        vec![Page::new(1, vec![Item::Repository(repo)])],
    );
    let output = render(&snap, 0, &DetailState::Loading { repo_id: 5 }, 10);
    assert!(output.contains("loading details..."));
}

#[test]
fn selection_scrolls_list() {
    let logins: Vec<String> = (0..10).map(|i| format!("user{i}")).collect();
    let refs: Vec<&str> = logins.iter().map(String::as_str).collect();
    let snap = snapshot(SearchType::Users, vec![user_page(10, &refs)]);
    // Heading plus 7 list lines: roughly two cards fit.
    let output = render(&snap, 9, &DetailState::None, 8);
    assert!(output.contains("user9"));
    assert!(!output.contains("user0\n"));
    assert!(output.contains("10 Users found"));
}

#[test]
fn footer_stays_visible_below_long_list() {
    let logins: Vec<String> = (0..10).map(|i| format!("user{i}")).collect();
    let refs: Vec<&str> = logins.iter().map(String::as_str).collect();
    let mut snap = snapshot(SearchType::Users, vec![user_page(20, &refs)]);
    snap.last_error = Some(server_error());
    snap.status = FetchStatus::Error;

    let output = render(&snap, 0, &DetailState::None, 8);
    assert!(output.contains("user0"));
    assert!(output.contains("500 Internal Server Error"));
}
