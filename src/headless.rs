//! Headless `--print` mode.
//!
//! Runs one query through the pagination engine and writes plain-text cards
//! to a writer instead of drawing the TUI.

use crate::api::SearchBackend;
use crate::model::{AppError, Item, Query};
use crate::pagination::{PaginationEngine, SearchSnapshot};
use crate::view::results::{no_results_message, result_heading};
use std::io::Write;
use tracing::{info, warn};
use unicode_width::UnicodeWidthChar;

/// Descriptions are cut to this many terminal columns.
pub const DESCRIPTION_WIDTH: usize = 72;

/// Truncate `text` to `max_width` columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Load pages until at least `count` items are visible or the results run out.
///
/// Returns the final snapshot. A blank query is rejected before any request.
pub async fn collect<B: SearchBackend + 'static>(
    engine: &PaginationEngine<B>,
    query: Query,
    count: usize,
) -> Result<SearchSnapshot, AppError> {
    let query = Query::submitted(query.text(), query.search_type())?;
    info!(text = query.text(), count, "Headless search");
    engine.set_query(query);
    engine.fetch_next_page().await?;

    while engine.visible_count() < count && !engine.has_reached_end() {
        let before = engine.visible_count();
        let after = engine.load_more_items(Some(count - before)).await?;
        if after == before {
            warn!(visible = after, "Load more made no progress");
            break;
        }
    }

    Ok(engine.snapshot())
}

/// Write the first `count` visible items of `snapshot` as plain-text cards.
pub fn write_cards<W: Write>(
    out: &mut W,
    snapshot: &SearchSnapshot,
    count: usize,
) -> std::io::Result<()> {
    if snapshot.merged_len() == 0 {
        return writeln!(out, "{}", no_results_message(snapshot));
    }

    if let Some(heading) = result_heading(snapshot) {
        writeln!(out, "{heading}")?;
    }

    for item in snapshot.visible_items().take(count) {
        writeln!(out)?;
        match item {
            Item::User(user) => {
                writeln!(out, "{}", user.login)?;
                writeln!(out, "  {}", user.html_url)?;
            }
            Item::Repository(repo) => {
                writeln!(
                    out,
                    "{}  ★ {}  ⑂ {}",
                    repo.full_name, repo.stargazers_count, repo.forks_count
                )?;
                if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
                    writeln!(out, "  {}", truncate_to_width(description, DESCRIPTION_WIDTH))?;
                }
                writeln!(out, "  {}", repo.html_url)?;
            }
        }
    }

    Ok(())
}

/// Run `query` and print up to `count` results to `out`.
pub async fn run_print<B, W>(
    engine: &PaginationEngine<B>,
    query: Query,
    count: usize,
    out: &mut W,
) -> Result<(), AppError>
where
    B: SearchBackend + 'static,
    W: Write,
{
    let snapshot = collect(engine, query, count).await?;
    write_cards(out, &snapshot, count)?;
    out.flush()?;
    Ok(())
}
