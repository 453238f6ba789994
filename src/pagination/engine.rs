//! Incremental pagination engine.
//!
//! Owns the fetch state for the active query: fetched pages, the number of
//! pages requested, the in-flight marker, the last error and the visible
//! window. Two growth mechanisms are independent:
//!
//! - network page growth ([`PaginationEngine::fetch_next_page`],
//!   [`PaginationEngine::set_size`]) appends pages fetched from the backend
//! - visible window growth ([`PaginationEngine::set_visible_count`],
//!   [`PaginationEngine::load_more_items`]) moves a cursor over merged items
//!
//! # Concurrency
//!
//! The engine is cheap to clone; clones share state. The state mutex is never
//! held across an `.await`. Page fetches for one query are serialised through a
//! per-query async gate, so pages are requested in strictly increasing order and
//! no page index is requested twice. Each fetch is tagged with the query epoch it
//! was issued under; results that arrive after the query changed are dropped.

use super::key::{page_key, PAGE_SIZE};
use crate::api::SearchBackend;
use crate::model::{ApiError, Item, Page, Query};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// Extra pages `load_more_items` may request beyond the page count at call time.
pub const DEFAULT_MAX_EXTRA_PAGES: usize = 10;

/// Tuning knobs for [`PaginationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Upper bound on pages a single `load_more_items` call may add.
    pub max_extra_pages: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_extra_pages: DEFAULT_MAX_EXTRA_PAGES,
        }
    }
}

/// Coarse fetch lifecycle for the active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Blank query, nothing to fetch.
    Idle,
    /// Searchable query without any page yet.
    Loading,
    /// At least one page, nothing in flight.
    Ready,
    /// A further page is in flight; existing pages remain visible.
    LoadingMore,
    /// The last fetch failed; pages fetched before it are retained.
    Error,
}

/// Point-in-time copy of the engine state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    /// Query the snapshot was taken for.
    pub query: Query,
    /// Fetched pages in index order.
    pub pages: Vec<Page>,
    /// Pages requested so far (highest requested index + 1).
    pub size: usize,
    /// Items exposed to the presentation layer; never above the merged count.
    pub visible_count: usize,
    /// Searchable query with no page and no error yet.
    pub is_loading: bool,
    /// A page request is in flight.
    pub is_validating: bool,
    /// Last page was short, or nothing was fetched.
    pub has_reached_end: bool,
    /// Most recent failure, cleared by the next successful fetch.
    pub last_error: Option<ApiError>,
    /// Coarse lifecycle state.
    pub status: FetchStatus,
    /// Bumped on every state change.
    pub revision: u64,
}

impl SearchSnapshot {
    /// All fetched items in page order.
    pub fn merged_items(&self) -> impl Iterator<Item = &Item> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    /// Number of merged items.
    pub fn merged_len(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// The first `visible_count` merged items.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.merged_items().take(self.visible_count)
    }

    /// Total match count reported by the most recent page.
    pub fn total_count(&self) -> Option<u64> {
        self.pages.last().map(|page| page.total_count)
    }
}

/// Mutable state for one query. Replaced wholesale on query change.
#[derive(Debug)]
struct FetchState {
    query: Query,
    epoch: u64,
    revision: u64,
    pages: Vec<Page>,
    size: usize,
    in_flight: Option<usize>,
    last_error: Option<ApiError>,
    /// Requested window; exposed clamped to the merged item count.
    window: usize,
    fetch_gate: Arc<AsyncMutex<()>>,
    /// Completed requests for this query, successful or not.
    attempts: u64,
    /// Most recent failed request, until the next success.
    failed: Option<FailedFetch>,
}

/// A rejected page request, tagged with the attempt it completed as.
#[derive(Debug)]
struct FailedFetch {
    index: usize,
    attempt: u64,
    error: ApiError,
}

impl FetchState {
    fn new(query: Query, epoch: u64, revision: u64) -> Self {
        Self {
            query,
            epoch,
            revision,
            pages: Vec::new(),
            size: 0,
            in_flight: None,
            last_error: None,
            window: PAGE_SIZE,
            fetch_gate: Arc::new(AsyncMutex::new(())),
            attempts: 0,
            failed: None,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn merged_len(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    fn visible_count(&self) -> usize {
        self.window.min(self.merged_len())
    }

    /// Last page shorter than a full page. No pages counts as zero items.
    fn has_reached_end(&self) -> bool {
        self.pages.last().map_or(0, Page::len) < PAGE_SIZE
    }

    /// A page has actually been fetched and it was short.
    fn last_page_is_short(&self) -> bool {
        self.pages.last().is_some_and(|page| page.len() < PAGE_SIZE)
    }

    fn status(&self) -> FetchStatus {
        if !self.query.is_searchable() {
            return FetchStatus::Idle;
        }
        if self.in_flight.is_some() {
            return if self.pages.is_empty() {
                FetchStatus::Loading
            } else {
                FetchStatus::LoadingMore
            };
        }
        if self.last_error.is_some() {
            return FetchStatus::Error;
        }
        if self.pages.is_empty() {
            FetchStatus::Loading
        } else {
            FetchStatus::Ready
        }
    }

    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            pages: self.pages.clone(),
            size: self.size,
            visible_count: self.visible_count(),
            is_loading: self.query.is_searchable()
                && self.pages.is_empty()
                && self.last_error.is_none(),
            is_validating: self.in_flight.is_some(),
            has_reached_end: self.has_reached_end(),
            last_error: self.last_error.clone(),
            status: self.status(),
            revision: self.revision,
        }
    }
}

/// Result of asking for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageFetch {
    /// The page exists now (fetched by this call or an earlier one).
    Fetched,
    /// The page key said stop.
    Stopped,
    /// The query changed while waiting; the result was dropped.
    Stale,
}

/// Pagination engine for one active query at a time.
pub struct PaginationEngine<B> {
    backend: Arc<B>,
    options: EngineOptions,
    state: Arc<Mutex<FetchState>>,
}

impl<B> Clone for PaginationEngine<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            options: self.options,
            state: Arc::clone(&self.state),
        }
    }
}

impl<B: SearchBackend + 'static> PaginationEngine<B> {
    /// Engine with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(Arc::new(backend), EngineOptions::default())
    }

    /// Engine sharing `backend`, with explicit options.
    pub fn with_options(backend: Arc<B>, options: EngineOptions) -> Self {
        Self {
            backend,
            options,
            state: Arc::new(Mutex::new(FetchState::new(Query::default(), 0, 0))),
        }
    }

    /// The backend pages are fetched from.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Options the engine was built with.
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    fn lock(&self) -> MutexGuard<'_, FetchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the active query.
    ///
    /// Discards all pages, the error and the window, and invalidates every fetch
    /// still in flight for the previous query. Returns `false` (and keeps state)
    /// when `query` equals the active one.
    pub fn set_query(&self, query: Query) -> bool {
        let mut state = self.lock();
        if state.query == query {
            return false;
        }

        info!(
            query = query.text(),
            search_type = %query.search_type(),
            "Query changed, resetting pagination"
        );
        let epoch = state.epoch + 1;
        let revision = state.revision + 1;
        *state = FetchState::new(query, epoch, revision);
        true
    }

    /// The active query.
    pub fn query(&self) -> Query {
        self.lock().query.clone()
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.lock().snapshot()
    }

    /// Counter bumped on every state change.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Items currently exposed, clamped to the merged count.
    pub fn visible_count(&self) -> usize {
        self.lock().visible_count()
    }

    /// Requested window before clamping to the merged count.
    pub fn visible_window(&self) -> usize {
        self.lock().window
    }

    /// All fetched items, flattened in page order.
    pub fn merged_items(&self) -> Vec<Item> {
        let state = self.lock();
        state
            .pages
            .iter()
            .flat_map(|page| page.items.iter().cloned())
            .collect()
    }

    /// See [`SearchSnapshot::has_reached_end`].
    pub fn has_reached_end(&self) -> bool {
        self.lock().has_reached_end()
    }

    /// Most recent fetch failure, if not yet cleared.
    pub fn last_error(&self) -> Option<ApiError> {
        self.lock().last_error.clone()
    }

    /// Set the visible window, clamped to the merged item count.
    pub fn set_visible_count(&self, count: usize) {
        let mut state = self.lock();
        state.window = count.min(state.merged_len());
        state.touch();
    }

    /// Fetch the page after the last fetched one, if the page key allows.
    ///
    /// Returns `Ok(true)` when the page is now present, `Ok(false)` when there
    /// was nothing to fetch or the query changed meanwhile.
    pub async fn fetch_next_page(&self) -> Result<bool, ApiError> {
        let (epoch, next_index) = {
            let state = self.lock();
            (state.epoch, state.pages.len())
        };
        let outcome = self.ensure_page(epoch, next_index).await?;
        Ok(outcome == PageFetch::Fetched)
    }

    /// Grow the fetched page count to `size`, one page at a time.
    ///
    /// Stops early when the page key says stop or the query changes.
    pub async fn set_size(&self, size: usize) -> Result<(), ApiError> {
        loop {
            let (epoch, fetched) = {
                let state = self.lock();
                (state.epoch, state.pages.len())
            };
            if fetched >= size {
                return Ok(());
            }
            if self.ensure_page(epoch, fetched).await? != PageFetch::Fetched {
                return Ok(());
            }
        }
    }

    /// Reveal `count` more items (default [`PAGE_SIZE`]).
    ///
    /// Advances the window over already merged items when they suffice.
    /// Otherwise fetches pages sequentially until the target is covered, the
    /// last page is short, the page key stops, a fetch fails, or
    /// `max_extra_pages` pages beyond the page count at call time were
    /// requested. The window ends at `min(target, merged)` and never moves
    /// backwards. Returns the resulting visible count.
    ///
    /// A fetch error is recorded in the engine state and also returned; the
    /// window still advances over whatever was merged before the failure.
    pub async fn load_more_items(&self, count: Option<usize>) -> Result<usize, ApiError> {
        let increment = count.unwrap_or(PAGE_SIZE);
        let (epoch, target, page_budget) = {
            let state = self.lock();
            (
                state.epoch,
                state.window.saturating_add(increment),
                state.size.max(state.pages.len()) + self.options.max_extra_pages,
            )
        };

        let mut outcome = Ok(());
        loop {
            let (merged, next_index, last_short) = {
                let state = self.lock();
                if state.epoch != epoch {
                    return Ok(state.visible_count());
                }
                (state.merged_len(), state.pages.len(), state.last_page_is_short())
            };

            if merged >= target || last_short {
                break;
            }
            if next_index >= page_budget {
                warn!(
                    next_page = next_index + 1,
                    budget = page_budget,
                    "Page budget exhausted while loading more items"
                );
                break;
            }

            match self.ensure_page(epoch, next_index).await {
                Ok(PageFetch::Fetched) => continue,
                Ok(PageFetch::Stopped) => break,
                Ok(PageFetch::Stale) => return Ok(self.visible_count()),
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        let mut state = self.lock();
        if state.epoch != epoch {
            return outcome.map(|()| state.visible_count());
        }
        let next_window = target.min(state.merged_len()).max(state.window);
        if next_window != state.window {
            debug!(from = state.window, to = next_window, "Visible window advanced");
            state.window = next_window;
            state.touch();
        }
        let visible = state.visible_count();
        outcome.map(|()| visible)
    }

    /// Make sure page `index` of query `epoch` is fetched.
    ///
    /// Holds the per-query fetch gate for the duration of the request, so a
    /// concurrent caller asking for the same index waits and then finds the
    /// page already present instead of requesting it again. If that request
    /// failed instead, the waiting caller gets the same error; only a call
    /// that starts after the failure requests the page again.
    async fn ensure_page(&self, epoch: u64, index: usize) -> Result<PageFetch, ApiError> {
        let (gate, seen_attempts) = {
            let state = self.lock();
            if state.epoch != epoch {
                return Ok(PageFetch::Stale);
            }
            (Arc::clone(&state.fetch_gate), state.attempts)
        };
        let _permit = gate.lock().await;

        let key = {
            let mut state = self.lock();
            if state.epoch != epoch {
                return Ok(PageFetch::Stale);
            }
            let next = state.pages.len();
            if next > index {
                return Ok(PageFetch::Fetched);
            }
            if let Some(failed) = &state.failed {
                if failed.index == next && failed.attempt > seen_attempts {
                    debug!(page = next + 1, "Sharing failure of the awaited request");
                    return Err(failed.error.clone());
                }
            }
            let Some(key) = page_key(&state.query, next, state.pages.last()) else {
                return Ok(PageFetch::Stopped);
            };
            state.size = state.size.max(next + 1);
            state.in_flight = Some(next);
            state.touch();
            key
        };

        debug!(page = key.page_number(), query = key.query_string(), "Fetching page");
        let result = self.backend.search_page(key.search_type(), &key).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            debug!(page = key.page_number(), "Dropping page for stale query");
            return Ok(PageFetch::Stale);
        }
        state.in_flight = None;
        state.attempts += 1;
        state.touch();

        match result {
            Ok(page) => {
                debug!(
                    page = key.page_number(),
                    items = page.len(),
                    total = page.total_count,
                    "Page fetched"
                );
                state.pages.push(page);
                state.last_error = None;
                state.failed = None;
                Ok(PageFetch::Fetched)
            }
            Err(err) => {
                warn!(page = key.page_number(), error = %err, "Page fetch failed");
                state.last_error = Some(err.clone());
                state.failed = Some(FailedFetch {
                    index: key.page_index(),
                    attempt: state.attempts,
                    error: err.clone(),
                });
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
