//! Page-key derivation.
//!
//! A page key is the deterministic request descriptor for page `i` of a query,
//! or `None` when no further request should be made.

use crate::model::{Page, Query, SearchType};

/// Items requested per page. Also the threshold for end-of-results.
pub const PAGE_SIZE: usize = 10;

/// Request descriptor for one search page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    search_type: SearchType,
    page_index: usize,
    query_string: String,
}

impl PageKey {
    /// Endpoint searched.
    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// 0-based index used internally.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// 1-based page number sent on the wire.
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }

    /// Canonical `q=..&per_page=..&page=..` string.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Full search URL under `api_base`.
    pub fn url(&self, api_base: &str) -> String {
        format!(
            "{}/search/{}?{}",
            api_base.trim_end_matches('/'),
            self.search_type.as_path(),
            self.query_string
        )
    }
}

/// Key for page `page_index` given the page before it.
///
/// Returns `None` when the query text is blank, or when the previous page came
/// back empty. A short but non-empty previous page still yields a key; end of
/// results is decided by the engine, not here.
pub fn page_key(query: &Query, page_index: usize, previous_page: Option<&Page>) -> Option<PageKey> {
    if !query.is_searchable() {
        return None;
    }
    if previous_page.is_some_and(Page::is_empty) {
        return None;
    }

    let query_string = format!(
        "q={}&per_page={}&page={}",
        urlencoding::encode(query.text()),
        PAGE_SIZE,
        page_index + 1
    );

    Some(PageKey {
        search_type: query.search_type(),
        page_index,
        query_string,
    })
}
