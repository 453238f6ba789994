//! Search query value object.
//!
//! A `Query` is replaced wholesale on every submit, never edited in place.
//! Queries with empty or whitespace-only text are valid values (the initial
//! query is empty) but are not searchable: no request is ever issued for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== SearchType =====

/// Which GitHub search endpoint a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// `/search/users`
    Users,
    /// `/search/repositories`
    #[default]
    Repositories,
}

impl SearchType {
    /// Path segment used in the search URL.
    pub fn as_path(self) -> &'static str {
        match self {
            SearchType::Users => "users",
            SearchType::Repositories => "repositories",
        }
    }

    /// Human-readable plural label ("Users", "Repositories").
    pub fn label(self) -> &'static str {
        match self {
            SearchType::Users => "Users",
            SearchType::Repositories => "Repositories",
        }
    }

    /// The other search type.
    pub fn toggled(self) -> Self {
        match self {
            SearchType::Users => SearchType::Repositories,
            SearchType::Repositories => SearchType::Users,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for SearchType {
    type Err = InvalidSearchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(SearchType::Users),
            "repositories" | "repos" | "repo" => Ok(SearchType::Repositories),
            _ => Err(InvalidSearchType(s.to_string())),
        }
    }
}

// ===== Query =====

/// Immutable `{text, search_type}` pair driving a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query {
    text: String,
    search_type: SearchType,
}

impl Query {
    /// A query with `text` as-is. Blank text is allowed and never fetched.
    pub fn new(text: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            text: text.into(),
            search_type,
        }
    }

    /// Build a query from user-submitted text.
    ///
    /// Rejects empty or whitespace-only input. The text itself is kept as typed.
    pub fn submitted(text: impl Into<String>, search_type: SearchType) -> Result<Self, InvalidQuery> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InvalidQuery::Empty);
        }
        Ok(Self { text, search_type })
    }

    /// Query text as entered.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Endpoint searched.
    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// Whether this query may trigger network requests.
    pub fn is_searchable(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Copy of this query with different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(text, self.search_type)
    }

    /// Copy of this query targeting a different endpoint.
    pub fn with_search_type(&self, search_type: SearchType) -> Self {
        Self::new(self.text.clone(), search_type)
    }
}

// ===== Error Types =====

/// Rejected search submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidQuery {
    /// Text was empty or only whitespace.
    #[error("Search query cannot be empty")]
    Empty,
}

/// Search type name that is neither users nor repositories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown search type '{0}' (expected 'users' or 'repositories')")]
pub struct InvalidSearchType(pub String);

// ===== Tests =====
