//! Session-scoped search state store.
//!
//! Holds the active [`Query`]. Consumers receive the store explicitly and
//! observe changes through a `watch` receiver; every setter replaces the query
//! wholesale.

use crate::model::{InvalidQuery, Query, SearchType};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Observable holder for the active query.
#[derive(Debug, Clone)]
pub struct SearchStore {
    sender: Arc<watch::Sender<Query>>,
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new(Query::default())
    }
}

impl SearchStore {
    /// Store holding `initial`.
    pub fn new(initial: Query) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// The current query.
    pub fn current(&self) -> Query {
        self.sender.borrow().clone()
    }

    /// New receiver; its first `changed()` resolves on the next modification.
    pub fn subscribe(&self) -> watch::Receiver<Query> {
        self.sender.subscribe()
    }

    /// Replace the query text, keeping the search type.
    pub fn set_query_text(&self, text: impl Into<String>) -> bool {
        let next = self.current().with_text(text);
        self.replace(next)
    }

    /// Replace the search type, keeping the text.
    pub fn set_search_type(&self, search_type: SearchType) -> bool {
        let next = self.current().with_search_type(search_type);
        self.replace(next)
    }

    /// Replace the whole query. Returns `true` when it changed; subscribers are
    /// only notified in that case.
    pub fn replace(&self, query: Query) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == query {
                return false;
            }
            debug!(text = query.text(), search_type = %query.search_type(), "Store query replaced");
            *current = query;
            true
        })
    }

    /// Submit text from the search form.
    ///
    /// Blank text is rejected and leaves the store untouched.
    pub fn submit(&self, text: &str) -> Result<bool, InvalidQuery> {
        let query = Query::submitted(text, self.current().search_type())?;
        Ok(self.replace(query))
    }
}
