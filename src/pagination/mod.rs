//! Incremental pagination over GitHub search results.
//!
//! [`key`] derives request descriptors; [`engine`] drives fetching and the
//! visible window.

pub mod engine;
pub mod key;

pub use engine::{
    EngineOptions, FetchStatus, PaginationEngine, SearchSnapshot, DEFAULT_MAX_EXTRA_PAGES,
};
pub use key::{page_key, PageKey, PAGE_SIZE};
