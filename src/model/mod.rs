//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors.

pub mod error;
pub mod item;
pub mod key_action;
pub mod page;
pub mod query;

// Re-export for convenience
pub use error::{ApiError, AppError};
pub use item::{forks_caption, Item, RepoDetails, Repository, User, FORK_PREVIEW_LIMIT};
pub use key_action::KeyAction;
pub use page::Page;
pub use query::{InvalidQuery, InvalidSearchType, Query, SearchType};
