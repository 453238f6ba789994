//! UI state machine (pure) and the search state store.
//!
//! Transitions in `app_state` and `input` are pure and testable without a
//! terminal. `store` holds the active query shared with the pagination engine.

pub mod app_state;
pub mod input;
pub mod store;

// Re-export for convenience
pub use app_state::{AppState, DetailState, FocusPane};
pub use input::InputState;
pub use store::SearchStore;
