//! ghsearch
//!
//! TUI application for searching GitHub users and repositories.
//!
//! The crate follows a Pure Core / Impure Shell split: `model`, `pagination`
//! and `state` hold data and transitions, `api` talks to GitHub, and `view`
//! plus `headless` drive the terminal.

pub mod api;
pub mod config;
pub mod headless;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
