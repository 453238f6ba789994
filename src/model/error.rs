//! Error types for ghsearch.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for headless runs and the binary
//!   - [`ApiError`] - Failures talking to the GitHub REST API
//!   - [`InvalidQuery`] - Empty search submitted
//!   - `std::io::Error` - Terminal failures
//!
//! # Error Recovery Strategy
//!
//! Nothing in the search core is fatal. A failed page fetch is captured by the
//! pagination engine and shown next to the last good data; the user recovers by
//! retrying or issuing a new query. An empty submit is dropped locally and never
//! reaches the network.

use super::query::InvalidQuery;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// A request to GitHub failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The submitted query was empty.
    ///
    /// In the TUI this never surfaces; the headless mode reports it so that
    /// `ghsearch --print ""` exits non-zero instead of printing nothing.
    #[error("{0}")]
    InvalidQuery(#[from] InvalidQuery),

    /// Terminal or stdout error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures of the API gateway client.
///
/// The variants distinguish the three ways a request can go wrong so callers
/// can inspect them; the pagination engine itself does not branch on the kind.
///
/// `ApiError` is `Clone` so the engine can keep the last error in its state and
/// hand copies to every snapshot. Transport failures therefore carry the
/// rendered `reqwest` message rather than the error value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    ///
    /// The message format is part of the public contract:
    ///
    /// ```
    /// use ghsearch::model::ApiError;
    ///
    /// let err = ApiError::RemoteApi { status: 403, status_text: "Forbidden".into() };
    /// assert_eq!(err.to_string(), "GitHub API error: 403 Forbidden");
    /// ```
    #[error("GitHub API error: {status} {status_text}")]
    RemoteApi {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for `status` (e.g. "Forbidden"), not the
        /// phrase the server sent, which reqwest does not expose.
        status_text: String,
    },

    /// The request never produced a response (DNS, connect, reset, timeout).
    #[error("Network error requesting {url}: {reason}")]
    Transport {
        /// URL that was being requested.
        url: String,
        /// Rendered transport error.
        reason: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {url}: {reason}")]
    Decode {
        /// URL whose body failed to decode.
        url: String,
        /// Parse error details.
        reason: String,
    },

    /// A caller-supplied header could not be encoded.
    #[error("Invalid request header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ApiError {
    /// HTTP status for remote errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}
