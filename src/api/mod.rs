//! API gateway: the GitHub REST client and the backend seam the pagination
//! engine fetches through.

pub mod backend;
pub mod client;

#[cfg(test)]
pub mod testing;

pub use backend::SearchBackend;
pub use client::{
    GithubClient, GithubClientBuilder, RequestOptions, DEFAULT_API_BASE, DEFAULT_USER_AGENT,
    GITHUB_ACCEPT,
};
