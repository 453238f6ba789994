//! Seam between the pagination engine and the network.

use crate::model::{ApiError, Page, RepoDetails, Repository, SearchType};
use crate::pagination::PageKey;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of search pages and repository details.
///
/// [`GithubClient`](super::GithubClient) is the production implementation;
/// tests substitute scripted backends.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch the page described by `key`.
    async fn search_page(&self, search_type: SearchType, key: &PageKey) -> Result<Page, ApiError>;

    /// Fetch languages and newest forks for a repository card.
    async fn repo_details(&self, repo: &Repository) -> Result<RepoDetails, ApiError>;
}

#[async_trait]
impl<T: SearchBackend + ?Sized> SearchBackend for Arc<T> {
    async fn search_page(&self, search_type: SearchType, key: &PageKey) -> Result<Page, ApiError> {
        (**self).search_page(search_type, key).await
    }

    async fn repo_details(&self, repo: &Repository) -> Result<RepoDetails, ApiError> {
        (**self).repo_details(repo).await
    }
}
