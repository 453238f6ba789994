//! Scripted in-memory backend for engine and TUI tests.

use super::backend::SearchBackend;
use crate::model::{ApiError, Item, Page, RepoDetails, Repository, SearchType, User};
use crate::pagination::PageKey;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Serves pages of fixed sizes; page indices past the script return empty pages.
///
/// Item logins and names are derived from the `q=` parameter, page number and
/// position, e.g. `q=octocat-p1-3`, so tests can tell which query produced them.
pub struct ScriptedBackend {
    page_sizes: Vec<usize>,
    failures: Mutex<HashMap<usize, ApiError>>,
    gate: Option<Arc<Semaphore>>,
    requests: Mutex<Vec<PageKey>>,
    details: RepoDetails,
}

impl ScriptedBackend {
    /// One scripted page per entry, with that many items.
    pub fn with_pages(page_sizes: &[usize]) -> Self {
        Self {
            page_sizes: page_sizes.to_vec(),
            failures: Mutex::new(HashMap::new()),
            gate: None,
            requests: Mutex::new(Vec::new()),
            details: RepoDetails::default(),
        }
    }

    /// Fail the next request for `page_index` with `err` (one-shot).
    pub fn fail_page(self, page_index: usize, err: ApiError) -> Self {
        self.failures.lock().unwrap().insert(page_index, err);
        self
    }

    /// Hold every request until a permit is added to the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Details returned for every repository.
    pub fn with_details(mut self, details: RepoDetails) -> Self {
        self.details = details;
        self
    }

    /// Page keys requested so far, in order.
    pub fn requests(&self) -> Vec<PageKey> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of page requests so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn total_count(&self) -> u64 {
        self.page_sizes.iter().sum::<usize>() as u64
    }
}

/// A user with predictable URLs.
pub fn user(id: u64, login: &str) -> User {
    User {
        id,
        login: login.to_string(),
        avatar_url: format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
        html_url: format!("https://github.com/{login}"),
    }
}

/// A repository owned by `owner`, with counts derived from `id`.
pub fn repository(id: u64, owner: &str, name: &str) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        owner: user(id + 1_000_000, owner),
        html_url: format!("https://github.com/{owner}/{name}"),
        description: Some(format!("The {name} project")),
        languages_url: Some(format!("https://api.github.com/repos/{owner}/{name}/languages")),
        forks_url: Some(format!("https://api.github.com/repos/{owner}/{name}/forks")),
        stargazers_count: id * 10,
        forks_count: id % 7,
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search_page(&self, search_type: SearchType, key: &PageKey) -> Result<Page, ApiError> {
        self.requests.lock().unwrap().push(key.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        let failure = self.failures.lock().unwrap().remove(&key.page_index());
        if let Some(err) = failure {
            return Err(err);
        }

        let q = key.query_string().split('&').next().unwrap_or_default();
        let count = self.page_sizes.get(key.page_index()).copied().unwrap_or(0);
        let items = (0..count)
            .map(|i| {
                let id = (key.page_index() * 100 + i) as u64;
                let label = format!("{q}-p{}-{i}", key.page_number());
                match search_type {
                    SearchType::Users => Item::User(user(id, &label)),
                    SearchType::Repositories => Item::Repository(repository(id, "owner", &label)),
                }
            })
            .collect();

        Ok(Page::new(self.total_count(), items))
    }

    async fn repo_details(&self, _repo: &Repository) -> Result<RepoDetails, ApiError> {
        Ok(self.details.clone())
    }
}
