//! Search result items as returned by the GitHub API.
//!
//! Field names follow the wire format so the types deserialize directly.
//! Unknown fields are ignored; only the fields rendered by the UI are kept.

use serde::{Deserialize, Serialize};

/// A GitHub account (user or organisation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// GitHub user id.
    pub id: u64,
    /// Account name.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Profile page URL.
    pub html_url: String,
}

/// A GitHub repository. Also used for fork listings, which share the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// GitHub repository id.
    pub id: u64,
    /// Repository name without the owner.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Owning user or organization.
    pub owner: User,
    /// Repository page URL.
    pub html_url: String,
    /// Short description, if the owner set one.
    #[serde(default)]
    pub description: Option<String>,
    /// Endpoint mapping language names to byte counts.
    #[serde(default)]
    pub languages_url: Option<String>,
    /// Endpoint listing forks.
    #[serde(default)]
    pub forks_url: Option<String>,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
}

/// One entry of a search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Item {
    /// Result of a user search.
    User(User),
    /// Result of a repository search.
    Repository(Repository),
}

impl Item {
    /// GitHub id of the user or repository.
    pub fn id(&self) -> u64 {
        match self {
            Item::User(user) => user.id,
            Item::Repository(repo) => repo.id,
        }
    }

    /// Primary display name: login for users, `owner/name` for repositories.
    pub fn title(&self) -> &str {
        match self {
            Item::User(user) => &user.login,
            Item::Repository(repo) => &repo.full_name,
        }
    }

    /// Page to open for this result.
    pub fn html_url(&self) -> &str {
        match self {
            Item::User(user) => &user.html_url,
            Item::Repository(repo) => &repo.html_url,
        }
    }

    /// The repository, for repository results.
    pub fn as_repository(&self) -> Option<&Repository> {
        match self {
            Item::Repository(repo) => Some(repo),
            Item::User(_) => None,
        }
    }

    /// The user, for user results.
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Item::User(user) => Some(user),
            Item::Repository(_) => None,
        }
    }
}

/// Number of forks listed in a repository's detail view.
pub const FORK_PREVIEW_LIMIT: usize = 3;

/// Secondary data shown for a selected repository.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoDetails {
    /// Language names from the repository's `languages_url`.
    pub languages: Vec<String>,
    /// Newest forks (at most [`FORK_PREVIEW_LIMIT`]).
    pub forks: Vec<Repository>,
}

/// Caption above the fork list: "Last 3 forks of N" or "N forks".
pub fn forks_caption(forks_count: u64) -> String {
    if forks_count > FORK_PREVIEW_LIMIT as u64 {
        format!("Last {} forks of {}", FORK_PREVIEW_LIMIT, forks_count)
    } else {
        format!("{} forks", forks_count)
    }
}
