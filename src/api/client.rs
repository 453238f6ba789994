//! HTTP client for the GitHub REST API.
//!
//! Every request carries the default GitHub headers (bearer credential and the
//! v3 `Accept` type). Caller-supplied headers are layered on top and win on
//! collision. Non-2xx responses become [`ApiError::RemoteApi`]; failures before a
//! response exists become [`ApiError::Transport`].

use super::backend::SearchBackend;
use crate::model::{ApiError, Page, RepoDetails, Repository, SearchType, FORK_PREVIEW_LIMIT};
use crate::pagination::PageKey;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;
use tracing::{debug, info};

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Media type requesting the v3 JSON representation.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// User agent sent when none is configured. GitHub rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("ghsearch/", env!("CARGO_PKG_VERSION"));

/// Per-request overrides for [`GithubClient::fetch_resource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// HTTP method, `GET` when unset.
    pub method: Option<Method>,
    /// Raw request body.
    pub body: Option<String>,
    /// Extra headers; these replace defaults with the same name.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// HTTP method; GET when unset.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Raw request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Extra header; wins over the default headers on collision.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// GitHub API gateway client.
#[derive(Clone)]
pub struct GithubClient {
    http: ReqwestClient,
    api_base: String,
    token: Option<String>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_base", &self.api_base)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GithubClient {
    /// Start building a new client.
    pub fn builder() -> GithubClientBuilder {
        GithubClientBuilder::default()
    }

    /// API root this client resolves search URLs against.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Whether requests carry a bearer credential.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn default_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                ApiError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    reason: err.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Request `url` and return the body as untyped JSON.
    ///
    /// # Errors
    ///
    /// - [`ApiError::RemoteApi`] for any non-2xx status
    /// - [`ApiError::Transport`] when no response was received
    /// - [`ApiError::Decode`] when the body is not JSON
    /// - [`ApiError::InvalidHeader`] when an override cannot be encoded
    pub async fn fetch_resource(&self, url: &str, options: RequestOptions) -> Result<Value, ApiError> {
        info!(%url, "GitHub request");

        let mut headers = self.default_headers()?;
        for (name, value) in &options.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|err| ApiError::InvalidHeader {
                    name: name.clone(),
                    reason: err.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|err| ApiError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let method = options.method.unwrap_or(Method::GET);
        let mut request = self.http.request(method.clone(), url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|err| {
            debug!(%method, %url, error = %err, "GitHub request failed");
            ApiError::Transport {
                url: url.to_string(),
                reason: err.to_string(),
            }
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "GitHub response");

        if !status.is_success() {
            return Err(ApiError::RemoteApi {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response.json::<Value>().await.map_err(|err| ApiError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }

    /// Fetch one search page.
    pub async fn search(&self, search_type: SearchType, key: &PageKey) -> Result<Page, ApiError> {
        let url = key.url(&self.api_base);
        let body = self.fetch_resource(&url, RequestOptions::default()).await?;
        Page::from_json(search_type, body).map_err(|err| ApiError::Decode {
            url,
            reason: err.to_string(),
        })
    }

    /// Language names of a repository (the keys of `languages_url`'s mapping).
    pub async fn fetch_languages(&self, languages_url: &str) -> Result<Vec<String>, ApiError> {
        let body = self.fetch_resource(languages_url, RequestOptions::default()).await?;
        match body {
            Value::Object(map) => Ok(map.into_iter().map(|(name, _)| name).collect()),
            other => Err(ApiError::Decode {
                url: languages_url.to_string(),
                reason: format!("expected an object of languages, got {other}"),
            }),
        }
    }

    /// Newest forks of a repository.
    pub async fn fetch_forks(&self, forks_url: &str) -> Result<Vec<Repository>, ApiError> {
        let url = format!("{forks_url}?per_page={FORK_PREVIEW_LIMIT}&sort=newest");
        let body = self.fetch_resource(&url, RequestOptions::default()).await?;
        serde_json::from_value(body).map_err(|err| ApiError::Decode {
            url,
            reason: err.to_string(),
        })
    }

    /// Languages and forks for a repository card, fetched concurrently.
    ///
    /// A missing URL yields an empty list without issuing a request.
    pub async fn fetch_repo_details(&self, repo: &Repository) -> Result<RepoDetails, ApiError> {
        let languages = async {
            match repo.languages_url.as_deref() {
                Some(url) => self.fetch_languages(url).await,
                None => Ok(Vec::new()),
            }
        };
        let forks = async {
            match repo.forks_url.as_deref() {
                Some(url) => self.fetch_forks(url).await,
                None => Ok(Vec::new()),
            }
        };

        let (languages, forks) = tokio::join!(languages, forks);
        Ok(RepoDetails {
            languages: languages?,
            forks: forks?,
        })
    }
}

#[async_trait]
impl SearchBackend for GithubClient {
    async fn search_page(&self, search_type: SearchType, key: &PageKey) -> Result<Page, ApiError> {
        self.search(search_type, key).await
    }

    async fn repo_details(&self, repo: &Repository) -> Result<RepoDetails, ApiError> {
        self.fetch_repo_details(repo).await
    }
}

/// Builder for [`GithubClient`].
#[derive(Debug)]
pub struct GithubClientBuilder {
    api_base: String,
    token: Option<String>,
    user_agent: String,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GithubClientBuilder {
    /// API root; a trailing slash is dropped.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Bearer credential. Empty strings are treated as absent.
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// `User-Agent` header value.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<GithubClient, ApiError> {
        let http = ReqwestClient::builder()
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| ApiError::Transport {
                url: self.api_base.clone(),
                reason: err.to_string(),
            })?;

        Ok(GithubClient {
            http,
            api_base: self.api_base,
            token: self.token,
        })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
