//! Configuration file loading with precedence handling.

use crate::api::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use crate::model::SearchType;
use crate::pagination::DEFAULT_MAX_EXTRA_PAGES;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the GitHub bearer credential.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API root.
pub const API_URL_ENV: &str = "GHSEARCH_API_URL";

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "GHSEARCH_CONFIG";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; missing ones fall back to defaults.
/// Corresponds to `~/.config/ghsearch/config.toml`. The credential is never
/// read from this file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// API root, e.g. a GitHub Enterprise `https://ghe.example.com/api/v3`.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// `User-Agent` header value.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Search type selected at startup (`"users"` or `"repositories"`).
    #[serde(default)]
    pub default_search_type: Option<SearchType>,

    /// Pages a single load-more may add.
    #[serde(default)]
    pub max_extra_pages: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Empty or whitespace-only values are treated as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.trim().to_string()))
        }
    }

    /// The raw credential, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// API root requests are resolved against.
    pub api_base_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Search type selected at startup.
    pub default_search_type: SearchType,
    /// Page budget for one load-more call.
    pub max_extra_pages: usize,
    /// File the tracing subscriber appends to.
    pub log_file_path: PathBuf,
    /// Credential from the environment; `None` means unauthenticated.
    pub token: Option<ApiToken>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_search_type: SearchType::default(),
            max_extra_pages: DEFAULT_MAX_EXTRA_PAGES,
            log_file_path: default_log_path(),
            token: None,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/ghsearch/ghsearch.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("ghsearch").join("ghsearch.log")
    } else {
        PathBuf::from("ghsearch.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path (`~/.config/ghsearch/config.toml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghsearch").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GHSEARCH_CONFIG` environment variable
/// 3. Default path `~/.config/ghsearch/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
        user_agent: config.user_agent.unwrap_or(defaults.user_agent),
        default_search_type: config
            .default_search_type
            .unwrap_or(defaults.default_search_type),
        max_extra_pages: config.max_extra_pages.unwrap_or(defaults.max_extra_pages),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        token: defaults.token,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GITHUB_TOKEN`: bearer credential (empty means unauthenticated)
/// - `GHSEARCH_API_URL`: API root
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        config.token = ApiToken::new(token);
    }

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.api_base_url = url;
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed are applied.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    search_type_override: Option<SearchType>,
    api_url_override: Option<String>,
) -> ResolvedConfig {
    if let Some(search_type) = search_type_override {
        config.default_search_type = search_type;
    }

    if let Some(url) = api_url_override {
        config.api_base_url = url;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
