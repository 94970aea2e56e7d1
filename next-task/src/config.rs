//! Configuration loading for next-task
//!
//! Configuration is layered, later layers winning:
//! 1. Default values
//! 2. TOML file (`--config` / `NEXT_TASK_CONFIG_PATH`, else
//!    `<config dir>/next-task/config.toml` when it exists)
//! 3. Environment variables (`NOTION_TOKEN`, `NOTION_DATABASE_ID`,
//!    `NEXT_TASK_SECRET`, `NEXT_TASK_PROP_*`, ...)
//! 4. Command line flags for the listen address
//!
//! Missing credentials are not a load error: the server still starts and
//! rejects requests until they are provided.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use task_ranking::{RankingConfig, TitleFallback};
use url::Url;

/// Notion's documented maximum page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Property names and label orders used for ranking
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Notion API access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token
    #[serde(default)]
    pub token: Option<String>,
    /// Database holding the tasks
    #[serde(default)]
    pub database_id: Option<String>,
    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Value sent in the `Notion-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Number of open tasks fetched per request
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Number of databases returned by the debug listing
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Shared secret required on every API request
    #[serde(default)]
    pub secret: Option<String>,
}

fn default_api_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_search_page_size() -> u32 {
    25
}

fn default_timeout() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            api_url: default_api_url(),
            api_version: default_api_version(),
            page_size: default_page_size(),
            search_page_size: default_search_page_size(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl NotionConfig {
    /// Database id, treating a blank value as unset
    pub fn database(&self) -> Option<&str> {
        self.database_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secret: None,
        }
    }
}

impl Config {
    /// Load configuration from file and environment, then validate it
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::find_config_path(explicit_path) {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                Self::load_from_path(&path)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// An explicit path is used as-is (and must exist); the default location
    /// is only used when present.
    fn find_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }

        let default_path = dirs::config_dir()?.join("next-task").join("config.toml");
        default_path.exists().then_some(default_path)
    }

    /// Overlay values from the environment
    ///
    /// Takes a lookup function so tests don't have to touch process state.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("NOTION_TOKEN") {
            self.notion.token = Some(token);
        }
        if let Some(id) = get("NOTION_DATABASE_ID") {
            self.notion.database_id = Some(id);
        }
        if let Some(url) = get("NOTION_API_URL") {
            self.notion.api_url = url;
        }
        if let Some(secret) = get("NEXT_TASK_SECRET") {
            self.server.secret = Some(secret);
        }

        let props = &mut self.ranking.properties;
        if let Some(name) = get("NEXT_TASK_PROP_DONE") {
            props.done = name;
        }
        if let Some(name) = get("NEXT_TASK_PROP_SCHEDULED") {
            props.scheduled = name;
        }
        if let Some(name) = get("NEXT_TASK_PROP_STATUS") {
            props.status = name;
        }
        if let Some(name) = get("NEXT_TASK_PROP_PRIORITY") {
            props.priority = name;
        }

        // Lists may be deliberately emptied, so only unset means "keep"
        if let Some(list) = lookup("NEXT_TASK_HOT_STATUSES") {
            self.ranking.hot_statuses = split_list(&list);
        }
        if let Some(list) = lookup("NEXT_TASK_PRIORITY_ORDER") {
            self.ranking.priority_order = split_list(&list);
        }
        if let Some(mode) = get("NEXT_TASK_TITLE_FALLBACK") {
            match mode.parse::<TitleFallback>() {
                Ok(fallback) => self.ranking.title_fallback = fallback,
                Err(e) => tracing::warn!("Ignoring NEXT_TASK_TITLE_FALLBACK: {}", e),
            }
        }
    }

    /// Validate settings that would otherwise fail on every request
    pub fn validate(&self) -> Result<()> {
        self.ranking
            .validate()
            .context("invalid ranking configuration")?;

        let url = Url::parse(&self.notion.api_url)
            .with_context(|| format!("invalid Notion API URL: {}", self.notion.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Notion API URL must be http(s): {}", self.notion.api_url);
        }

        for (name, size) in [
            ("page_size", self.notion.page_size),
            ("search_page_size", self.notion.search_page_size),
        ] {
            if size == 0 || size > MAX_PAGE_SIZE {
                bail!("notion.{} must be between 1 and {}, got {}", name, MAX_PAGE_SIZE, size);
            }
        }

        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
