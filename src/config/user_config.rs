//! User-level configuration for repohealth
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/repohealth/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::github::{ClientSettings, DEFAULT_API_URL, DEFAULT_USER_AGENT};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Personal access token (raises the rate limit from 60 to 5000 req/h)
    pub token: Option<String>,

    /// API base URL (default: https://api.github.com)
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (0 means the default)
    pub timeout_secs: Option<u64>,

    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Output format used when `--format` is not given
    pub format: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/repohealth/config.toml)
    ///
    /// An unreadable or invalid file is logged and skipped.
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path() {
            match Self::load_from(&path) {
                Ok(Some(file_config)) => config.merge(file_config),
                Ok(None) => {}
                Err(e) => warn!("Ignoring user config: {:#}", e),
            }
        }

        // Environment variables override everything
        config.apply_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Read one config file. `Ok(None)` if it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str::<UserConfig>(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        Ok(Some(config))
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("repohealth").join("config.toml"))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Some(url) = non_empty("REPOHEALTH_API_URL") {
            self.github.api_url = Some(url);
        }
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.api_url.is_some() {
            self.github.api_url = other.github.api_url;
        }
        if other.github.timeout_secs.is_some() {
            self.github.timeout_secs = other.github.timeout_secs;
        }
        if other.github.user_agent.is_some() {
            self.github.user_agent = other.github.user_agent;
        }
        if other.defaults.format.is_some() {
            self.defaults.format = other.defaults.format;
        }
    }

    /// Get the GitHub token, if configured
    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    pub fn api_url(&self) -> &str {
        self.github.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Request timeout; a zero setting falls back to the default
    pub fn timeout(&self) -> Duration {
        let secs = self
            .github
            .timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn default_format(&self) -> &str {
        self.defaults.format.as_deref().unwrap_or("text")
    }

    /// Client settings, with a CLI-supplied token taking priority
    pub fn client_settings(&self, token_override: Option<String>) -> ClientSettings {
        let token = token_override
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.github.token.clone());
        ClientSettings {
            api_url: self.api_url().to_string(),
            token,
            user_agent: self
                .github
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self.timeout(),
        }
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_example(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config unless a file already exists.
    /// Returns true if a file was written.
    pub fn write_example(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Config as TOML with the token masked
    pub fn to_display_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if let Some(token) = &shown.github.token {
            shown.github.token = Some(mask_token(token));
        }
        Ok(toml::to_string_pretty(&shown)?)
    }
}

fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

const EXAMPLE_CONFIG: &str = r#"# repohealth user configuration

[github]
# Personal access token. Without one the API allows 60 requests per hour.
# Create one at https://github.com/settings/tokens (no scopes needed for public repos)
# token = "ghp_..."

# GitHub Enterprise users can point this at their API endpoint
# api_url = "https://api.github.com"

# timeout_secs = 30
# user_agent = "repohealth"

[defaults]
# text, json, html or markdown
# format = "text"
"#;
