//! Configuration module for repohealth
//!
//! This module handles:
//! - User-level configuration (~/.config/repohealth/config.toml)
//! - Environment overrides (`GITHUB_TOKEN`, `REPOHEALTH_API_URL`)
//! - CLI defaults

mod user_config;

pub use user_config::{DefaultsConfig, GithubConfig, UserConfig, DEFAULT_TIMEOUT_SECS};
