//! GitHub REST API collaborator
//!
//! Everything that touches the network or the raw API shape lives here:
//! URL parsing, the authenticated HTTP client, the typed response structs
//! and the single step that turns API data into a validated
//! [`RepositoryMetrics`](crate::models::RepositoryMetrics).
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: optional personal access token, raises rate limits

mod client;
mod metrics;
mod types;
mod url;

pub use client::{ClientSettings, GithubClient, RateLimit, DEFAULT_API_URL, DEFAULT_USER_AGENT};
pub use metrics::{
    build_metrics, build_repository_info, commit_timeline, window_start, ActivityCounts,
    IssueCounts, ACTIVITY_WINDOW_DAYS,
};
pub use types::{ApiCommit, ApiIssue, ApiLicense, ApiPull, ApiRepository, SearchResult};
pub use url::{parse_repo_url, RepoRef};

use thiserror::Error;

/// Errors that can occur while talking to GitHub
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("Invalid GitHub repository URL '{0}'. Expected https://github.com/owner/repo")]
    InvalidUrl(String),

    #[error("Repository not found. Check the URL and make sure the repository is public.")]
    NotFound,

    #[error("Invalid GitHub token. Check your personal access token.")]
    InvalidToken,

    #[error("API rate limit exceeded{}. Provide a token with --token or GITHUB_TOKEN.", reset_hint(.reset_at))]
    RateLimited { reset_at: Option<i64> },

    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

fn reset_hint(reset_at: &Option<i64>) -> String {
    reset_at
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|t| format!(" (resets at {})", t.format("%H:%M:%S UTC")))
        .unwrap_or_default()
}

impl GithubError {
    /// Map an HTTP error status to an error
    pub fn from_status(status: u16, reset_at: Option<i64>, message: String) -> Self {
        match status {
            401 => GithubError::InvalidToken,
            403 | 429 => GithubError::RateLimited { reset_at },
            404 => GithubError::NotFound,
            _ => GithubError::Api { status, message },
        }
    }
}

pub type GithubResult<T> = Result<T, GithubError>;
