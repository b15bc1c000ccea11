//! GitHub REST API response types
//!
//! Only the fields repohealth reads are declared. Every field is optional
//! or defaulted so a partial response still deserializes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiRepository {
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub license: Option<ApiLicense>,
    pub default_branch: String,
    pub size: u64,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Real watchers. `watchers_count` mirrors stars and is ignored.
    pub subscribers_count: u64,
    /// Open issues plus open pull requests
    pub open_issues_count: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub archived: bool,
    pub fork: bool,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub has_projects: bool,
    pub has_discussions: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiLicense {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
}

/// One entry of `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiCommit {
    pub sha: String,
    pub commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiCommitDetail {
    pub author: Option<ApiSignature>,
    pub committer: Option<ApiSignature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSignature {
    pub date: Option<DateTime<Utc>>,
}

impl ApiCommit {
    /// Author date, falling back to the committer date
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let date = |sig: &Option<ApiSignature>| sig.as_ref().and_then(|s| s.date);
        date(&self.commit.author).or_else(|| date(&self.commit.committer))
    }
}

/// One entry of `GET /repos/{owner}/{repo}/issues`.
/// The issues endpoint also returns pull requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiIssue {
    pub number: u64,
    pub pull_request: Option<serde_json::Value>,
}

impl ApiIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// One entry of `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiPull {
    pub number: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /search/issues`. Only the total is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub total_count: u64,
    pub incomplete_results: bool,
}

/// `GET /rate_limit`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RateLimitResponse {
    pub rate: RateLimitRate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RateLimitRate {
    pub limit: u64,
    pub remaining: u64,
    pub reset: i64,
}
