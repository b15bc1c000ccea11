//! GitHub REST API client
//!
//! Uses ureq (sync HTTP). One analysis is a short sequence of blocking
//! requests, no async runtime needed.

use super::types::{
    ApiCommit, ApiIssue, ApiPull, ApiRepository, RateLimitResponse, SearchResult,
};
use super::{GithubError, GithubResult, RepoRef};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use ureq::http::Response;
use ureq::Body;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("repohealth/", env!("CARGO_PKG_VERSION"));

const PER_PAGE: usize = 100;
/// Commit pages fetched for the activity window (100 commits each)
const MAX_COMMIT_PAGES: u32 = 3;

/// Connection settings for [`GithubClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_url: String,
    /// Opaque bearer token, passed through untouched
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Core rate limit as reported by `GET /rate_limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset_at: Option<DateTime<Utc>>,
}

/// GitHub client, sync HTTP via ureq
pub struct GithubClient {
    settings: ClientSettings,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // Status codes are mapped to GithubError below
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl GithubClient {
    pub fn new(settings: ClientSettings) -> Self {
        let agent = make_agent(settings.timeout);
        Self { settings, agent }
    }

    pub fn is_authenticated(&self) -> bool {
        self.settings.token.is_some()
    }

    pub fn api_url(&self) -> &str {
        &self.settings.api_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Issue a GET request and map error statuses
    fn get(&self, path: &str, query: &[(&str, String)]) -> GithubResult<Response<Body>> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let mut req = self
            .agent
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", &self.settings.user_agent);
        if let Some(token) = &self.settings.token {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }
        for (key, value) in query {
            req = req.query(*key, value);
        }

        let response = req
            .call()
            .map_err(|e| GithubError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let reset_at = header(&response, "x-ratelimit-reset").and_then(|v| v.parse().ok());
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(GithubError::from_status(status, reset_at, message));
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> GithubResult<T> {
        self.get(path, query)?
            .into_body()
            .read_json()
            .map_err(|e| GithubError::Parse(e.to_string()))
    }

    /// `GET /repos/{owner}/{repo}`
    pub fn repository(&self, repo: &RepoRef) -> GithubResult<ApiRepository> {
        self.get_json(&format!("repos/{}/{}", repo.owner, repo.name), &[])
    }

    /// Number of contributors, anonymous ones included.
    ///
    /// Requests one contributor per page and reads the page count from the
    /// `Link` header, so the whole list is never downloaded.
    pub fn contributor_count(&self, repo: &RepoRef) -> GithubResult<u64> {
        let response = self.get(
            &format!("repos/{}/{}/contributors", repo.owner, repo.name),
            &[("per_page", "1".into()), ("anon", "true".into())],
        )?;

        // Empty repositories answer 204 without a body
        if response.status().as_u16() == 204 {
            return Ok(0);
        }
        if let Some(last) = header(&response, "link").and_then(|l| last_page_from_link(&l)) {
            return Ok(last);
        }
        let contributors: Vec<serde_json::Value> = response
            .into_body()
            .read_json()
            .map_err(|e| GithubError::Parse(e.to_string()))?;
        Ok(contributors.len() as u64)
    }

    /// `total_count` of an issue search, e.g. `repo:o/r type:issue state:closed`
    pub fn search_count(&self, query: &str) -> GithubResult<u64> {
        let result: SearchResult =
            self.get_json("search/issues", &[("q", query.to_string()), ("per_page", "1".into())])?;
        if result.incomplete_results {
            debug!("Search results incomplete for '{}'", query);
        }
        Ok(result.total_count)
    }

    /// Commit timestamps since `since`, oldest first
    pub fn commits_since(&self, repo: &RepoRef, since: DateTime<Utc>) -> GithubResult<Vec<DateTime<Utc>>> {
        let path = format!("repos/{}/{}/commits", repo.owner, repo.name);
        let mut timestamps = Vec::new();

        for page in 1..=MAX_COMMIT_PAGES {
            let commits: Vec<ApiCommit> = self.get_json(
                &path,
                &[
                    ("since", iso8601(since)),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let fetched = commits.len();
            timestamps.extend(commits.iter().filter_map(ApiCommit::timestamp));
            if fetched < PER_PAGE {
                break;
            }
        }

        timestamps.sort();
        Ok(timestamps)
    }

    /// Issues (pull requests excluded) updated since `since`
    pub fn issues_since(&self, repo: &RepoRef, since: DateTime<Utc>) -> GithubResult<u64> {
        let issues: Vec<ApiIssue> = self.get_json(
            &format!("repos/{}/{}/issues", repo.owner, repo.name),
            &[
                ("state", "all".into()),
                ("since", iso8601(since)),
                ("per_page", PER_PAGE.to_string()),
            ],
        )?;
        Ok(issues.iter().filter(|i| !i.is_pull_request()).count() as u64)
    }

    /// Pull requests opened since `since`
    pub fn pulls_since(&self, repo: &RepoRef, since: DateTime<Utc>) -> GithubResult<u64> {
        let pulls: Vec<ApiPull> = self.get_json(
            &format!("repos/{}/{}/pulls", repo.owner, repo.name),
            &[
                ("state", "all".into()),
                ("sort", "created".into()),
                ("direction", "desc".into()),
                ("per_page", PER_PAGE.to_string()),
            ],
        )?;
        Ok(pulls
            .iter()
            .filter(|p| p.created_at.is_some_and(|created| created >= since))
            .count() as u64)
    }

    /// `GET /rate_limit` (does not count against the limit)
    pub fn rate_limit(&self) -> GithubResult<RateLimit> {
        let resp: RateLimitResponse = self.get_json("rate_limit", &[])?;
        Ok(RateLimit {
            limit: resp.rate.limit,
            remaining: resp.rate.remaining,
            reset_at: DateTime::from_timestamp(resp.rate.reset, 0),
        })
    }
}

fn header(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Page number of the `rel="last"` entry of a `Link` header
pub(crate) fn last_page_from_link(link: &str) -> Option<u64> {
    link.split(',')
        .find(|part| part.contains("rel=\"last\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            let url = part.get(start..end)?;
            let query = url.split_once('?')?.1;
            query
                .split('&')
                .filter_map(|kv| kv.split_once('='))
                .find(|(k, _)| *k == "page")
                .and_then(|(_, v)| v.parse().ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_page_from_link() {
        let link = r#"<https://api.github.com/repositories/1/contributors?per_page=1&anon=true&page=2>; rel="next", <https://api.github.com/repositories/1/contributors?per_page=1&anon=true&page=437>; rel="last""#;
        assert_eq!(last_page_from_link(link), Some(437));
    }

    #[test]
    fn test_last_page_missing() {
        let link = r#"<https://api.github.com/x?page=1>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert_eq!(last_page_from_link(link), None);
        assert_eq!(last_page_from_link(""), None);
        assert_eq!(last_page_from_link("garbage"), None);
    }

    #[test]
    fn test_url_joining() {
        let client = GithubClient::new(ClientSettings {
            api_url: "https://ghe.example.com/api/v3/".into(),
            ..Default::default()
        });
        assert_eq!(
            client.url("/repos/a/b"),
            "https://ghe.example.com/api/v3/repos/a/b"
        );
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_iso8601_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 8, 7, 6).unwrap();
        assert_eq!(iso8601(ts), "2024-03-09T08:07:06Z");
    }

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert!(settings.user_agent.starts_with("repohealth/"));
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.token.is_none());
    }
}
