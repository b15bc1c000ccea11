//! Construction of [`RepositoryMetrics`] from API data
//!
//! This is the only place raw API values are turned into scoring input,
//! so every defaulting rule lives here. The clock is a parameter, which
//! keeps the whole step pure.

use super::types::ApiRepository;
use crate::models::{CommitDay, RepositoryInfo, RepositoryMetrics, UNKNOWN_AGE_DAYS};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Length of the trailing activity window
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Issue and pull request totals. `None` means the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub open_issues: Option<u64>,
    pub closed_issues: Option<u64>,
    pub open_prs: Option<u64>,
    pub closed_prs: Option<u64>,
}

/// Contributor and recent-activity data. `None` means the lookup failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityCounts {
    pub contributors: Option<u64>,
    pub commit_timestamps: Option<Vec<DateTime<Utc>>>,
    pub recent_issues: Option<u64>,
    pub recent_prs: Option<u64>,
}

/// First calendar day (UTC) of the activity window ending at `now`
fn first_window_day(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() - Duration::days(ACTIVITY_WINDOW_DAYS - 1)
}

/// Start of the activity window ending at `now`.
///
/// Midnight UTC of the oldest timeline day, so the window covers exactly
/// the days [`commit_timeline`] draws.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    first_window_day(now).and_time(NaiveTime::MIN).and_utc()
}

fn in_window(ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    ts >= window_start(now) && ts <= now
}

fn days_between(earlier: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - earlier).num_days()).unwrap_or(0)
}

/// Build the scoring input for one repository.
///
/// Unknown counts become zero and an unknown push date becomes
/// [`UNKNOWN_AGE_DAYS`]. Issue totals are kept only as a known pair: a
/// failed open-issue search falls back to `open_issues_count` minus the
/// open pull requests, and when that is not possible either, or the
/// closed-issue search failed, both totals are zero so issue resolution
/// stays neutral.
pub fn build_metrics(
    repo: &ApiRepository,
    issues: &IssueCounts,
    activity: &ActivityCounts,
    now: DateTime<Utc>,
) -> RepositoryMetrics {
    let (open_issues, closed_issues) = issue_totals(repo, issues);

    let mut commit_timestamps: Vec<DateTime<Utc>> = activity
        .commit_timestamps
        .iter()
        .flatten()
        .copied()
        .filter(|ts| in_window(*ts, now))
        .collect();
    commit_timestamps.sort();

    RepositoryMetrics {
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        watchers: repo.subscribers_count,
        open_issues,
        closed_issues,
        open_prs: issues.open_prs.unwrap_or(0),
        closed_prs: issues.closed_prs.unwrap_or(0),
        contributors: activity.contributors.unwrap_or(0),
        days_since_last_push: repo
            .pushed_at
            .map(|pushed| days_between(pushed, now))
            .unwrap_or(UNKNOWN_AGE_DAYS),
        days_since_creation: repo
            .created_at
            .map(|created| days_between(created, now))
            .unwrap_or(0),
        recent_commits: commit_timestamps.len() as u64,
        recent_issues: activity.recent_issues.unwrap_or(0),
        recent_prs: activity.recent_prs.unwrap_or(0),
        has_discussions: repo.has_discussions,
        has_wiki: repo.has_wiki,
        has_pages: repo.has_pages,
        has_projects: repo.has_projects,
        commit_timestamps,
    }
}

/// Open and closed issue totals, or `(0, 0)` when either is unknown
fn issue_totals(repo: &ApiRepository, issues: &IssueCounts) -> (u64, u64) {
    let open = issues.open_issues.or_else(|| {
        issues
            .open_prs
            .map(|prs| repo.open_issues_count.saturating_sub(prs))
    });
    match (open, issues.closed_issues) {
        (Some(open), Some(closed)) => (open, closed),
        _ => (0, 0),
    }
}

/// Descriptive fields for the reporters
pub fn build_repository_info(repo: &ApiRepository) -> RepositoryInfo {
    RepositoryInfo {
        full_name: repo.full_name.clone(),
        description: repo.description.clone().filter(|d| !d.trim().is_empty()),
        language: repo.language.clone(),
        topics: repo.topics.clone(),
        license: repo.license.as_ref().map(|l| l.name.clone()),
        default_branch: if repo.default_branch.is_empty() {
            "main".to_string()
        } else {
            repo.default_branch.clone()
        },
        size_kb: repo.size,
        created_at: repo.created_at,
        updated_at: repo.updated_at,
        html_url: repo.html_url.clone(),
        clone_url: repo.clone_url.clone(),
        homepage: repo.homepage.clone().filter(|h| !h.trim().is_empty()),
        archived: repo.archived,
        fork: repo.fork,
        has_issues: repo.has_issues,
    }
}

/// Daily commit counts for the trailing window, oldest first, zero-filled
pub fn commit_timeline(timestamps: &[DateTime<Utc>], now: DateTime<Utc>) -> Vec<CommitDay> {
    let first = first_window_day(now);
    let mut days: Vec<CommitDay> = (0..ACTIVITY_WINDOW_DAYS)
        .map(|offset| CommitDay {
            date: first + Duration::days(offset),
            commits: 0,
        })
        .collect();

    for ts in timestamps {
        if !in_window(*ts, now) {
            continue;
        }
        let date = ts.date_naive();
        let index = usize::try_from((date - first).num_days()).unwrap_or(usize::MAX);
        if let Some(day) = days.get_mut(index) {
            day.commits = day.commits.saturating_add(1);
        }
    }
    days
}
