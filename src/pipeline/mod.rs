//! Analysis pipeline
//!
//! Runs one analysis top to bottom:
//! 1. Fetch the repository (mandatory, errors abort)
//! 2. Fetch issue/PR totals and recent activity (best-effort)
//! 3. Build the validated metrics record
//! 4. Score it and assemble the [`RepoAnalysis`]

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::github::{
    self, build_metrics, build_repository_info, commit_timeline, ActivityCounts, GithubClient,
    GithubResult, IssueCounts, RepoRef,
};
use crate::models::{RepoAnalysis, RepositoryInfo, RepositoryMetrics};
use crate::scoring::compute_health_score;

/// Full analysis pipeline for one repository.
pub struct Pipeline<'a> {
    client: &'a GithubClient,
}

impl<'a> Pipeline<'a> {
    pub fn new(client: &'a GithubClient) -> Self {
        Self { client }
    }

    /// Fetch, score and assemble one analysis.
    ///
    /// `progress` receives a short message before each network step.
    pub fn run(
        &self,
        repo: &RepoRef,
        now: DateTime<Utc>,
        progress: impl Fn(&str),
    ) -> GithubResult<RepoAnalysis> {
        progress("Fetching repository...");
        let api_repo = self.client.repository(repo)?;
        debug!(
            "{}: {} stars, {} forks, pushed_at={:?}",
            repo, api_repo.stargazers_count, api_repo.forks_count, api_repo.pushed_at
        );

        progress("Counting issues and pull requests...");
        let issues = self.fetch_issue_counts(repo);

        progress("Fetching recent activity...");
        let activity = self.fetch_activity(repo, now);

        let metrics = build_metrics(&api_repo, &issues, &activity, now);
        let analysis = assemble(build_repository_info(&api_repo), metrics, now);

        info!(
            "Health score for {}: {:.1} ({}) - Activity: {:.1}, Popularity: {:.1}, Community: {:.1}, Maintenance: {:.1}",
            repo,
            analysis.score.overall,
            analysis.band,
            analysis.score.activity,
            analysis.score.popularity,
            analysis.score.community,
            analysis.score.maintenance
        );
        Ok(analysis)
    }

    fn fetch_issue_counts(&self, repo: &RepoRef) -> IssueCounts {
        let count = |kind: &str, state: &str| {
            let query = format!("repo:{} type:{} state:{}", repo, kind, state);
            best_effort(&query, self.client.search_count(&query))
        };
        IssueCounts {
            open_issues: count("issue", "open"),
            closed_issues: count("issue", "closed"),
            open_prs: count("pr", "open"),
            closed_prs: count("pr", "closed"),
        }
    }

    fn fetch_activity(&self, repo: &RepoRef, now: DateTime<Utc>) -> ActivityCounts {
        let since = github::window_start(now);
        ActivityCounts {
            contributors: best_effort("contributors", self.client.contributor_count(repo)),
            commit_timestamps: best_effort("commits", self.client.commits_since(repo, since)),
            recent_issues: best_effort("recent issues", self.client.issues_since(repo, since)),
            recent_prs: best_effort("recent pull requests", self.client.pulls_since(repo, since)),
        }
    }
}

/// Secondary lookups degrade to "unknown" instead of failing the analysis
fn best_effort<T>(what: &str, result: GithubResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Could not fetch {}: {}", what, e);
            None
        }
    }
}

/// Score a metrics record and wrap it with its display data
pub fn assemble(
    repository: RepositoryInfo,
    metrics: RepositoryMetrics,
    now: DateTime<Utc>,
) -> RepoAnalysis {
    let score = compute_health_score(&metrics);
    let commit_activity = commit_timeline(&metrics.commit_timestamps, now);
    RepoAnalysis {
        repository,
        band: score.band(),
        score,
        metrics,
        commit_activity,
        analyzed_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubError;
    use chrono::TimeZone;

    #[test]
    fn test_best_effort_swallows_errors() {
        let ok: GithubResult<u64> = Ok(3);
        assert_eq!(best_effort("x", ok), Some(3));
        let err: GithubResult<u64> = Err(GithubError::NotFound);
        assert_eq!(best_effort("x", err), None);
    }

    #[test]
    fn test_assemble_scores_and_builds_timeline() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let metrics = RepositoryMetrics {
            stars: 500,
            contributors: 3,
            days_since_last_push: 1,
            recent_commits: 2,
            commit_timestamps: vec![
                Utc.with_ymd_and_hms(2024, 6, 29, 8, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 30, 8, 0, 0).unwrap(),
            ],
            ..Default::default()
        };
        let analysis = assemble(RepositoryInfo::default(), metrics.clone(), now);
        assert_eq!(analysis.score, compute_health_score(&metrics));
        assert_eq!(analysis.band, analysis.score.band());
        assert_eq!(analysis.commit_activity.len(), 30);
        let charted: u32 = analysis.commit_activity.iter().map(|d| d.commits).sum();
        assert_eq!(u64::from(charted), analysis.metrics.recent_commits);
        assert_eq!(analysis.analyzed_at, now);
    }
}
