//! Core data models for repohealth
//!
//! These models carry one analysis from the GitHub boundary, through
//! the scoring engine, to the reporters. Nothing here is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Push age used when the real value is unknown.
///
/// Large enough that the maintenance recency term sits on its floor.
pub const UNKNOWN_AGE_DAYS: u64 = 3650;

fn unknown_age() -> u64 {
    UNKNOWN_AGE_DAYS
}

/// Normalized repository metrics, independent of the raw API shape.
///
/// Every field is optional on the wire. Missing counts are zero,
/// missing flags are false and a missing push age is [`UNKNOWN_AGE_DAYS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryMetrics {
    pub stars: u64,
    pub forks: u64,
    /// Subscribers, not the legacy `watchers_count` (which mirrors stars)
    pub watchers: u64,
    pub open_issues: u64,
    pub closed_issues: u64,
    pub open_prs: u64,
    /// Merged or closed pull requests
    pub closed_prs: u64,
    pub contributors: u64,
    #[serde(default = "unknown_age")]
    pub days_since_last_push: u64,
    pub days_since_creation: u64,
    /// Commits in the trailing 30-day window
    pub recent_commits: u64,
    /// Issues (not PRs) updated in the trailing 30-day window
    pub recent_issues: u64,
    /// Pull requests opened in the trailing 30-day window
    pub recent_prs: u64,
    pub has_discussions: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub has_projects: bool,
    /// Recent commit timestamps, oldest first
    pub commit_timestamps: Vec<DateTime<Utc>>,
}

impl Default for RepositoryMetrics {
    fn default() -> Self {
        Self {
            stars: 0,
            forks: 0,
            watchers: 0,
            open_issues: 0,
            closed_issues: 0,
            open_prs: 0,
            closed_prs: 0,
            contributors: 0,
            days_since_last_push: UNKNOWN_AGE_DAYS,
            days_since_creation: 0,
            recent_commits: 0,
            recent_issues: 0,
            recent_prs: 0,
            has_discussions: false,
            has_wiki: false,
            has_pages: false,
            has_projects: false,
            commit_timestamps: Vec::new(),
        }
    }
}

impl RepositoryMetrics {
    /// Total issues ever filed (open + closed)
    pub fn total_issues(&self) -> u64 {
        self.open_issues.saturating_add(self.closed_issues)
    }
}

/// Composite health score. All five fields lie in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub activity: f64,
    pub popularity: f64,
    pub community: f64,
    pub maintenance: f64,
    pub overall: f64,
}

impl HealthScore {
    pub fn band(&self) -> HealthBand {
        HealthBand::from_score(self.overall)
    }

    /// Sub-scores in display order
    pub fn categories(&self) -> [(&'static str, f64); 4] {
        [
            ("Activity", self.activity),
            ("Popularity", self.popularity),
            ("Community", self.community),
            ("Maintenance", self.maintenance),
        ]
    }
}

/// Interpretation bands for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => HealthBand::Excellent,
            s if s >= 70.0 => HealthBand::Good,
            s if s >= 40.0 => HealthBand::Fair,
            s if s >= 20.0 => HealthBand::Poor,
            _ => HealthBand::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Excellent => "Excellent",
            HealthBand::Good => "Good",
            HealthBand::Fair => "Fair",
            HealthBand::Poor => "Poor",
            HealthBand::Critical => "Critical",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HealthBand::Excellent => "Very active, popular and well maintained",
            HealthBand::Good => "Healthy with room for improvement",
            HealthBand::Fair => "Some areas need attention",
            HealthBand::Poor => "Low activity or maintenance concerns",
            HealthBand::Critical => "Inactive or unmaintained",
        }
    }
}

impl std::fmt::Display for HealthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Descriptive repository fields. Shown by reporters, never scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<String>,
    pub default_branch: String,
    /// Repository size in KB
    pub size_kb: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: String,
    pub clone_url: String,
    pub homepage: Option<String>,
    pub archived: bool,
    pub fork: bool,
    pub has_issues: bool,
}

/// Commits on one calendar day (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDay {
    pub date: NaiveDate,
    pub commits: u32,
}

/// One complete analysis, passed explicitly from fetch to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoAnalysis {
    pub repository: RepositoryInfo,
    pub metrics: RepositoryMetrics,
    pub score: HealthScore,
    pub band: HealthBand,
    /// Trailing 30 days, oldest first, zero-filled
    pub commit_activity: Vec<CommitDay>,
    pub analyzed_at: DateTime<Utc>,
}
