//! Weighted health scorer
//!
//! Each category is built from named contributions so the same code
//! path produces both the score and its explanation.

use crate::models::{HealthBand, HealthScore, RepositoryMetrics};

/// Weight of each category in the overall score
pub const CATEGORY_WEIGHT: f64 = 0.25;

/// Resolution term for a repository that never had an issue.
/// Absence of issues is not penalized.
pub const NO_ISSUES_RESOLUTION: f64 = 100.0;

/// Activity events (commit = 1, issue = 2, PR = 3) at which activity saturates
const VERY_ACTIVE_EVENTS: f64 = 120.0;
const ISSUE_EVENT_WEIGHT: u64 = 2;
const PR_EVENT_WEIGHT: u64 = 3;

const MAX_STAR_POINTS: f64 = 60.0;
const MAX_FORK_POINTS: f64 = 25.0;
const MAX_WATCHER_POINTS: f64 = 15.0;
const STAR_SATURATION: f64 = 100_000.0;
const FORK_SATURATION: f64 = 10_000.0;
const WATCHER_SATURATION: f64 = 1_000.0;

/// A solo-maintained repository still has a community
const SOLO_COMMUNITY_FLOOR: f64 = 15.0;
const MAX_CONTRIBUTOR_POINTS: f64 = 75.0;
const CONTRIBUTOR_SATURATION: f64 = 500.0;
const DISCUSSIONS_POINTS: f64 = 4.0;
const WIKI_POINTS: f64 = 2.0;
const PAGES_POINTS: f64 = 2.0;
const PROJECTS_POINTS: f64 = 2.0;

const RESOLUTION_WEIGHT: f64 = 0.6;
const RECENCY_WEIGHT: f64 = 0.4;
const FRESH_PUSH_DAYS: u64 = 7;
const RECENCY_DECAY_PER_DAY: f64 = 100.0 / 365.0;
const RECENCY_FLOOR: f64 = 10.0;

/// One category score with the contributions that make it up
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub name: &'static str,
    /// Clamped category score (0-100)
    pub score: f64,
    /// Named point contributions, summed before clamping
    pub contributions: Vec<(&'static str, f64)>,
}

impl CategoryBreakdown {
    fn new(name: &'static str, contributions: Vec<(&'static str, f64)>) -> Self {
        let raw: f64 = contributions.iter().map(|(_, points)| points).sum();
        Self {
            name,
            score: clamp_score(raw),
            contributions,
        }
    }
}

/// Complete score breakdown for transparency
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: HealthScore,
    pub band: HealthBand,
    pub activity: CategoryBreakdown,
    pub popularity: CategoryBreakdown,
    pub community: CategoryBreakdown,
    pub maintenance: CategoryBreakdown,
}

impl ScoreBreakdown {
    pub fn categories(&self) -> [&CategoryBreakdown; 4] {
        [
            &self.activity,
            &self.popularity,
            &self.community,
            &self.maintenance,
        ]
    }
}

/// Compute the health score for a metrics record.
///
/// Total over every input: there is no error path and no NaN output.
pub fn compute_health_score(metrics: &RepositoryMetrics) -> HealthScore {
    explain_health_score(metrics).score
}

/// Compute the health score together with its per-category breakdown
pub fn explain_health_score(metrics: &RepositoryMetrics) -> ScoreBreakdown {
    let activity = activity_breakdown(metrics);
    let popularity = popularity_breakdown(metrics);
    let community = community_breakdown(metrics);
    let maintenance = maintenance_breakdown(metrics);

    let overall = clamp_score(
        CATEGORY_WEIGHT * activity.score
            + CATEGORY_WEIGHT * popularity.score
            + CATEGORY_WEIGHT * community.score
            + CATEGORY_WEIGHT * maintenance.score,
    );

    let score = HealthScore {
        activity: activity.score,
        popularity: popularity.score,
        community: community.score,
        maintenance: maintenance.score,
        overall,
    };

    ScoreBreakdown {
        score,
        band: HealthBand::from_score(overall),
        activity,
        popularity,
        community,
        maintenance,
    }
}

fn activity_breakdown(metrics: &RepositoryMetrics) -> CategoryBreakdown {
    let events = metrics
        .recent_commits
        .saturating_add(metrics.recent_issues.saturating_mul(ISSUE_EVENT_WEIGHT))
        .saturating_add(metrics.recent_prs.saturating_mul(PR_EVENT_WEIGHT));
    let total = 100.0 * saturating_log_ratio(events as f64, VERY_ACTIVE_EVENTS);

    // Split the curve value across the event kinds in proportion to their weight
    let (commits, issues, prs) = if events == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let share = |weighted: u64| total * weighted as f64 / events as f64;
        (
            share(metrics.recent_commits),
            share(metrics.recent_issues.saturating_mul(ISSUE_EVENT_WEIGHT)),
            share(metrics.recent_prs.saturating_mul(PR_EVENT_WEIGHT)),
        )
    };

    CategoryBreakdown::new(
        "Activity",
        vec![
            ("Recent commits", commits),
            ("Recent issues", issues),
            ("Recent pull requests", prs),
        ],
    )
}

fn popularity_breakdown(metrics: &RepositoryMetrics) -> CategoryBreakdown {
    CategoryBreakdown::new(
        "Popularity",
        vec![
            (
                "Stars",
                MAX_STAR_POINTS * saturating_log_ratio(metrics.stars as f64, STAR_SATURATION),
            ),
            (
                "Forks",
                MAX_FORK_POINTS * saturating_log_ratio(metrics.forks as f64, FORK_SATURATION),
            ),
            (
                "Watchers",
                MAX_WATCHER_POINTS
                    * saturating_log_ratio(metrics.watchers as f64, WATCHER_SATURATION),
            ),
        ],
    )
}

fn community_breakdown(metrics: &RepositoryMetrics) -> CategoryBreakdown {
    let contributors = match metrics.contributors {
        0 => 0.0,
        n => {
            let ratio = ((n as f64).ln() / CONTRIBUTOR_SATURATION.ln()).min(1.0);
            SOLO_COMMUNITY_FLOOR + MAX_CONTRIBUTOR_POINTS * ratio
        }
    };
    let flag = |on: bool, points: f64| if on { points } else { 0.0 };

    CategoryBreakdown::new(
        "Community",
        vec![
            ("Contributors", contributors),
            ("Discussions", flag(metrics.has_discussions, DISCUSSIONS_POINTS)),
            ("Wiki", flag(metrics.has_wiki, WIKI_POINTS)),
            ("Pages", flag(metrics.has_pages, PAGES_POINTS)),
            ("Projects", flag(metrics.has_projects, PROJECTS_POINTS)),
        ],
    )
}

fn maintenance_breakdown(metrics: &RepositoryMetrics) -> CategoryBreakdown {
    CategoryBreakdown::new(
        "Maintenance",
        vec![
            ("Issue resolution", RESOLUTION_WEIGHT * issue_resolution(metrics)),
            ("Push recency", RECENCY_WEIGHT * push_recency(metrics.days_since_last_push)),
        ],
    )
}

/// Share of issues that are closed, on a 0-100 scale.
///
/// [`NO_ISSUES_RESOLUTION`] when the repository has no issues at all.
pub fn issue_resolution(metrics: &RepositoryMetrics) -> f64 {
    let total = metrics.total_issues();
    if total == 0 {
        return NO_ISSUES_RESOLUTION;
    }
    clamp_score(100.0 * metrics.closed_issues as f64 / total as f64)
}

/// Recency of the last push on a 0-100 scale, never below the floor
pub fn push_recency(days_since_last_push: u64) -> f64 {
    if days_since_last_push <= FRESH_PUSH_DAYS {
        return 100.0;
    }
    let stale_days = (days_since_last_push - FRESH_PUSH_DAYS) as f64;
    (100.0 - stale_days * RECENCY_DECAY_PER_DAY).max(RECENCY_FLOOR)
}

/// `min(1, ln(1 + value) / ln(1 + saturation))`
fn saturating_log_ratio(value: f64, saturation: f64) -> f64 {
    (value.ln_1p() / saturation.ln_1p()).min(1.0)
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Generate human-readable explanation of the score
pub fn explain(breakdown: &ScoreBreakdown) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "# Health Score: {:.1} ({})\n",
        breakdown.score.overall, breakdown.band
    ));

    lines.push("## Scoring Formula\n".to_string());
    lines.push("```".to_string());
    lines.push(
        "Overall = Activity × 0.25 + Popularity × 0.25 + Community × 0.25 + Maintenance × 0.25"
            .to_string(),
    );
    lines.push("Category = clamp(sum of contributions, 0, 100)".to_string());
    lines.push("```\n".to_string());

    for category in breakdown.categories() {
        lines.push(format!("## {} Score: {:.1}\n", category.name, category.score));
        for (name, points) in &category.contributions {
            lines.push(format!("- {}: {:.1} pts", name, points));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn popular_project() -> RepositoryMetrics {
        RepositoryMetrics {
            stars: 50_000,
            forks: 8_000,
            watchers: 1_200,
            open_issues: 300,
            closed_issues: 9_000,
            contributors: 600,
            days_since_last_push: 2,
            recent_commits: 180,
            ..Default::default()
        }
    }

    fn abandoned_solo_project() -> RepositoryMetrics {
        RepositoryMetrics {
            contributors: 1,
            days_since_last_push: 900,
            ..Default::default()
        }
    }

    fn random_metrics(rng: &mut StdRng) -> RepositoryMetrics {
        let mut count = |max: u64| rng.random_range(0..=max);
        RepositoryMetrics {
            stars: count(2_000_000),
            forks: count(200_000),
            watchers: count(50_000),
            open_issues: count(20_000),
            closed_issues: count(200_000),
            open_prs: count(5_000),
            closed_prs: count(100_000),
            contributors: count(5_000),
            days_since_last_push: count(5_000),
            days_since_creation: count(6_000),
            recent_commits: count(2_000),
            recent_issues: count(500),
            recent_prs: count(500),
            has_discussions: rng.random_bool(0.5),
            has_wiki: rng.random_bool(0.5),
            has_pages: rng.random_bool(0.5),
            has_projects: rng.random_bool(0.5),
            commit_timestamps: Vec::new(),
        }
    }

    fn assert_in_range(score: &HealthScore) {
        for value in [
            score.activity,
            score.popularity,
            score.community,
            score.maintenance,
            score.overall,
        ] {
            assert!(!value.is_nan(), "NaN in {:?}", score);
            assert!((0.0..=100.0).contains(&value), "out of range: {:?}", score);
        }
    }

    #[test]
    fn test_popular_project_is_excellent() {
        let score = compute_health_score(&popular_project());
        assert!(score.overall >= 90.0, "overall={}", score.overall);
        assert_eq!(score.band(), HealthBand::Excellent);
        assert_eq!(score.activity, 100.0);
    }

    #[test]
    fn test_abandoned_solo_project_is_poor_or_critical() {
        let score = compute_health_score(&abandoned_solo_project());
        assert!(score.overall < 40.0, "overall={}", score.overall);
        assert!(score.band() <= HealthBand::Poor);
        assert_eq!(score.activity, 0.0);
        assert_eq!(score.popularity, 0.0);
        // Solo maintainer still counts as a community
        assert!(score.community > 0.0);
    }

    #[test]
    fn test_all_zero_metrics_fully_defined() {
        let metrics = RepositoryMetrics {
            days_since_last_push: 0,
            ..Default::default()
        };
        let score = compute_health_score(&metrics);
        assert_in_range(&score);
        assert_eq!(score.activity, 0.0);
        assert_eq!(score.popularity, 0.0);
        assert_eq!(score.community, 0.0);
        assert_eq!(score.maintenance, 100.0);
    }

    #[test]
    fn test_default_metrics_use_recency_floor() {
        let score = compute_health_score(&RepositoryMetrics::default());
        assert_in_range(&score);
        assert!((score.maintenance - (0.6 * 100.0 + 0.4 * 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_issues_resolution_is_ceiling() {
        let metrics = RepositoryMetrics::default();
        assert_eq!(issue_resolution(&metrics), NO_ISSUES_RESOLUTION);
        assert_eq!(NO_ISSUES_RESOLUTION, 100.0);

        let breakdown = explain_health_score(&metrics);
        let (_, resolution) = breakdown.maintenance.contributions[0];
        assert_eq!(resolution, 0.6 * NO_ISSUES_RESOLUTION);
    }

    #[test]
    fn test_issue_resolution_ratio() {
        let metrics = RepositoryMetrics {
            open_issues: 25,
            closed_issues: 75,
            ..Default::default()
        };
        assert!((issue_resolution(&metrics) - 75.0).abs() < 1e-9);

        let all_open = RepositoryMetrics {
            open_issues: 10,
            ..Default::default()
        };
        assert_eq!(issue_resolution(&all_open), 0.0);
    }

    #[test]
    fn test_push_recency_decreases_to_floor() {
        assert_eq!(push_recency(0), 100.0);
        assert_eq!(push_recency(7), 100.0);
        let mut previous = push_recency(0);
        for days in (0..2_000).step_by(13) {
            let current = push_recency(days);
            assert!(current <= previous, "recency rose at day {}", days);
            assert!(current >= 10.0);
            previous = current;
        }
        assert_eq!(push_recency(900), 10.0);
        assert_eq!(push_recency(u64::MAX), 10.0);
    }

    #[test]
    fn test_scores_in_range_for_random_inputs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let score = compute_health_score(&random_metrics(&mut rng));
            assert_in_range(&score);
        }
    }

    #[test]
    fn test_overall_is_weighted_average() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let s = compute_health_score(&random_metrics(&mut rng));
            let expected = (0.25 * s.activity
                + 0.25 * s.popularity
                + 0.25 * s.community
                + 0.25 * s.maintenance)
                .clamp(0.0, 100.0);
            assert_eq!(s.overall, expected);
        }
    }

    #[test]
    fn test_extreme_counts_stay_clamped() {
        let metrics = RepositoryMetrics {
            stars: u64::MAX,
            forks: u64::MAX,
            watchers: u64::MAX,
            open_issues: u64::MAX,
            closed_issues: u64::MAX,
            contributors: u64::MAX,
            days_since_last_push: 0,
            recent_commits: u64::MAX,
            recent_issues: u64::MAX,
            recent_prs: u64::MAX,
            has_discussions: true,
            has_wiki: true,
            has_pages: true,
            has_projects: true,
            ..Default::default()
        };
        let score = compute_health_score(&metrics);
        assert_in_range(&score);
        assert_eq!(score.popularity, 100.0);
        assert_eq!(score.community, 100.0);
    }

    #[test]
    fn test_more_stars_never_lowers_score() {
        let mut metrics = popular_project();
        metrics.stars = 0;
        let mut previous = compute_health_score(&metrics);
        for stars in [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, u64::MAX] {
            metrics.stars = stars;
            let current = compute_health_score(&metrics);
            assert!(current.popularity >= previous.popularity);
            assert!(current.overall >= previous.overall);
            previous = current;
        }
    }

    #[test]
    fn test_popularity_differentiates_large_repos() {
        let small = RepositoryMetrics {
            stars: 100,
            ..Default::default()
        };
        let large = RepositoryMetrics {
            stars: 100_000,
            ..Default::default()
        };
        let small = compute_health_score(&small).popularity;
        let large = compute_health_score(&large).popularity;
        assert!(small > 0.0);
        assert!(large > small * 2.0, "small={} large={}", small, large);
        assert!(large <= 100.0);
    }

    #[test]
    fn test_activity_monotonic_and_saturates() {
        let mut previous = 0.0;
        for commits in [0, 1, 5, 20, 60, 119, 120, 500] {
            let metrics = RepositoryMetrics {
                recent_commits: commits,
                ..Default::default()
            };
            let activity = compute_health_score(&metrics).activity;
            assert!(activity >= previous);
            previous = activity;
        }
        assert_eq!(previous, 100.0);

        let prs_only = RepositoryMetrics {
            recent_prs: 40,
            ..Default::default()
        };
        assert_eq!(compute_health_score(&prs_only).activity, 100.0);
    }

    #[test]
    fn test_community_floor_and_signals() {
        let solo = RepositoryMetrics {
            contributors: 1,
            ..Default::default()
        };
        let solo_score = compute_health_score(&solo).community;
        assert_eq!(solo_score, 15.0);

        let with_discussions = RepositoryMetrics {
            has_discussions: true,
            ..solo.clone()
        };
        assert!(compute_health_score(&with_discussions).community > solo_score);

        let team = RepositoryMetrics {
            contributors: 50,
            ..Default::default()
        };
        assert!(compute_health_score(&team).community > solo_score);
    }

    #[test]
    fn test_idempotent_bit_identical() {
        let metrics = popular_project();
        let a = compute_health_score(&metrics);
        let b = compute_health_score(&metrics);
        assert_eq!(a.overall.to_bits(), b.overall.to_bits());
        assert_eq!(a.activity.to_bits(), b.activity.to_bits());
        assert_eq!(a.popularity.to_bits(), b.popularity.to_bits());
        assert_eq!(a.community.to_bits(), b.community.to_bits());
        assert_eq!(a.maintenance.to_bits(), b.maintenance.to_bits());
    }

    #[test]
    fn test_breakdown_contributions_sum_to_category() {
        let breakdown = explain_health_score(&popular_project());
        for category in breakdown.categories() {
            let raw: f64 = category.contributions.iter().map(|(_, p)| p).sum();
            assert!((raw.clamp(0.0, 100.0) - category.score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_explain_mentions_every_category() {
        let text = explain(&explain_health_score(&popular_project()));
        assert!(text.starts_with("# Health Score:"));
        for name in ["Activity", "Popularity", "Community", "Maintenance"] {
            assert!(text.contains(&format!("## {} Score", name)), "missing {}", name);
        }
        assert!(text.contains("Excellent"));
    }
}
