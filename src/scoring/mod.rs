//! Repository Health Scoring
//!
//! Turns a [`RepositoryMetrics`](crate::models::RepositoryMetrics) record
//! into four category sub-scores and one overall score. The computation
//! is pure and deterministic.
//!
//! # Scoring Formula
//!
//! ```text
//! Overall = clamp(0.25 × Activity + 0.25 × Popularity
//!               + 0.25 × Community + 0.25 × Maintenance, 0, 100)
//!
//! Activity    = 100 × min(1, ln(1 + events) / ln(1 + 120))
//!               events = commits + 2 × issues + 3 × PRs   (last 30 days)
//! Popularity  = 60 × r(stars, 100k) + 25 × r(forks, 10k) + 15 × r(watchers, 1k)
//!               r(x, sat) = min(1, ln(1 + x) / ln(1 + sat))
//! Community   = 15 + 75 × min(1, ln(contributors) / ln(500))   (0 if unknown)
//!               + discussions 4, wiki 2, pages 2, projects 2
//! Maintenance = 0.6 × resolution + 0.4 × recency
//!               resolution = 100 × closed / (open + closed), 100 with no issues
//!               recency    = 100 within 7 days, then -100 pts/year, floor 10
//! ```
//!
//! Every sub-score is clamped to [0, 100] before it is averaged.
//!
//! # Example
//!
//! A repository with 50k stars, 8k forks, 1.2k watchers, 600 contributors,
//! 9000 closed vs 300 open issues, 180 commits this month and a push two
//! days ago scores roughly 100 / 96 / 90 / 98, overall ≈ 96 (Excellent).

mod health_scorer;

pub use health_scorer::{
    compute_health_score, explain, explain_health_score, issue_resolution, push_recency,
    CategoryBreakdown, ScoreBreakdown, CATEGORY_WEIGHT, NO_ISSUES_RESOLUTION,
};
