//! repohealth - GitHub repository health dashboard
//!
//! Fetches public repository metadata, scores it on four equally
//! weighted categories (activity, popularity, community, maintenance)
//! and renders the result for the terminal, scripts or a browser.
//!
//! The scoring engine is pure: [`scoring::compute_health_score`] takes a
//! [`models::RepositoryMetrics`] and never touches the network.

pub mod cli;
pub mod config;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
