//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - README badges and status pages
//! - Issue or pull request comments
//! - GitHub wikis

use super::thousands;
use crate::models::{HealthBand, RepoAnalysis};
use anyhow::Result;

/// Render analysis as GitHub-flavored Markdown
pub fn render(analysis: &RepoAnalysis) -> Result<String> {
    let mut md = String::new();

    // Header
    md.push_str(&render_header(analysis));
    md.push('\n');

    // Table of Contents
    md.push_str(&render_toc());
    md.push('\n');

    // Summary
    md.push_str(&render_summary(analysis));
    md.push('\n');

    // Category Scores
    md.push_str(&render_category_scores(analysis));
    md.push('\n');

    // Key Metrics
    md.push_str(&render_metrics(analysis));
    md.push('\n');

    // Commit Activity
    md.push_str(&render_commit_activity(analysis));
    md.push('\n');

    // Repository
    md.push_str(&render_repository(analysis));
    md.push('\n');

    // Footer
    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(analysis: &RepoAnalysis) -> String {
    let name = if analysis.repository.full_name.is_empty() {
        "Repository"
    } else {
        analysis.repository.full_name.as_str()
    };

    format!(
        r#"# {} {} Health Report

**Band: {}** | **Score: {:.1}/100**

Generated: {}
"#,
        band_emoji(analysis.band),
        table_cell(name),
        analysis.band,
        analysis.score.overall,
        analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn render_toc() -> String {
    r#"## Table of Contents

- [Summary](#summary)
- [Category Scores](#category-scores)
- [Key Metrics](#key-metrics)
- [Commit Activity](#commit-activity)
- [Repository](#repository)
"#
    .to_string()
}

fn render_summary(analysis: &RepoAnalysis) -> String {
    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Health Band** | {} |
| **Overall Score** | {:.1}/100 |
| **Commits (30 days)** | {} |
| **Assessment** | {} |
"#,
        analysis.band,
        analysis.score.overall,
        thousands(analysis.metrics.recent_commits),
        analysis.band.description()
    )
}

fn render_category_scores(analysis: &RepoAnalysis) -> String {
    let mut md = String::from(
        "## Category Scores\n\n| Category | Weight | Score | Status |\n|----------|--------|-------|--------|\n",
    );
    for (name, value) in analysis.score.categories() {
        md.push_str(&format!(
            "| {} | 25% | {:.1}/100 | {} |\n",
            name,
            value,
            score_indicator(value)
        ));
    }
    md
}

fn render_metrics(analysis: &RepoAnalysis) -> String {
    let m = &analysis.metrics;
    let features: Vec<&str> = [
        (m.has_discussions, "Discussions"),
        (m.has_wiki, "Wiki"),
        (m.has_pages, "Pages"),
        (m.has_projects, "Projects"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect();
    let features = if features.is_empty() {
        "None".to_string()
    } else {
        features.join(", ")
    };

    format!(
        r#"## Key Metrics

### Popularity

| Metric | Value |
|--------|-------|
| Stars | {} |
| Forks | {} |
| Watchers | {} |
| Contributors | {} |

### Issues and Pull Requests

| Metric | Open | Closed |
|--------|------|--------|
| Issues | {} | {} |
| Pull Requests | {} | {} |

### Recent Activity (30 days)

| Metric | Value |
|--------|-------|
| Commits | {} |
| Issues | {} |
| Pull Requests | {} |
| Last Push | {} days ago |
| Community Features | {} |
"#,
        thousands(m.stars),
        thousands(m.forks),
        thousands(m.watchers),
        thousands(m.contributors),
        thousands(m.open_issues),
        thousands(m.closed_issues),
        thousands(m.open_prs),
        thousands(m.closed_prs),
        m.recent_commits,
        m.recent_issues,
        m.recent_prs,
        m.days_since_last_push,
        features
    )
}

fn render_commit_activity(analysis: &RepoAnalysis) -> String {
    let mut md = String::from("## Commit Activity\n\n");

    let active: Vec<_> = analysis
        .commit_activity
        .iter()
        .filter(|d| d.commits > 0)
        .collect();
    if active.is_empty() {
        md.push_str("No commit data available for the last 30 days.\n");
        if analysis.metrics.recent_commits > 0 {
            md.push_str(&format!(
                "\n{} commits recorded in the window, without a daily breakdown.\n",
                thousands(analysis.metrics.recent_commits)
            ));
        }
        return md;
    }

    md.push_str("| Date | Commits |\n|------|---------|\n");
    for day in active {
        md.push_str(&format!("| {} | {} |\n", day.date.format("%Y-%m-%d"), day.commits));
    }
    md.push_str(&format!(
        "| **Total** | **{}** |\n",
        thousands(analysis.metrics.recent_commits)
    ));
    md
}

fn render_repository(analysis: &RepoAnalysis) -> String {
    let repo = &analysis.repository;
    let mut md = String::from("## Repository\n\n");
    if repo.full_name.is_empty() {
        md.push_str("Scored from a metrics file; no repository details available.\n");
        return md;
    }

    if let Some(desc) = &repo.description {
        md.push_str(&format!("> {}\n\n", desc.replace('\n', " ")));
    }

    md.push_str("| Field | Value |\n|-------|-------|\n");
    let mut row = |field: &str, value: &str| {
        md.push_str(&format!("| {} | {} |\n", field, table_cell(value)));
    };
    row("Language", repo.language.as_deref().unwrap_or("Unknown"));
    row("License", repo.license.as_deref().unwrap_or("None"));
    row("Default Branch", &repo.default_branch);
    if !repo.topics.is_empty() {
        row("Topics", &repo.topics.join(", "));
    }
    if let Some(created) = repo.created_at {
        row("Created", &created.format("%Y-%m-%d").to_string());
    }
    if repo.archived {
        row("Status", "Archived");
    }

    md.push('\n');
    if !repo.html_url.is_empty() {
        md.push_str(&format!("- [View on GitHub]({})\n", repo.html_url));
    }
    if let Some(home) = &repo.homepage {
        md.push_str(&format!("- [Homepage]({})\n", home));
    }
    md
}

fn render_footer() -> String {
    r#"---

*Generated by repohealth - GitHub Repository Health Dashboard*
"#
    .to_string()
}

fn score_indicator(score: f64) -> &'static str {
    if score >= 80.0 {
        "✅ Good"
    } else if score >= 60.0 {
        "⚠️ Fair"
    } else {
        "❌ Poor"
    }
}

fn band_emoji(band: HealthBand) -> &'static str {
    match band {
        HealthBand::Excellent => "🏆",
        HealthBand::Good => "⭐",
        HealthBand::Fair => "⚠️",
        HealthBand::Poor => "❌",
        HealthBand::Critical => "💀",
    }
}

/// Pipes would split a table row
fn table_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
