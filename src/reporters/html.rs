//! HTML reporter with embedded styles and charts
//!
//! Generates a standalone HTML dashboard that can be viewed in any browser.
//! Includes:
//! - Overall score gauge colored by health band
//! - Category radar and score bars
//! - Metrics grid and 30-day commit timeline
//! - Responsive design for mobile and desktop

use super::{charts, thousands};
use crate::models::RepoAnalysis;
use anyhow::Result;

/// Render analysis as standalone HTML
pub fn render(analysis: &RepoAnalysis) -> Result<String> {
    let mut html = String::new();

    // DOCTYPE and head
    html.push_str(&render_head(analysis));

    // Body
    html.push_str("<body>\n<div class=\"container\">\n");

    // Header
    html.push_str(&render_header(analysis));

    // Content
    html.push_str("<div class=\"content\">\n");

    // Score section
    html.push_str(&render_score_section(analysis));

    // Category scores
    html.push_str(&render_category_scores(analysis));

    // Key metrics
    html.push_str(&render_metrics(analysis));

    // Commit activity
    html.push_str(&render_commit_activity(analysis));

    // Repository details
    html.push_str(&render_repository(analysis));

    html.push_str("</div>\n"); // content

    // Footer
    html.push_str(&render_footer());

    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn display_name(analysis: &RepoAnalysis) -> &str {
    if analysis.repository.full_name.is_empty() {
        "Repository"
    } else {
        &analysis.repository.full_name
    }
}

fn render_head(analysis: &RepoAnalysis) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Repository Health {:.0}/100</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(display_name(analysis)),
        analysis.score.overall
    )
}

fn render_header(analysis: &RepoAnalysis) -> String {
    let description = analysis
        .repository
        .description
        .as_deref()
        .map(|d| format!("    <p class=\"description\">{}</p>\n", html_escape(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="header">
    <h1>{}</h1>
{}    <p class="timestamp">Analyzed {}</p>
</div>
"#,
        html_escape(display_name(analysis)),
        description,
        analysis.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn render_score_section(analysis: &RepoAnalysis) -> String {
    let archived = if analysis.repository.archived {
        "    <p class=\"archived\">This repository is archived.</p>\n"
    } else {
        ""
    };
    format!(
        r#"<div class="score-section">
    {}    <div class="band-badge" style="background: {}">{}</div>
    <p class="band-description">{}</p>
{}</div>
"#,
        charts::gauge(analysis.score.overall, analysis.band),
        charts::band_color(analysis.band),
        analysis.band,
        analysis.band.description(),
        archived
    )
}

fn render_category_scores(analysis: &RepoAnalysis) -> String {
    let mut cards = String::new();
    for (name, value) in analysis.score.categories() {
        cards.push_str(&format!(
            r#"        <div class="metric-card">
            <h3>{} (25%)</h3>
            <div class="metric-value">{:.1}</div>
            <div class="metric-bar">
                <div class="metric-bar-fill {}" style="width: {:.1}%"></div>
            </div>
        </div>
"#,
            name,
            value,
            bar_class(value),
            value.clamp(0.0, 100.0)
        ));
    }

    format!(
        r#"<div class="section">
    <h2 class="section-title">📊 Category Scores</h2>
    <div class="chart-row">
        {}        {}    </div>
    <div class="metrics-grid">
{}    </div>
</div>
"#,
        charts::radar(&analysis.score),
        charts::score_bars(&analysis.score),
        cards
    )
}

fn render_metrics(analysis: &RepoAnalysis) -> String {
    let m = &analysis.metrics;
    let stats = [
        ("⭐ Stars", thousands(m.stars)),
        ("🍴 Forks", thousands(m.forks)),
        ("👀 Watchers", thousands(m.watchers)),
        ("👥 Contributors", thousands(m.contributors)),
        ("🐛 Open Issues", thousands(m.open_issues)),
        ("✔️ Closed Issues", thousands(m.closed_issues)),
        ("🔀 Open PRs", thousands(m.open_prs)),
        ("✅ Closed PRs", thousands(m.closed_prs)),
        ("📝 Commits (30d)", thousands(m.recent_commits)),
        ("🕒 Days Since Push", thousands(m.days_since_last_push)),
    ];

    let mut items = String::new();
    for (label, value) in stats {
        items.push_str(&format!(
            r#"        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">{}</div>
        </div>
"#,
            value, label
        ));
    }

    format!(
        r#"<div class="section">
    <h2 class="section-title">📈 Key Metrics</h2>
    <div class="stats-grid">
{}    </div>
</div>
"#,
        items
    )
}

fn render_commit_activity(analysis: &RepoAnalysis) -> String {
    format!(
        r#"<div class="section">
    <h2 class="section-title">📅 Commit Activity (30 days, {} commits)</h2>
    {}</div>
"#,
        thousands(analysis.metrics.recent_commits),
        charts::commit_timeline(&analysis.commit_activity)
    )
}

fn render_repository(analysis: &RepoAnalysis) -> String {
    let repo = &analysis.repository;
    if repo.full_name.is_empty() {
        return String::new();
    }

    let mut rows = Vec::new();
    let mut row = |label: &str, value: &str| {
        rows.push(format!(
            "        <tr><th>{}</th><td>{}</td></tr>",
            label,
            html_escape(value)
        ));
    };
    row("Language", repo.language.as_deref().unwrap_or("Unknown"));
    row("License", repo.license.as_deref().unwrap_or("None"));
    row("Default branch", &repo.default_branch);
    row("Size", &format!("{} KB", thousands(repo.size_kb)));
    if let Some(created) = repo.created_at {
        row("Created", &created.format("%Y-%m-%d").to_string());
    }
    if let Some(updated) = repo.updated_at {
        row("Updated", &updated.format("%Y-%m-%d").to_string());
    }
    if repo.fork {
        row("Fork", "yes");
    }

    let topics = if repo.topics.is_empty() {
        String::new()
    } else {
        let tags: Vec<String> = repo
            .topics
            .iter()
            .map(|t| format!("<span class=\"topic\">{}</span>", html_escape(t)))
            .collect();
        format!("    <div class=\"topics\">{}</div>\n", tags.join(" "))
    };

    let mut links = Vec::new();
    if !repo.html_url.is_empty() {
        links.push(format!(
            "<a href=\"{}\">View on GitHub</a>",
            html_escape(&repo.html_url)
        ));
    }
    if let Some(home) = &repo.homepage {
        links.push(format!("<a href=\"{}\">Homepage</a>", html_escape(home)));
    }
    if !repo.clone_url.is_empty() {
        links.push(format!("<code>{}</code>", html_escape(&repo.clone_url)));
    }

    format!(
        r#"<div class="section">
    <h2 class="section-title">📦 Repository</h2>
    <table class="info-table">
{}
    </table>
{}    <div class="links">{}</div>
</div>
"#,
        rows.join("\n"),
        topics,
        links.join(" · ")
    )
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by repohealth - GitHub Repository Health Dashboard</p>
</div>
"#
    .to_string()
}

fn bar_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "bar-good"
    } else if score >= 60.0 {
        "bar-moderate"
    } else {
        "bar-poor"
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #6366f1;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --muted-color: #64748b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #6366f1 0%, #8b5cf6 100%);
    color: white;
    padding: 3rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; word-break: break-word; }
.header .description { font-size: 1.1rem; margin-bottom: 0.5rem; }
.header .timestamp { opacity: 0.9; font-size: 0.95rem; }

.content { padding: 2rem; }

.score-section {
    text-align: center;
    padding: 2rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.gauge { width: 280px; max-width: 100%; }

.band-badge {
    display: inline-block;
    padding: 0.25rem 1.25rem;
    border-radius: 999px;
    color: white;
    font-weight: 600;
    margin: 0.5rem 0;
}

.band-description { color: var(--muted-color); font-style: italic; }
.archived { color: #b45309; font-weight: 600; margin-top: 0.5rem; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.chart-row {
    display: flex;
    flex-wrap: wrap;
    gap: 2rem;
    align-items: center;
    justify-content: center;
    margin-bottom: 1.5rem;
}

.radar { width: 300px; max-width: 100%; }
.bars { width: 420px; max-width: 100%; }
.timeline { width: 100%; }

.chart-placeholder {
    padding: 3rem;
    text-align: center;
    color: var(--muted-color);
    background: #f8fafc;
    border: 1px dashed var(--border-color);
    border-radius: 8px;
}

.metrics-grid, .stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 1rem;
}

.stats-grid { grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); }

.metric-card, .stat-item {
    background: var(--card-background);
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.5rem;
}

.metric-card h3 {
    font-size: 0.875rem;
    color: var(--muted-color);
    margin-bottom: 0.5rem;
    text-transform: uppercase;
}

.metric-value, .stat-value {
    font-size: 2rem;
    font-weight: bold;
    margin-bottom: 0.5rem;
}

.stat-item { text-align: center; }
.stat-label { font-size: 0.875rem; color: var(--muted-color); }

.metric-bar {
    height: 8px;
    background: #e2e8f0;
    border-radius: 4px;
    overflow: hidden;
}

.metric-bar-fill { height: 100%; border-radius: 4px; }
.bar-good { background: #10b981; }
.bar-moderate { background: #f59e0b; }
.bar-poor { background: #ef4444; }

.info-table { border-collapse: collapse; margin-bottom: 1rem; }
.info-table th, .info-table td {
    text-align: left;
    padding: 0.4rem 1.5rem 0.4rem 0;
    border-bottom: 1px solid var(--border-color);
}
.info-table th { color: var(--muted-color); font-weight: 500; }

.topics { margin-bottom: 1rem; }
.topic {
    display: inline-block;
    background: #e0e7ff;
    color: #4f46e5;
    padding: 0.15rem 0.6rem;
    border-radius: 999px;
    font-size: 0.8rem;
    margin: 0 0.25rem 0.25rem 0;
}

.links a { color: var(--primary-color); text-decoration: none; }
.links a:hover { text-decoration: underline; }
.links code { font-size: 0.85rem; color: var(--muted-color); }

.footer {
    text-align: center;
    padding: 2rem;
    color: var(--muted-color);
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 2rem 1rem; }
    .header h1 { font-size: 1.75rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .section { page-break-inside: avoid; }
}
"#;
