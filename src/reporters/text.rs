//! Text (terminal) reporter with colors and formatting

use super::thousands;
use crate::models::{CommitDay, HealthBand, RepoAnalysis};
use anyhow::Result;

/// Band colors (ANSI escape codes)
fn band_color(band: HealthBand) -> &'static str {
    match band {
        HealthBand::Excellent => "\x1b[32m", // Green
        HealthBand::Good => "\x1b[92m",      // Light green
        HealthBand::Fair => "\x1b[33m",      // Yellow
        HealthBand::Poor => "\x1b[91m",      // Light red
        HealthBand::Critical => "\x1b[31m",  // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BAR_WIDTH: usize = 20;
const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render analysis as formatted terminal output
pub fn render(analysis: &RepoAnalysis) -> Result<String> {
    let mut out = String::new();
    let repo = &analysis.repository;
    let score = &analysis.score;
    let m = &analysis.metrics;

    // Header
    let title = if repo.full_name.is_empty() {
        "Repository Health".to_string()
    } else {
        repo.full_name.clone()
    };
    out.push_str(&format!("\n{BOLD}{}{RESET}\n", title));
    if let Some(desc) = &repo.description {
        out.push_str(&format!("{DIM}{}{RESET}\n", desc));
    }
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    let band_c = band_color(analysis.band);
    out.push_str(&format!(
        "Health: {BOLD}{:.1}/100{RESET}  Band: {band_c}{BOLD}{}{RESET}  {DIM}{}{RESET}\n\n",
        score.overall,
        analysis.band,
        analysis.band.description()
    ));

    // Category scores
    out.push_str(&format!("{BOLD}SCORES{RESET}\n"));
    for (name, value) in score.categories() {
        out.push_str(&format!(
            "  {:<12} {} {}\n",
            name,
            score_bar(value),
            format_score(value)
        ));
    }
    out.push('\n');

    // Key metrics
    out.push_str(&format!("{BOLD}METRICS{RESET}\n"));
    out.push_str(&format!(
        "  Stars: {}  Forks: {}  Watchers: {}  Contributors: {}\n",
        thousands(m.stars),
        thousands(m.forks),
        thousands(m.watchers),
        thousands(m.contributors)
    ));
    out.push_str(&format!(
        "  Issues: {} open / {} closed  PRs: {} open / {} closed\n",
        thousands(m.open_issues),
        thousands(m.closed_issues),
        thousands(m.open_prs),
        thousands(m.closed_prs)
    ));
    out.push_str(&format!(
        "  Last push: {} days ago  Recent (30d): {} commits, {} issues, {} PRs\n\n",
        m.days_since_last_push, m.recent_commits, m.recent_issues, m.recent_prs
    ));

    // Commit activity
    if m.recent_commits > 0 {
        out.push_str(&format!("{BOLD}COMMITS (30 days){RESET}\n"));
        let line = if analysis.commit_activity.iter().any(|d| d.commits > 0) {
            format!("{}  ", sparkline(&analysis.commit_activity))
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {}{DIM}{} total{RESET}\n\n",
            line,
            thousands(m.recent_commits)
        ));
    }

    if repo.archived {
        out.push_str("\x1b[33mThis repository is archived.\x1b[0m\n");
    }
    if !repo.html_url.is_empty() {
        out.push_str(&format!("{DIM}{}{RESET}\n", repo.html_url));
    }

    Ok(out)
}

fn score_bar(score: f64) -> String {
    let filled = ((score / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled),
        format!("{DIM}{}{RESET}", "░".repeat(BAR_WIDTH - filled))
    )
}

/// One block character per day, scaled to the busiest day
fn sparkline(days: &[CommitDay]) -> String {
    let max = days.iter().map(|d| d.commits).max().unwrap_or(0);
    days.iter()
        .map(|d| {
            if max == 0 || d.commits == 0 {
                return SPARK_CHARS[0];
            }
            let level = (d.commits as usize * (SPARK_CHARS.len() - 1)) / max as usize;
            SPARK_CHARS[level.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

fn format_score(score: f64) -> String {
    let color = if score >= 80.0 {
        "\x1b[32m"
    } else if score >= 60.0 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{:.1}{RESET}", score)
}
