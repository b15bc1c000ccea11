//! Output reporters for repository health analyses
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `html` - Standalone HTML dashboard with inline SVG charts
//! - `markdown` - GitHub-flavored Markdown

mod charts;
mod html;
mod json;
mod markdown;
mod text;

use crate::models::RepoAnalysis;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, html, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render an analysis using an OutputFormat enum
pub fn report_with_format(analysis: &RepoAnalysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(analysis),
        OutputFormat::Json => json::render(analysis),
        OutputFormat::Html => html::render(analysis),
        OutputFormat::Markdown => markdown::render(analysis),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
        OutputFormat::Markdown => "md",
    }
}

/// Formats that are written to a file when no output path is given
pub fn writes_file_by_default(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Html | OutputFormat::Markdown)
}

/// `12345` -> `12,345`
pub(crate) fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::RepositoryInfo;
    use crate::models::RepositoryMetrics;
    use chrono::{TimeZone, Utc};

    /// Create a representative analysis for testing
    pub(crate) fn test_analysis() -> RepoAnalysis {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let metrics = RepositoryMetrics {
            stars: 15_230,
            forks: 1_204,
            watchers: 310,
            open_issues: 120,
            closed_issues: 2_400,
            open_prs: 18,
            closed_prs: 3_100,
            contributors: 240,
            days_since_last_push: 1,
            days_since_creation: 2_000,
            recent_commits: 3,
            recent_issues: 12,
            recent_prs: 9,
            has_discussions: true,
            commit_timestamps: vec![
                Utc.with_ymd_and_hms(2024, 6, 20, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 29, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 6, 29, 17, 0, 0).unwrap(),
            ],
            ..Default::default()
        };
        let repository = RepositoryInfo {
            full_name: "octo/<hello>".into(),
            description: Some("A \"friendly\" <b>test</b> repo".into()),
            language: Some("Rust".into()),
            topics: vec!["cli".into(), "health".into()],
            license: Some("MIT License".into()),
            default_branch: "main".into(),
            size_kb: 2048,
            created_at: Some(Utc.with_ymd_and_hms(2019, 1, 8, 0, 0, 0).unwrap()),
            updated_at: Some(now),
            html_url: "https://github.com/octo/hello".into(),
            clone_url: "https://github.com/octo/hello.git".into(),
            homepage: Some("https://octo.example".into()),
            has_issues: true,
            ..Default::default()
        };
        crate::pipeline::assemble(repository, metrics, now)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("html").unwrap(), OutputFormat::Html);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_file_defaults() {
        assert_eq!(file_extension(OutputFormat::Html), "html");
        assert_eq!(file_extension(OutputFormat::Markdown), "md");
        assert!(writes_file_by_default(OutputFormat::Html));
        assert!(!writes_file_by_default(OutputFormat::Json));
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_every_format_renders() {
        let analysis = test_analysis();
        for format in ["text", "json", "html", "markdown"] {
            let fmt = OutputFormat::from_str(format).unwrap();
            let out = report_with_format(&analysis, fmt).expect("render");
            assert!(!out.is_empty(), "{format} output empty");
        }
    }

    #[test]
    fn test_commit_total_without_timestamps() {
        // A saved metrics record carries the count but no timestamps
        let metrics = RepositoryMetrics {
            recent_commits: 180,
            days_since_last_push: 2,
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let analysis =
            crate::pipeline::assemble(RepositoryInfo::default(), metrics, now);
        assert!(analysis.commit_activity.iter().all(|d| d.commits == 0));

        let md = report_with_format(&analysis, OutputFormat::Markdown).unwrap();
        assert!(md.contains("| **Commits (30 days)** | 180 |"));
        assert!(md.contains("No commit data available"));
        assert!(md.contains("180 commits recorded"));

        let html = report_with_format(&analysis, OutputFormat::Html).unwrap();
        assert!(html.contains("Commit Activity (30 days, 180 commits)"));

        let text = report_with_format(&analysis, OutputFormat::Text).unwrap();
        assert!(text.contains("COMMITS (30 days)"));
        assert!(text.contains("180 total"));
    }

    #[test]
    fn test_commit_total_follows_metrics() {
        // Only 3 of the reported commits have timestamps
        let mut analysis = test_analysis();
        analysis.metrics.recent_commits = 1_250;
        let md = report_with_format(&analysis, OutputFormat::Markdown).unwrap();
        assert!(md.contains("| **Commits (30 days)** | 1,250 |"));
        assert!(md.contains("| **Total** | **1,250** |"));
        let html = report_with_format(&analysis, OutputFormat::Html).unwrap();
        assert!(html.contains("1,250 commits"));
    }
}
