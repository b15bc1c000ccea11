//! Analyze command implementation
//!
//! This command performs a full repository analysis:
//! 1. Parse the repository URL (fails before any network call)
//! 2. Resolve settings from flags, environment and the user config
//! 3. Fetch repository data from the GitHub API
//! 4. Compute the health score and band
//! 5. Output results (text, json, html, markdown)

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use super::{emit, resolve_format};
use crate::config::UserConfig;
use crate::github::{parse_repo_url, GithubClient};
use crate::pipeline::Pipeline;
use crate::reporters::{self, OutputFormat};
use crate::scoring;

pub(super) fn run(
    url: &str,
    token: Option<String>,
    format: Option<&str>,
    output_path: Option<&Path>,
    explain_score: bool,
    no_progress: bool,
) -> Result<()> {
    let repo = parse_repo_url(url)?;
    let config = UserConfig::load()?;
    let format = resolve_format(format, &config)?;
    let settings = config.client_settings(token);

    if settings.token.is_none() {
        eprintln!(
            "{}No GitHub token configured; unauthenticated requests are limited to 60/hour.",
            style("⚠️  ").yellow()
        );
    }
    tracing::info!("Analyzing {} via {}", repo, settings.api_url);

    let client = GithubClient::new(settings);
    let spinner = (!no_progress && console::Term::stderr().is_term()).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(create_spinner_style());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = Pipeline::new(&client).run(&repo, Utc::now(), |msg| {
        if let Some(pb) = &spinner {
            pb.set_message(msg.to_string());
        }
    });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let analysis = result.with_context(|| format!("Failed to analyze {}", repo))?;

    if explain_score {
        let breakdown = scoring::explain_health_score(&analysis.metrics);
        print_explanation(&scoring::explain(&breakdown), format, output_path);
    }

    let rendered = reporters::report_with_format(&analysis, format)?;
    emit(&rendered, format, output_path, &format!("{}-health", repo.slug()))
}

/// Explanation goes to stderr when stdout carries JSON
pub(super) fn print_explanation(text: &str, format: OutputFormat, output_path: Option<&Path>) {
    if format == OutputFormat::Json && output_path.is_none() {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}

fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}
