//! Score command - offline scoring of a saved metrics record

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use super::analyze::print_explanation;
use super::{emit, resolve_format};
use crate::config::UserConfig;
use crate::models::{RepositoryInfo, RepositoryMetrics};
use crate::pipeline;
use crate::reporters;
use crate::scoring;

pub(super) fn run(
    path: &Path,
    format: Option<&str>,
    output_path: Option<&Path>,
    explain_score: bool,
) -> Result<()> {
    let config = UserConfig::load()?;
    let format = resolve_format(format, &config)?;

    let metrics = read_metrics(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "metrics".to_string());
    tracing::debug!("Scoring {} from {}", name, path.display());

    let analysis = pipeline::assemble(RepositoryInfo::default(), metrics, Utc::now());

    if explain_score {
        let breakdown = scoring::explain_health_score(&analysis.metrics);
        print_explanation(&scoring::explain(&breakdown), format, output_path);
    }

    let rendered = reporters::report_with_format(&analysis, format)?;
    emit(&rendered, format, output_path, &format!("{}-health", name))
}

fn read_metrics(path: &Path) -> Result<RepositoryMetrics> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid metrics JSON in {}", path.display()))
}
