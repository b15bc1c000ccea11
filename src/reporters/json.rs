//! JSON reporter
//!
//! Outputs the full RepoAnalysis as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::RepoAnalysis;
use anyhow::Result;

/// Render analysis as JSON
pub fn render(analysis: &RepoAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}
