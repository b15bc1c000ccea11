//! CLI command definitions and handlers

mod analyze;
mod doctor;
mod score;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};

use crate::config::UserConfig;
use crate::reporters::{self, OutputFormat};

/// repohealth - GitHub repository health dashboard
#[derive(Parser, Debug)]
#[command(name = "repohealth")]
#[command(
    version,
    about = "Score the health of a GitHub repository: activity, popularity, community and maintenance",
    long_about = "repohealth fetches public metadata for a GitHub repository, computes a \
0-100 health score from four equally weighted categories and renders it as \
terminal text, JSON, Markdown or a standalone HTML dashboard.\n\n\
Set GITHUB_TOKEN (or pass --token) to raise the API rate limit from 60 to 5000 requests per hour.",
    after_help = "\
Examples:
  repohealth analyze rust-lang/cargo                      Terminal summary
  repohealth analyze https://github.com/tokio-rs/tokio -f html   HTML dashboard
  repohealth analyze owner/repo -f json > health.json     JSON for scripting
  repohealth score metrics.json --explain-score           Score a saved metrics file
  repohealth doctor                                       Check token and API access"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes priority.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a repository from GitHub and score its health
    #[command(after_help = "\
Examples:
  repohealth analyze owner/repo                        Text summary
  repohealth analyze owner/repo --format html          Writes owner-repo-health.html
  repohealth analyze owner/repo -f md -o HEALTH.md     Markdown to a chosen file
  repohealth analyze owner/repo --explain-score        Show full scoring breakdown")]
    Analyze {
        /// Repository URL (https://github.com/owner/repo, git@github.com:owner/repo.git or owner/repo)
        url: String,

        /// GitHub personal access token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Output format: text, json, html, markdown (or md). Defaults to the config file, then text.
        #[arg(long, short = 'f', value_parser = ["text", "json", "html", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout, or auto-named for html/markdown)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Explain the scoring formula with full breakdown
        #[arg(long)]
        explain_score: bool,

        /// Disable the progress spinner
        #[arg(long)]
        no_progress: bool,
    },

    /// Score a saved metrics JSON file without touching the network
    #[command(after_help = "\
Every field is optional; missing counts are zero and a missing push age counts as unknown.
Example metrics.json:
  {\"stars\": 1200, \"contributors\": 14, \"days_since_last_push\": 3}")]
    Score {
        /// Path to a JSON metrics record
        path: PathBuf,

        /// Output format: text, json, html, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "html", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout, or auto-named for html/markdown)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Explain the scoring formula with full breakdown
        #[arg(long)]
        explain_score: bool,
    },

    /// Check environment setup (token, config file, API reachability)
    Doctor,

    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            url,
            token,
            format,
            output,
            explain_score,
            no_progress,
        } => analyze::run(
            &url,
            token,
            format.as_deref(),
            output.as_deref(),
            explain_score,
            no_progress,
        ),

        Commands::Score {
            path,
            format,
            output,
            explain_score,
        } => score::run(&path, format.as_deref(), output.as_deref(), explain_score),

        Commands::Doctor => doctor::run(),

        Commands::Config { action } => run_config_action(action),

        Commands::Version => {
            println!("repohealth {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// `--format` wins over the config default
fn resolve_format(cli_format: Option<&str>, config: &UserConfig) -> Result<OutputFormat> {
    cli_format.unwrap_or(config.default_format()).parse()
}

/// Print or write rendered output.
///
/// HTML and Markdown go to `{default_stem}.{ext}` when no path is given.
fn emit(
    rendered: &str,
    format: OutputFormat,
    output_path: Option<&Path>,
    default_stem: &str,
) -> Result<()> {
    let out_path = match output_path {
        Some(p) => Some(p.to_path_buf()),
        None if reporters::writes_file_by_default(format) => Some(PathBuf::from(format!(
            "{}.{}",
            default_stem,
            reporters::file_extension(format)
        ))),
        None => None,
    };

    match out_path {
        Some(path) => {
            std::fs::write(&path, rendered)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            // stderr keeps stdout clean for piping
            eprintln!(
                "{}Report written to: {}",
                style("📄 ").bold(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("✅ Config initialized at: {}", path.display());
            println!("\nEdit to add your GitHub token:");
            println!("  {}", path.display());
            println!("\nOr set via environment:");
            println!("  export GITHUB_TOKEN=\"ghp_...\"");
            Ok(())
        }
        ConfigAction::Show => show_config(),
    }
}

fn show_config() -> Result<()> {
    let config = UserConfig::load()?;
    println!("📁 Config path:");
    match UserConfig::user_config_path() {
        Some(user_path) => {
            let status = if user_path.exists() { "✓" } else { "(not found)" };
            println!("  User: {} {}", user_path.display(), status);
        }
        None => println!("  User: (no config directory on this platform)"),
    }
    println!();
    println!("🔧 Effective settings:");
    println!("{}", config.to_display_toml()?);
    let token_status = if config.github_token().is_some() {
        "✓ configured"
    } else {
        "✗ not set (60 requests/hour)"
    };
    println!("GitHub token: {}", token_status);
    Ok(())
}
