//! Doctor command - check environment

use anyhow::Result;

use crate::config::UserConfig;
use crate::github::GithubClient;

pub fn run() -> Result<()> {
    println!("🩺 repohealth Doctor\n");
    let mut problems = 0;

    // Config file (optional)
    match UserConfig::user_config_path() {
        Some(path) => match UserConfig::load_from(&path) {
            Ok(Some(_)) => println!("✓ Config file: {}", path.display()),
            Ok(None) => {
                println!("○ Config file: none (optional)");
                println!("  Run `repohealth config init` to create {}", path.display());
            }
            Err(e) => {
                println!("✗ Config file: {:#}", e);
                problems += 1;
            }
        },
        None => println!("○ Config file: no config directory on this platform"),
    }

    let config = UserConfig::load()?;

    // Token (optional)
    if config.github_token().is_some() {
        println!("✓ GitHub token: configured");
    } else {
        println!("○ GitHub token: none (60 requests/hour)");
        println!("  Set GITHUB_TOKEN or add [github] token to the config file");
    }

    // API reachability
    let client = GithubClient::new(config.client_settings(None));
    match client.rate_limit() {
        Ok(limit) => {
            let reset = limit
                .reset_at
                .map(|t| format!(", resets {}", t.format("%H:%M UTC")))
                .unwrap_or_default();
            println!(
                "✓ GitHub API: {} reachable ({}/{} requests left{})",
                client.api_url(),
                limit.remaining,
                limit.limit,
                reset
            );
            if limit.remaining == 0 {
                println!("  Rate limit exhausted; analyses will fail until the reset");
                problems += 1;
            }
        }
        Err(e) => {
            println!("✗ GitHub API: {} ({})", client.api_url(), e);
            problems += 1;
        }
    }

    if problems == 0 {
        println!("\n✅ All checks passed!");
    } else {
        println!("\n⚠️  {} problem(s) found", problems);
    }
    Ok(())
}
