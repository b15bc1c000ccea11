//! Repository URL parsing

use super::{GithubError, GithubResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner-name`, safe to use in a file name
    pub fn slug(&self) -> String {
        format!("{}-{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn url_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // https://github.com/o/r, github.com/o/r, git@github.com:o/r
            Regex::new(
                r"^(?:(?:https?://)?(?:www\.)?github\.com/|git@github\.com:)([A-Za-z0-9-]+)/([A-Za-z0-9_.-]+)(?:[/?#].*)?$",
            )
            .expect("valid regex"),
            // bare o/r
            Regex::new(r"^([A-Za-z0-9-]+)/([A-Za-z0-9_.-]+)$").expect("valid regex"),
        ]
    })
}

/// Parse a GitHub repository URL into owner and name.
///
/// Accepts `https://github.com/owner/repo` (with or without scheme),
/// `git@github.com:owner/repo` and bare `owner/repo`. A trailing slash,
/// a `.git` suffix and extra path segments such as `/tree/main` are ignored.
pub fn parse_repo_url(url: &str) -> GithubResult<RepoRef> {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    for pattern in url_patterns() {
        let Some(caps) = pattern.captures(trimmed) else {
            continue;
        };
        let owner = &caps[1];
        let name = caps[2].strip_suffix(".git").unwrap_or(&caps[2]);
        if name.is_empty() || name.chars().all(|c| c == '.') {
            break;
        }
        return Ok(RepoRef::new(owner, name));
    }

    Err(GithubError::InvalidUrl(url.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(url: &str) -> (String, String) {
        let r = parse_repo_url(url).unwrap_or_else(|e| panic!("{url}: {e}"));
        (r.owner, r.name)
    }

    #[test]
    fn test_https_url() {
        assert_eq!(
            parsed("https://github.com/rust-lang/cargo"),
            ("rust-lang".into(), "cargo".into())
        );
        assert_eq!(
            parsed("http://www.github.com/rust-lang/cargo/"),
            ("rust-lang".into(), "cargo".into())
        );
    }

    #[test]
    fn test_git_suffix_and_ssh() {
        assert_eq!(
            parsed("https://github.com/serde-rs/serde.git"),
            ("serde-rs".into(), "serde".into())
        );
        assert_eq!(
            parsed("git@github.com:tokio-rs/tokio.git"),
            ("tokio-rs".into(), "tokio".into())
        );
    }

    #[test]
    fn test_name_ending_in_git_letters_is_kept() {
        // Only the literal ".git" suffix is stripped
        assert_eq!(
            parsed("https://github.com/libgit2/libgit"),
            ("libgit2".into(), "libgit".into())
        );
    }

    #[test]
    fn test_extra_path_segments_ignored() {
        assert_eq!(
            parsed("https://github.com/streamlit/streamlit/tree/develop/lib"),
            ("streamlit".into(), "streamlit".into())
        );
        assert_eq!(
            parsed("github.com/facebook/react?tab=readme"),
            ("facebook".into(), "react".into())
        );
    }

    #[test]
    fn test_bare_owner_repo() {
        assert_eq!(
            parsed("  microsoft/vscode  "),
            ("microsoft".into(), "vscode".into())
        );
        assert_eq!(parsed("a/b.rs"), ("a".into(), "b.rs".into()));
    }

    #[test]
    fn test_rejects_invalid() {
        for url in [
            "",
            "https://github.com/",
            "https://github.com/only-owner",
            "https://gitlab.com/owner/repo",
            "gitlab.com/owner/repo",
            "not a url",
            "owner/..",
        ] {
            assert!(
                matches!(parse_repo_url(url), Err(GithubError::InvalidUrl(_))),
                "accepted {url:?}"
            );
        }
    }

    #[test]
    fn test_display_and_slug() {
        let r = RepoRef::new("rust-lang", "rust");
        assert_eq!(r.to_string(), "rust-lang/rust");
        assert_eq!(r.slug(), "rust-lang-rust");
    }
}
