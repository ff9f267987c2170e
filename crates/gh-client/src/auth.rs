//! Token lookup and client construction
//!
//! Only github.com is supported. A token is taken from `GH_TOKEN`, then
//! `GITHUB_TOKEN`, and finally from the login stored by the `gh` CLI.

use crate::OctocrabClient;
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;
use std::fmt;
use std::sync::Arc;

/// Env vars checked for a token, in order
const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Env(&'static str),
    GhCli,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Env(var) => write!(f, "${}", var),
            TokenSource::GhCli => write!(f, "gh auth token"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenResolver {
    gh_program: String,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    pub fn new() -> Self {
        Self {
            gh_program: "gh".to_string(),
        }
    }

    /// Ask a different `gh` executable for the stored login
    pub fn with_gh_program(mut self, program: impl Into<String>) -> Self {
        self.gh_program = program.into();
        self
    }

    /// First non-blank token from the env vars, then the `gh` CLI
    pub async fn resolve(&self) -> Result<(String, TokenSource)> {
        if let Some((var, token)) = token_from_env() {
            return Ok((token, TokenSource::Env(var)));
        }

        if let Some(token) = self.token_from_gh().await {
            return Ok((token, TokenSource::GhCli));
        }

        anyhow::bail!("No GitHub token found. Set GH_TOKEN or GITHUB_TOKEN, or run 'gh auth login'")
    }

    async fn token_from_gh(&self) -> Option<String> {
        let output = match tokio::process::Command::new(&self.gh_program)
            .args(["auth", "token"])
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                debug!("Could not run {}: {}", self.gh_program, e);
                return None;
            }
        };

        if !output.status.success() {
            debug!("{} auth token exited with {}", self.gh_program, output.status);
            return None;
        }

        let token = String::from_utf8(output.stdout).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

fn token_from_env() -> Option<(&'static str, String)> {
    TOKEN_VARS.iter().find_map(|var| {
        let token = std::env::var(var).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| (*var, token.to_string()))
    })
}

/// Build an authenticated client for github.com
pub async fn connect() -> Result<OctocrabClient> {
    let (token, source) = TokenResolver::new().resolve().await?;
    info!("Using GitHub token from {}", source);

    let octocrab = Octocrab::builder()
        .personal_token(token)
        .build()
        .context("Failed to build Octocrab client")?;
    Ok(OctocrabClient::new(Arc::new(octocrab)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_GH: &str = "/nonexistent/gh-dep-test/gh";

    fn resolve(resolver: TokenResolver) -> Result<(String, TokenSource)> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(resolver.resolve())
    }

    #[test]
    fn test_gh_token_before_github_token() {
        temp_env::with_vars(
            [("GH_TOKEN", Some("from-gh")), ("GITHUB_TOKEN", Some("from-github"))],
            || {
                let (token, source) =
                    resolve(TokenResolver::new().with_gh_program(MISSING_GH)).unwrap();
                assert_eq!(token, "from-gh");
                assert_eq!(source, TokenSource::Env("GH_TOKEN"));
            },
        );
    }

    #[test]
    fn test_blank_env_var_is_skipped() {
        temp_env::with_vars(
            [("GH_TOKEN", Some("  ")), ("GITHUB_TOKEN", Some(" tok\n"))],
            || {
                let (token, source) =
                    resolve(TokenResolver::new().with_gh_program(MISSING_GH)).unwrap();
                assert_eq!(token, "tok");
                assert_eq!(source, TokenSource::Env("GITHUB_TOKEN"));
            },
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_env_wins_over_gh_cli() {
        temp_env::with_vars([("GH_TOKEN", Some("env")), ("GITHUB_TOKEN", None)], || {
            let (_, source) = resolve(TokenResolver::new().with_gh_program("echo")).unwrap();
            assert_eq!(source, TokenSource::Env("GH_TOKEN"));
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_gh_cli_when_env_is_empty() {
        temp_env::with_vars_unset(TOKEN_VARS, || {
            // `echo auth token` stands in for a gh that prints its token
            let (token, source) = resolve(TokenResolver::new().with_gh_program("echo")).unwrap();
            assert_eq!(token, "auth token");
            assert_eq!(source, TokenSource::GhCli);
        });
    }

    #[test]
    fn test_no_token_anywhere() {
        temp_env::with_vars_unset(TOKEN_VARS, || {
            let err = resolve(TokenResolver::new().with_gh_program(MISSING_GH)).unwrap_err();
            assert!(err.to_string().contains("gh auth login"));
        });
    }

    #[test]
    fn test_source_display() {
        assert_eq!(TokenSource::Env("GH_TOKEN").to_string(), "$GH_TOKEN");
        assert_eq!(TokenSource::GhCli.to_string(), "gh auth token");
    }
}
