//! Command line interface
//!
//! Running without a subcommand starts the interactive reviewer.

use crate::discovery::{bot_author, Scope};
use crate::domain_models::{ExecutionMode, ExecutionOptions, MergeStrategy};
use crate::error::{Error, Result};
use clap::{ArgAction, Parser, Subcommand};
use gh_client::MergeMethod;
use gh_dep_config::AppConfig;
use std::time::Duration;

const DEFAULT_AUTHOR: &str = "dependabot[bot]";

#[derive(Debug, Parser)]
#[command(name = "gh-dep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Review and merge dependency update pull requests in bulk", long_about = None)]
pub struct Cli {
    /// Maximum number of PRs to fetch
    #[arg(long, global = true, default_value_t = 200)]
    pub limit: usize,

    /// Only PRs carrying this label
    #[arg(long, global = true)]
    pub label: Option<String>,

    /// PR author login ("any" disables the filter)
    #[arg(long, global = true, default_value = DEFAULT_AUTHOR)]
    pub author: String,

    /// Shorthand for the author: dependabot or renovate
    #[arg(long, global = true)]
    pub bot: Option<String>,

    /// Repository to search, repeatable or comma separated (owner/name)
    #[arg(short = 'R', long = "repo", global = true)]
    pub repos: Vec<String>,

    /// Search all repositories of a user or organization
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Merge method: squash, merge or rebase
    #[arg(long, global = true)]
    pub merge_method: Option<MergeMethod>,

    /// Merge strategy: dependabot (bot comment) or api
    #[arg(long, global = true)]
    pub merge_mode: Option<MergeStrategy>,

    /// Only merge PRs whose CI verdict is success
    #[arg(long)]
    pub require_checks: bool,

    /// Initial action: approve, merge or approve-and-merge
    #[arg(long, default_value = "approve")]
    pub mode: ExecutionMode,

    /// Only PRs awaiting your review
    #[arg(long, global = true)]
    pub review_requested: bool,

    /// Include PRs of archived repositories
    #[arg(long, global = true)]
    pub archived: bool,

    /// Number of concurrent requests
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List open dependency PRs with their CI state
    List {
        /// Group by package and target version, and cache the groups
        #[arg(long)]
        group: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the groups cached by `list --group`
    Groups {
        #[arg(long)]
        json: bool,
    },

    /// Approve every PR of a cached group
    Approve {
        /// Group key, e.g. serde@1.0.200
        #[arg(long)]
        group: String,

        /// Print what would be done without doing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge every PR of a cached group
    Merge {
        #[arg(long)]
        group: String,

        #[arg(long)]
        dry_run: bool,

        /// Merge method, overrides --merge-method
        #[arg(long)]
        method: Option<MergeMethod>,

        /// Skip PRs whose CI verdict is not success
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        require_checks: bool,
    },
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    /// Search scope from flags, falling back to configured repositories
    pub fn scope(&self, config: &AppConfig) -> Result<Scope> {
        let author = match &self.bot {
            Some(bot) => Some(
                bot_author(bot)
                    .ok_or_else(|| Error::Config(format!("unknown bot '{}'", bot)))?,
            ),
            None if self.author.eq_ignore_ascii_case("any") => None,
            None => Some(self.author.clone()),
        };

        Ok(Scope {
            owner: self.owner.clone(),
            repos: self.repos.clone(),
            label: self.label.clone(),
            author,
            review_requested: self.review_requested,
            include_archived: self.archived,
            limit: self.limit,
        }
        .resolve(&config.repos))
    }

    /// Execution options: flags win over the config file
    pub fn options(&self, config: &AppConfig) -> Result<ExecutionOptions> {
        let merge_method = match self.merge_method {
            Some(method) => method,
            None => config.merge_method.parse().map_err(Error::Config)?,
        };
        let merge_strategy = match self.merge_mode {
            Some(strategy) => strategy,
            None => config.merge_strategy.parse().map_err(Error::Config)?,
        };

        let mut options = ExecutionOptions {
            merge_method,
            merge_strategy,
            require_checks: self.require_checks,
            bot: config.bot.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        };

        if let Some(Commands::Merge {
            method,
            require_checks,
            ..
        }) = &self.command
        {
            if let Some(method) = method {
                options.merge_method = *method;
            }
            options.require_checks = *require_checks;
        }

        Ok(options)
    }

    pub fn workers(&self, config: &AppConfig) -> usize {
        self.workers.unwrap_or(config.workers).max(1)
    }
}
