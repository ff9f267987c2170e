//! Errors that stop a command before any work is done

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `approve`/`merge` ran before `list --group` wrote a cache
    #[error("no cached groups found. Run 'gh-dep list --group' first")]
    NoCachedGroups,

    #[error("group '{0}' not found in cache")]
    GroupNotFound(String),

    #[error("group '{0}' is empty")]
    EmptyGroup(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid title pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Custom patterns capture exactly the package and the version
    #[error("title pattern '{pattern}' has {groups} capture groups, expected 2")]
    PatternGroups { pattern: String, groups: usize },

    #[error("group cache: {0:#}")]
    Cache(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
