//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from application domain models
//! to keep this crate pure and reusable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pull request as returned by the search API
///
/// Only the fields the search endpoint reliably provides are populated;
/// head commit and CI state have to be fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Repository in `owner/name` form
    pub repository: String,

    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// Author's GitHub login
    pub author: String,

    /// PR URL for opening in browser
    pub html_url: String,
}

/// Parameters for searching open pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Restrict to repositories owned by this user or org (`@me` allowed)
    pub owner: Option<String>,
    /// Restrict to these repositories (`owner/name`)
    pub repos: Vec<String>,
    /// Only PRs carrying this label
    pub label: Option<String>,
    /// Only PRs authored by this login (`any` disables the filter)
    pub author: Option<String>,
    /// Only PRs where a review from the authenticated user is requested
    pub review_requested: bool,
    /// Include PRs of archived repositories
    pub include_archived: bool,
    /// Maximum number of results
    pub limit: usize,
}

impl SearchQuery {
    /// Render the query as a GitHub search string
    pub fn to_query_string(&self) -> String {
        let mut parts = vec!["is:pr".to_string(), "is:open".to_string()];

        if !self.include_archived {
            parts.push("archived:false".to_string());
        }

        if let Some(owner) = self.owner.as_deref().filter(|o| !o.is_empty()) {
            parts.push(format!("user:{}", owner));
        }

        for repo in self.repos.iter().filter(|r| !r.is_empty()) {
            parts.push(format!("repo:{}", repo));
        }

        if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
            parts.push(format!("label:\"{}\"", label));
        }

        if let Some(author) = self
            .author
            .as_deref()
            .filter(|a| !a.is_empty() && *a != "any")
        {
            parts.push(format!("author:{}", author));
        }

        if self.review_requested {
            parts.push("review-requested:@me".to_string());
        }

        parts.join(" ")
    }
}

/// Status of a check suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckSuiteStatus {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Requested,
    Pending,
}

/// Conclusion of a completed check suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    Skipped,
    TimedOut,
    ActionRequired,
    Stale,
    StartupFailure,
    /// A conclusion this client does not know about
    Unknown,
}

/// A check suite attached to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuite {
    pub status: CheckSuiteStatus,
    /// Only set once the suite completed
    pub conclusion: Option<CheckConclusion>,
}

/// State of a commit status context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Success,
    Pending,
    Failure,
    Error,
}

/// A single status context reported via the legacy Status API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusContext {
    /// Context name (e.g., "ci/circleci")
    pub context: String,
    pub state: CheckState,
}

/// Combined status for a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedStatus {
    /// Overall state as computed by GitHub
    pub state: CheckState,
    pub statuses: Vec<StatusContext>,
}

/// Tri-state CI verdict derived from check suites and status contexts
///
/// `Unknown` is used when no verdict could be obtained (e.g. the head
/// commit or both signal sources could not be fetched).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiVerdict {
    #[default]
    Unknown,
    Success,
    Pending,
    Failure,
}

impl CiVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            CiVerdict::Unknown => "unknown",
            CiVerdict::Success => "success",
            CiVerdict::Pending => "pending",
            CiVerdict::Failure => "failure",
        }
    }

    /// Single character icon used in tables
    pub fn icon(&self) -> &'static str {
        match self {
            CiVerdict::Success => "✓",
            CiVerdict::Pending => "●",
            CiVerdict::Failure => "✗",
            CiVerdict::Unknown => "-",
        }
    }
}

impl fmt::Display for CiVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge method for pull requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Create a merge commit
    Merge,
    /// Squash all commits into one
    #[default]
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl MergeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "merge",
            MergeMethod::Squash => "squash",
            MergeMethod::Rebase => "rebase",
        }
    }

    /// Next method in the cycle squash -> merge -> rebase -> squash
    pub fn next(self) -> Self {
        match self {
            MergeMethod::Squash => MergeMethod::Merge,
            MergeMethod::Merge => MergeMethod::Rebase,
            MergeMethod::Rebase => MergeMethod::Squash,
        }
    }
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merge" => Ok(MergeMethod::Merge),
            "squash" => Ok(MergeMethod::Squash),
            "rebase" => Ok(MergeMethod::Rebase),
            other => Err(format!(
                "invalid merge method '{}': must be one of merge, squash, rebase",
                other
            )),
        }
    }
}

/// Result of a merge operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,

    /// SHA of the merge commit (if successful)
    pub sha: Option<String>,

    /// Message from GitHub
    pub message: String,
}

/// Review event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    /// Approve the PR
    Approve,
    /// Request changes
    RequestChanges,
    /// Just comment (no approval/rejection)
    Comment,
}
