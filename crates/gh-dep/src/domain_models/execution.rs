//! Execution model
//!
//! What to do with a selected PR, how to do it, and what came out of it.

use super::Pr;
use gh_client::{CiVerdict, MergeMethod};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Action applied to every PR of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Approve,
    Merge,
    ApproveThenMerge,
}

impl ExecutionMode {
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Approve => "Approve Only",
            ExecutionMode::Merge => "Merge Only",
            ExecutionMode::ApproveThenMerge => "Approve & Merge",
        }
    }

    /// Next mode in the cycle approve -> merge -> approve & merge -> approve
    pub fn next(self) -> Self {
        match self {
            ExecutionMode::Approve => ExecutionMode::Merge,
            ExecutionMode::Merge => ExecutionMode::ApproveThenMerge,
            ExecutionMode::ApproveThenMerge => ExecutionMode::Approve,
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(ExecutionMode::Approve),
            "merge" => Ok(ExecutionMode::Merge),
            "approve-and-merge" | "both" => Ok(ExecutionMode::ApproveThenMerge),
            other => Err(format!(
                "invalid mode '{}': must be one of approve, merge, approve-and-merge",
                other
            )),
        }
    }
}

/// How a merge is carried out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Ask the dependency bot to merge via a comment
    #[default]
    BotComment,
    /// Call the merge endpoint directly
    DirectApi,
}

impl MergeStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            MergeStrategy::BotComment => "dependabot",
            MergeStrategy::DirectApi => "api",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            MergeStrategy::BotComment => MergeStrategy::DirectApi,
            MergeStrategy::DirectApi => MergeStrategy::BotComment,
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dependabot" | "bot" | "comment" => Ok(MergeStrategy::BotComment),
            "api" => Ok(MergeStrategy::DirectApi),
            other => Err(format!(
                "invalid merge strategy '{}': must be one of dependabot, api",
                other
            )),
        }
    }
}

/// Options shared by all executions of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    pub merge_method: MergeMethod,
    pub merge_strategy: MergeStrategy,
    /// Only merge when a fresh CI verdict is `success`
    pub require_checks: bool,
    /// Login of the bot addressed by merge comments (without `@`)
    pub bot: String,
    /// Deadline for every remote call
    pub request_timeout: Duration,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            merge_method: MergeMethod::default(),
            merge_strategy: MergeStrategy::default(),
            require_checks: false,
            bot: "dependabot".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ExecutionOptions {
    /// The comment that asks the bot to merge with the configured method
    pub fn bot_merge_comment(&self) -> String {
        let command = match self.merge_method {
            MergeMethod::Merge => "merge",
            MergeMethod::Squash => "squash and merge",
            MergeMethod::Rebase => "rebase and merge",
        };
        format!("@{} {}", self.bot, command)
    }
}

/// Why a single PR action did not succeed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("failed to fetch PR head: {0}")]
    HeadFetch(String),
    #[error("failed to check CI status: {0}")]
    CiCheck(String),
    #[error("CI checks not passing (state: {0})")]
    ChecksNotPassing(CiVerdict),
    #[error("merge was not performed: {0}")]
    NotMerged(String),
    #[error("{0}")]
    Api(String),
}

/// Outcome of one executor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub pr: Pr,
    /// Human readable action, e.g. `approve` or `merge (api)`
    pub action: String,
    pub outcome: Result<(), ExecutionError>,
}

impl ExecutionResult {
    #[cfg(test)]
    pub fn succeeded(pr: Pr, action: impl Into<String>) -> Self {
        Self {
            pr,
            action: action.into(),
            outcome: Ok(()),
        }
    }

    pub fn failed(pr: Pr, action: impl Into<String>, error: ExecutionError) -> Self {
        Self {
            pr,
            action: action.into(),
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&ExecutionError> {
        self.outcome.as_ref().err()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(()) => write!(f, "✓ [{}] #{} {}", self.pr.repo, self.pr.number, self.action),
            Err(e) => write!(
                f,
                "✗ [{}] #{} {}: {}",
                self.pr.repo, self.pr.number, self.action, e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::Repository;

    #[test]
    fn test_mode_cycle() {
        let mode = ExecutionMode::default();
        assert_eq!(mode, ExecutionMode::Approve);
        assert_eq!(mode.next(), ExecutionMode::Merge);
        assert_eq!(mode.next().next(), ExecutionMode::ApproveThenMerge);
        assert_eq!(mode.next().next().next(), ExecutionMode::Approve);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("both".parse::<ExecutionMode>(), Ok(ExecutionMode::ApproveThenMerge));
        assert_eq!("approve-and-merge".parse::<ExecutionMode>(), Ok(ExecutionMode::ApproveThenMerge));
        assert_eq!("Merge".parse::<ExecutionMode>(), Ok(ExecutionMode::Merge));
        assert!("close".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_strategy_toggle() {
        assert_eq!(MergeStrategy::BotComment.toggle(), MergeStrategy::DirectApi);
        assert_eq!(MergeStrategy::DirectApi.toggle(), MergeStrategy::BotComment);
        assert_eq!("api".parse::<MergeStrategy>(), Ok(MergeStrategy::DirectApi));
    }

    #[test]
    fn test_bot_merge_comment() {
        let mut options = ExecutionOptions::default();
        assert_eq!(options.bot_merge_comment(), "@dependabot squash and merge");
        options.merge_method = MergeMethod::Merge;
        assert_eq!(options.bot_merge_comment(), "@dependabot merge");
        options.merge_method = MergeMethod::Rebase;
        options.bot = "renovate".to_string();
        assert_eq!(options.bot_merge_comment(), "@renovate rebase and merge");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExecutionError::ChecksNotPassing(CiVerdict::Pending).to_string(),
            "CI checks not passing (state: pending)"
        );
        assert_eq!(
            ExecutionError::HeadFetch("404".to_string()).to_string(),
            "failed to fetch PR head: 404"
        );
    }

    #[test]
    fn test_result_display() {
        let pr = Pr::new(Repository::new("a", "b"), 5, "bump x");
        let ok = ExecutionResult::succeeded(pr.clone(), "approve");
        assert_eq!(ok.to_string(), "✓ [a/b] #5 approve");

        let failed = ExecutionResult::failed(
            pr,
            "merge (skipped)",
            ExecutionError::ChecksNotPassing(CiVerdict::Failure),
        );
        assert!(!failed.is_success());
        assert_eq!(
            failed.to_string(),
            "✗ [a/b] #5 merge (skipped): CI checks not passing (state: failure)"
        );
    }
}
