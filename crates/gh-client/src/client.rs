//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::types::{
    CheckSuite, CombinedStatus, MergeMethod, MergeResult, PullRequestSummary, ReviewEvent,
    SearchQuery,
};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for interacting with the GitHub API.
/// Implementations can be direct (hitting the API) or test doubles.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequestSummary, SearchQuery};
///
/// async fn list_prs(client: &dyn GitHubClient) -> anyhow::Result<Vec<PullRequestSummary>> {
///     let query = SearchQuery { owner: Some("@me".into()), limit: 50, ..Default::default() };
///     client.search_pull_requests(&query).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Search open pull requests matching the query
    ///
    /// Returns at most `query.limit` results.
    async fn search_pull_requests(
        &self,
        query: &SearchQuery,
    ) -> anyhow::Result<Vec<PullRequestSummary>>;

    /// Fetch the HEAD commit SHA of a pull request
    async fn fetch_head_sha(&self, owner: &str, repo: &str, pr_number: u64)
        -> anyhow::Result<String>;

    /// Fetch the check suites for a commit
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `commit_sha` - The commit SHA to get check suites for
    async fn fetch_check_suites(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<Vec<CheckSuite>>;

    /// Fetch combined commit status
    ///
    /// This uses the legacy Status API which some CI systems still use
    /// (as opposed to the newer Checks API).
    async fn fetch_combined_status(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<CombinedStatus>;

    /// Create a review on a pull request
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    /// * `event` - Review event (approve, request changes, or comment)
    /// * `body` - Optional review comment body
    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        event: ReviewEvent,
        body: Option<&str>,
    ) -> anyhow::Result<()>;

    /// Merge a pull request via the merge endpoint
    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult>;

    /// Post a comment on a pull request
    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> anyhow::Result<()>;
}
