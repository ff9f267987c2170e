//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::types::{
    CheckConclusion, CheckState, CheckSuite, CheckSuiteStatus, CombinedStatus, MergeMethod,
    MergeResult, PullRequestSummary, ReviewEvent, SearchQuery, StatusContext,
};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SEARCH_PAGE_SIZE: u8 = 100;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
}

#[derive(Deserialize)]
struct RawCheckSuites {
    #[serde(default)]
    check_suites: Vec<RawCheckSuite>,
}

#[derive(Deserialize)]
struct RawCheckSuite {
    status: Option<String>,
    conclusion: Option<String>,
}

#[derive(Deserialize)]
struct RawCombinedStatus {
    state: String,
    #[serde(default)]
    statuses: Vec<RawStatus>,
}

#[derive(Deserialize)]
struct RawStatus {
    context: Option<String>,
    state: String,
}

#[derive(Serialize)]
struct ReviewBody<'a> {
    event: ReviewEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

#[derive(Serialize)]
struct MergeBody {
    merge_method: MergeMethod,
}

#[derive(Deserialize)]
struct RawMergeResponse {
    sha: Option<String>,
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn search_pull_requests(
        &self,
        query: &SearchQuery,
    ) -> anyhow::Result<Vec<PullRequestSummary>> {
        let q = query.to_query_string();
        debug!("Searching PRs: {} (limit {})", q, query.limit);

        let mut prs = Vec::new();
        let mut page_num = 1u32;

        while prs.len() < query.limit {
            let page = self
                .octocrab
                .search()
                .issues_and_pull_requests(&q)
                .per_page(SEARCH_PAGE_SIZE)
                .page(page_num)
                .send()
                .await?;

            let page_is_empty = page.items.is_empty();

            for issue in page.items {
                if prs.len() >= query.limit {
                    break;
                }
                let Some(repository) = repository_from_url(issue.repository_url.as_str()) else {
                    debug!("Skipping #{}: unparseable repository url", issue.number);
                    continue;
                };
                prs.push(PullRequestSummary {
                    repository,
                    number: issue.number,
                    title: issue.title,
                    author: issue.user.login,
                    html_url: issue.html_url.to_string(),
                });
            }

            if page_is_empty || page.next.is_none() {
                break;
            }

            page_num += 1;
        }

        debug!("Search returned {} PRs", prs.len());
        Ok(prs)
    }

    async fn fetch_head_sha(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<String> {
        debug!("Fetching head of {}/{}#{}", owner, repo, pr_number);

        let pr = self.octocrab.pulls(owner, repo).get(pr_number).await?;
        Ok(pr.head.sha)
    }

    async fn fetch_check_suites(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<Vec<CheckSuite>> {
        debug!(
            "Fetching check suites for {}/{} @ {}",
            owner, repo, commit_sha
        );

        let route = format!(
            "/repos/{}/{}/commits/{}/check-suites",
            owner, repo, commit_sha
        );
        let raw: RawCheckSuites = self
            .octocrab
            .get(route, Some(&PageParams { per_page: 100 }))
            .await?;

        Ok(raw
            .check_suites
            .into_iter()
            .map(|suite| CheckSuite {
                status: convert_suite_status(suite.status.as_deref().unwrap_or_default()),
                conclusion: suite.conclusion.as_deref().map(convert_conclusion_string),
            })
            .collect())
    }

    async fn fetch_combined_status(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<CombinedStatus> {
        debug!(
            "Fetching commit status for {}/{} @ {}",
            owner, repo, commit_sha
        );

        // Raw GET since octocrab's Reference type doesn't support commit SHAs
        let route = format!("/repos/{}/{}/commits/{}/status", owner, repo, commit_sha);
        let raw: RawCombinedStatus = self.octocrab.get(route, None::<&()>).await?;

        Ok(CombinedStatus {
            state: convert_status_state(&raw.state),
            statuses: raw
                .statuses
                .into_iter()
                .map(|s| StatusContext {
                    context: s.context.unwrap_or_else(|| "unknown".to_string()),
                    state: convert_status_state(&s.state),
                })
                .collect(),
        })
    }

    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        event: ReviewEvent,
        body: Option<&str>,
    ) -> anyhow::Result<()> {
        debug!(
            "Creating {:?} review on {}/{}#{}",
            event, owner, repo, pr_number
        );

        let route = format!("/repos/{}/{}/pulls/{}/reviews", owner, repo, pr_number);
        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(&ReviewBody { event, body }))
            .await?;
        Ok(())
    }

    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult> {
        debug!(
            "Merging {}/{}#{} with method {}",
            owner, repo, pr_number, merge_method
        );

        let route = format!("/repos/{}/{}/pulls/{}/merge", owner, repo, pr_number);
        let raw: RawMergeResponse = self
            .octocrab
            .put(route, Some(&MergeBody { merge_method }))
            .await?;

        Ok(MergeResult {
            merged: raw.merged,
            sha: raw.sha,
            message: raw.message,
        })
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> anyhow::Result<()> {
        debug!("Commenting on {}/{}#{}: {}", owner, repo, pr_number, body);

        self.octocrab
            .issues(owner, repo)
            .create_comment(pr_number, body)
            .await?;
        Ok(())
    }
}

/// Extract `owner/name` from an API repository url
/// (`https://api.github.com/repos/{owner}/{name}`)
fn repository_from_url(url: &str) -> Option<String> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let name = segments.next().filter(|s| !s.is_empty())?;
    let owner = segments.next().filter(|s| !s.is_empty())?;
    if segments.next() != Some("repos") {
        return None;
    }
    Some(format!("{}/{}", owner, name))
}

/// Convert check suite status string from GitHub API to our enum
fn convert_suite_status(status: &str) -> CheckSuiteStatus {
    match status.to_lowercase().as_str() {
        "queued" => CheckSuiteStatus::Queued,
        "completed" => CheckSuiteStatus::Completed,
        "waiting" => CheckSuiteStatus::Waiting,
        "requested" => CheckSuiteStatus::Requested,
        "pending" => CheckSuiteStatus::Pending,
        // anything else is still running from our point of view
        _ => CheckSuiteStatus::InProgress,
    }
}

/// Convert conclusion string from GitHub API to our enum
fn convert_conclusion_string(conclusion: &str) -> CheckConclusion {
    match conclusion.to_lowercase().as_str() {
        "success" => CheckConclusion::Success,
        "failure" => CheckConclusion::Failure,
        "neutral" => CheckConclusion::Neutral,
        "cancelled" => CheckConclusion::Cancelled,
        "skipped" => CheckConclusion::Skipped,
        "timed_out" => CheckConclusion::TimedOut,
        "action_required" => CheckConclusion::ActionRequired,
        "stale" => CheckConclusion::Stale,
        "startup_failure" => CheckConclusion::StartupFailure,
        _ => CheckConclusion::Unknown,
    }
}

/// Convert status state string from GitHub API to our enum
fn convert_status_state(state: &str) -> CheckState {
    match state.to_lowercase().as_str() {
        "success" => CheckState::Success,
        "pending" => CheckState::Pending,
        "failure" => CheckState::Failure,
        _ => CheckState::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_conclusion_string() {
        assert_eq!(convert_conclusion_string("success"), CheckConclusion::Success);
        assert_eq!(convert_conclusion_string("SUCCESS"), CheckConclusion::Success);
        assert_eq!(convert_conclusion_string("failure"), CheckConclusion::Failure);
        assert_eq!(convert_conclusion_string("neutral"), CheckConclusion::Neutral);
        assert_eq!(convert_conclusion_string("skipped"), CheckConclusion::Skipped);
        assert_eq!(convert_conclusion_string("timed_out"), CheckConclusion::TimedOut);
        assert_eq!(
            convert_conclusion_string("action_required"),
            CheckConclusion::ActionRequired
        );
        assert_eq!(convert_conclusion_string("whatever"), CheckConclusion::Unknown);
    }

    #[test]
    fn test_convert_suite_status() {
        assert_eq!(convert_suite_status("queued"), CheckSuiteStatus::Queued);
        assert_eq!(convert_suite_status("completed"), CheckSuiteStatus::Completed);
        assert_eq!(convert_suite_status("in_progress"), CheckSuiteStatus::InProgress);
        assert_eq!(convert_suite_status(""), CheckSuiteStatus::InProgress);
    }

    #[test]
    fn test_convert_status_state() {
        assert_eq!(convert_status_state("success"), CheckState::Success);
        assert_eq!(convert_status_state("pending"), CheckState::Pending);
        assert_eq!(convert_status_state("error"), CheckState::Error);
    }

    #[test]
    fn test_repository_from_url() {
        assert_eq!(
            repository_from_url("https://api.github.com/repos/sassman/gh-dep"),
            Some("sassman/gh-dep".to_string())
        );
        assert_eq!(
            repository_from_url("https://ghe.example.com/api/v3/repos/org/repo/"),
            Some("org/repo".to_string())
        );
        assert_eq!(repository_from_url("https://api.github.com/users/sassman"), None);
    }
}
