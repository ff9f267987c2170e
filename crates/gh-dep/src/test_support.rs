//! Scriptable GitHub client for tests

use async_trait::async_trait;
use gh_client::{
    CheckState, CheckSuite, CombinedStatus, GitHubClient, MergeMethod, MergeResult,
    PullRequestSummary, ReviewEvent, SearchQuery, StatusContext,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Stats {
    calls: Mutex<Vec<String>>,
    head_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Mock client answering from canned data and recording mutations
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    search_results: Vec<PullRequestSummary>,
    fail_search: bool,
    suites: Vec<CheckSuite>,
    statuses: Vec<StatusContext>,
    fail_head: HashSet<u64>,
    fail_ci: bool,
    fail_approve: HashSet<u64>,
    fail_merge: HashSet<u64>,
    delay: Duration,
    stats: Arc<Stats>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(2),
            ..Default::default()
        }
    }

    pub fn with_search_results(mut self, results: Vec<PullRequestSummary>) -> Self {
        self.search_results = results;
        self
    }

    pub fn fail_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn with_suites(mut self, suites: Vec<CheckSuite>) -> Self {
        self.suites = suites;
        self
    }

    pub fn with_statuses(mut self, states: &[CheckState]) -> Self {
        self.statuses = states
            .iter()
            .map(|state| StatusContext {
                context: "ci".to_string(),
                state: *state,
            })
            .collect();
        self
    }

    /// Latency of head lookups and approvals
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_head_for(mut self, number: u64) -> Self {
        self.fail_head.insert(number);
        self
    }

    pub fn fail_ci(mut self) -> Self {
        self.fail_ci = true;
        self
    }

    pub fn fail_approve_for(mut self, number: u64) -> Self {
        self.fail_approve.insert(number);
        self
    }

    pub fn fail_merge_for(mut self, number: u64) -> Self {
        self.fail_merge.insert(number);
        self
    }

    /// Recorded mutations, e.g. `approve a/b#1`
    pub fn calls(&self) -> Vec<String> {
        self.stats.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn head_calls(&self) -> usize {
        self.stats.head_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.stats.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.stats.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn search_pull_requests(
        &self,
        query: &SearchQuery,
    ) -> anyhow::Result<Vec<PullRequestSummary>> {
        if self.fail_search {
            anyhow::bail!("search unavailable");
        }
        Ok(self
            .search_results
            .iter()
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn fetch_head_sha(&self, _owner: &str, _repo: &str, pr_number: u64) -> anyhow::Result<String> {
        self.stats.head_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_in_flight.fetch_max(current, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_head.contains(&pr_number) {
            anyhow::bail!("PR #{} not found", pr_number);
        }
        Ok(format!("sha-{}", pr_number))
    }

    async fn fetch_check_suites(
        &self,
        _owner: &str,
        _repo: &str,
        _commit_sha: &str,
    ) -> anyhow::Result<Vec<CheckSuite>> {
        if self.fail_ci {
            anyhow::bail!("checks unavailable");
        }
        Ok(self.suites.clone())
    }

    async fn fetch_combined_status(
        &self,
        _owner: &str,
        _repo: &str,
        _commit_sha: &str,
    ) -> anyhow::Result<CombinedStatus> {
        if self.fail_ci {
            anyhow::bail!("status unavailable");
        }
        Ok(CombinedStatus {
            state: CheckState::Success,
            statuses: self.statuses.clone(),
        })
    }

    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        _event: ReviewEvent,
        _body: Option<&str>,
    ) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        self.record(format!("approve {}/{}#{}", owner, repo, pr_number));
        if self.fail_approve.contains(&pr_number) {
            anyhow::bail!("approval rejected");
        }
        Ok(())
    }

    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult> {
        self.record(format!("merge {}/{}#{} {}", owner, repo, pr_number, merge_method));
        if self.fail_merge.contains(&pr_number) {
            anyhow::bail!("merge conflict");
        }
        Ok(MergeResult {
            merged: true,
            sha: Some("merged".to_string()),
            message: "Pull Request successfully merged".to_string(),
        })
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> anyhow::Result<()> {
        self.record(format!("comment {}/{}#{} {}", owner, repo, pr_number, body));
        if self.fail_merge.contains(&pr_number) {
            anyhow::bail!("comment rejected");
        }
        Ok(())
    }
}
