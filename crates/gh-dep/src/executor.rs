//! Action executor
//!
//! Runs one [`ExecutionMode`] against one PR and reports an [`ExecutionResult`].
//! Failures never escape as errors: they are captured in the result so a
//! single bad PR cannot abort a batch.

use crate::domain_models::{
    ExecutionError, ExecutionMode, ExecutionOptions, ExecutionResult, MergeStrategy, Pr,
};
use gh_client::{ci, CiVerdict, GitHubClient, ReviewEvent};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;

/// Executes approve/merge actions with a fixed set of options
#[derive(Clone)]
pub struct Executor {
    client: Arc<dyn GitHubClient>,
    options: ExecutionOptions,
}

impl Executor {
    pub fn new(client: Arc<dyn GitHubClient>, options: ExecutionOptions) -> Self {
        Self { client, options }
    }

    /// Run `mode` against `pr`
    pub async fn execute(&self, pr: &Pr, mode: ExecutionMode) -> ExecutionResult {
        let result = match mode {
            ExecutionMode::Approve => self.approve(pr).await,
            ExecutionMode::Merge => self.merge(pr.clone()).await,
            ExecutionMode::ApproveThenMerge => self.approve_then_merge(pr).await,
        };

        match result.error() {
            None => info!("{}#{}: {} succeeded", pr.repo, pr.number, result.action),
            Some(e) => warn!("{}#{}: {} failed: {}", pr.repo, pr.number, result.action, e),
        }
        result
    }

    async fn approve(&self, pr: &Pr) -> ExecutionResult {
        let outcome = self
            .call(self.client.create_review(
                &pr.repo.owner,
                &pr.repo.name,
                pr.number,
                ReviewEvent::Approve,
                None,
            ))
            .await
            .map_err(ExecutionError::Api);

        ExecutionResult {
            pr: pr.clone(),
            action: "approve".to_string(),
            outcome,
        }
    }

    async fn approve_then_merge(&self, pr: &Pr) -> ExecutionResult {
        let approval = self.approve(pr).await;
        if !approval.is_success() {
            return approval;
        }
        self.merge(pr.clone()).await
    }

    async fn merge(&self, mut pr: Pr) -> ExecutionResult {
        if self.options.require_checks {
            if let Err(error) = self.refresh_ci(&mut pr).await {
                return ExecutionResult::failed(pr, "merge (skipped)", error);
            }
            if pr.ci != CiVerdict::Success {
                let verdict = pr.ci;
                return ExecutionResult::failed(
                    pr,
                    "merge (skipped)",
                    ExecutionError::ChecksNotPassing(verdict),
                );
            }
        }

        match self.options.merge_strategy {
            MergeStrategy::BotComment => {
                let body = self.options.bot_merge_comment();
                let action = format!("merge ({})", self.options.bot);
                let outcome = self
                    .call(self.client.create_issue_comment(
                        &pr.repo.owner,
                        &pr.repo.name,
                        pr.number,
                        &body,
                    ))
                    .await
                    .map_err(ExecutionError::Api);
                ExecutionResult { pr, action, outcome }
            }
            MergeStrategy::DirectApi => {
                let merged = self
                    .call(self.client.merge_pull_request(
                        &pr.repo.owner,
                        &pr.repo.name,
                        pr.number,
                        self.options.merge_method,
                    ))
                    .await;
                let outcome = match merged {
                    Ok(result) if result.merged => Ok(()),
                    Ok(result) => Err(ExecutionError::NotMerged(result.message)),
                    Err(e) => Err(ExecutionError::Api(e)),
                };
                ExecutionResult {
                    pr,
                    action: "merge (api)".to_string(),
                    outcome,
                }
            }
        }
    }

    /// Fetch a fresh verdict for the PR, resolving its head first if unknown
    async fn refresh_ci(&self, pr: &mut Pr) -> Result<(), ExecutionError> {
        let head_sha = match pr.head_sha.clone() {
            Some(sha) => sha,
            None => {
                let sha = self
                    .call(self.client.fetch_head_sha(&pr.repo.owner, &pr.repo.name, pr.number))
                    .await
                    .map_err(ExecutionError::HeadFetch)?;
                pr.head_sha = Some(sha.clone());
                sha
            }
        };

        let verdict = self
            .call(ci::fetch_verdict(
                self.client.as_ref(),
                &pr.repo.owner,
                &pr.repo.name,
                &head_sha,
            ))
            .await
            .map_err(ExecutionError::CiCheck)?;

        debug!("{}#{} gated on CI verdict {}", pr.repo, pr.number, verdict);
        pr.ci = verdict;
        Ok(())
    }

    /// Await a remote call within the configured deadline
    async fn call<T>(&self, fut: impl Future<Output = anyhow::Result<T>>) -> Result<T, String> {
        match tokio::time::timeout(self.options.request_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(format!("{:#}", e)),
            Err(_) => Err(format!(
                "request timed out after {}s",
                self.options.request_timeout.as_secs()
            )),
        }
    }
}
