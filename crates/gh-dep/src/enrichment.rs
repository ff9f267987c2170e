//! Enrichment of discovered PRs with head commit and CI verdict
//!
//! Every PR is enriched by its own task. A counting semaphore bounds the
//! number of tasks talking to GitHub at the same time. The call returns only
//! after all tasks finished, so the enriched fields can be read right away.

use crate::domain_models::Pr;
use gh_client::{ci, CiVerdict, GitHubClient};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// What a single task found out about its PR
#[derive(Debug, Default)]
struct Enriched {
    head_sha: Option<String>,
    ci: CiVerdict,
}

/// Attach head commit and CI verdict to every PR
///
/// At most `workers` PRs are enriched concurrently (at least one).
/// Failures only leave the affected PR at an unknown verdict.
pub async fn enrich(
    client: Arc<dyn GitHubClient>,
    prs: &mut [Pr],
    workers: usize,
    request_timeout: Duration,
) {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, pr) in prs.iter().enumerate() {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!("Enrichment pool closed: {}", e);
                break;
            }
        };

        let client = Arc::clone(&client);
        let pr = pr.clone();
        tasks.spawn(async move {
            let enriched = enrich_one(client.as_ref(), &pr, request_timeout).await;
            drop(permit);
            (index, enriched)
        });
    }

    // Barrier: results are only applied once every task is done.
    // Each index is written by exactly one task's result.
    let mut results = Vec::with_capacity(prs.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => warn!("Enrichment task failed: {}", e),
        }
    }

    for (index, enriched) in results {
        if let Some(pr) = prs.get_mut(index) {
            pr.head_sha = enriched.head_sha;
            pr.ci = enriched.ci;
        }
    }

    debug!("Enriched {} PRs", prs.len());
}

async fn enrich_one(client: &dyn GitHubClient, pr: &Pr, request_timeout: Duration) -> Enriched {
    let (owner, repo) = (pr.repo.owner.as_str(), pr.repo.name.as_str());

    let head = tokio::time::timeout(request_timeout, client.fetch_head_sha(owner, repo, pr.number))
        .await
        .map_err(|_| anyhow::anyhow!("timed out after {:?}", request_timeout))
        .and_then(|result| result);

    let head_sha = match head {
        Ok(sha) => sha,
        Err(e) => {
            warn!("Could not fetch head of {}#{}: {:#}", pr.repo, pr.number, e);
            return Enriched::default();
        }
    };

    let verdict = tokio::time::timeout(
        request_timeout,
        ci::fetch_verdict(client, owner, repo, &head_sha),
    )
    .await
    .map_err(|_| anyhow::anyhow!("timed out after {:?}", request_timeout))
    .and_then(|result| result);

    let ci = match verdict {
        Ok(verdict) => verdict,
        Err(e) => {
            warn!("Could not fetch CI of {}#{}: {:#}", pr.repo, pr.number, e);
            CiVerdict::Unknown
        }
    };

    Enriched {
        head_sha: Some(head_sha),
        ci,
    }
}
