//! Non-interactive batch execution over a cached group

use crate::domain_models::{
    ExecutionMode, ExecutionOptions, ExecutionResult, MergeStrategy, Pr,
};
use crate::error::{Error, Result};
use crate::executor::Executor;
use gh_dep_config::GroupCache;
use log::warn;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Succeeded/failed counts of a finished batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &ExecutionResult) {
        if result.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Summary: {} succeeded, {} failed",
            self.succeeded, self.failed
        )
    }
}

/// Load a group from the cache written by `list --group`
pub fn load_group(key: &str) -> Result<Vec<Pr>> {
    let cache = GroupCache::<Pr>::load()
        .map_err(Error::Cache)?
        .ok_or(Error::NoCachedGroups)?;
    find_group(&cache, key)
}

pub fn find_group(cache: &GroupCache<Pr>, key: &str) -> Result<Vec<Pr>> {
    if cache.groups.is_empty() {
        return Err(Error::NoCachedGroups);
    }
    let prs = cache
        .groups
        .get(key)
        .ok_or_else(|| Error::GroupNotFound(key.to_string()))?;
    if prs.is_empty() {
        return Err(Error::EmptyGroup(key.to_string()));
    }
    Ok(prs.clone())
}

/// Run `mode` on every PR, at most `workers` at a time
///
/// `on_result` is called as soon as each PR finishes, in completion order.
pub async fn run_batch(
    executor: &Executor,
    prs: Vec<Pr>,
    mode: ExecutionMode,
    workers: usize,
    mut on_result: impl FnMut(&ExecutionResult),
) -> BatchSummary {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for pr in prs {
        let semaphore = Arc::clone(&semaphore);
        let executor = executor.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            executor.execute(&pr, mode).await
        });
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => {
                summary.record(&result);
                on_result(&result);
            }
            Err(e) => {
                warn!("Batch task failed: {}", e);
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Lines describing what a batch would do, without doing it
pub fn describe(prs: &[Pr], mode: ExecutionMode, options: &ExecutionOptions) -> Vec<String> {
    let merge_details = match options.merge_strategy {
        MergeStrategy::BotComment => format!("comment \"{}\"", options.bot_merge_comment()),
        MergeStrategy::DirectApi => format!("merge via API ({})", options.merge_method),
    };
    let gate = if options.require_checks {
        " if CI passes"
    } else {
        ""
    };

    prs.iter()
        .flat_map(|pr| {
            let approve = format!("approve #{}: [{}] {}", pr.number, pr.repo, pr.title);
            let merge = format!("merge #{}: [{}] {}{}", pr.number, pr.repo, merge_details, gate);
            match mode {
                ExecutionMode::Approve => vec![approve],
                ExecutionMode::Merge => vec![merge],
                ExecutionMode::ApproveThenMerge => vec![approve, merge],
            }
        })
        .collect()
}
