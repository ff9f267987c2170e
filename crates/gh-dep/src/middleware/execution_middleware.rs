//! ExecutionMiddleware - runs a batch on the selected PRs
//!
//! On `Execute` the selected PRs are snapshotted and one task per PR is
//! spawned on the runtime. Each result is dispatched as soon as its task
//! finishes; `Finished` follows once every task has been joined.

use crate::actions::{Action, ExecutionAction};
use crate::dispatcher::Dispatcher;
use crate::domain_models::{ExecutionError, ExecutionMode, ExecutionResult, Pr};
use crate::executor::Executor;
use crate::middleware::Middleware;
use crate::state::{AppState, View};
use gh_client::GitHubClient;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinSet;

pub struct ExecutionMiddleware {
    runtime: Handle,
    client: Arc<dyn GitHubClient>,
}

impl ExecutionMiddleware {
    pub fn new(runtime: Handle, client: Arc<dyn GitHubClient>) -> Self {
        Self { runtime, client }
    }
}

impl Middleware for ExecutionMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if !matches!(action, Action::Execution(ExecutionAction::Execute)) {
            return true;
        }

        if state.view != View::List || state.is_searching() {
            return false;
        }

        let prs = state.selection.selected_prs();
        if prs.is_empty() {
            log::info!("Execute: nothing selected");
            return false;
        }

        log::info!(
            "Execute: {} on {} PRs ({} via {})",
            state.mode.label(),
            prs.len(),
            state.options.merge_method,
            state.options.merge_strategy.label()
        );

        let executor = Executor::new(Arc::clone(&self.client), state.options.clone());
        dispatcher.dispatch(Action::Execution(ExecutionAction::Started { total: prs.len() }));
        self.runtime
            .spawn(run_batch(executor, prs, state.mode, dispatcher.clone()));

        false
    }
}

async fn run_batch(executor: Executor, prs: Vec<Pr>, mode: ExecutionMode, dispatcher: Dispatcher) {
    let mut tasks = JoinSet::new();
    let mut spawned = HashMap::new();

    for (index, pr) in prs.into_iter().enumerate() {
        let executor = executor.clone();
        let task_pr = pr.clone();
        let handle = tasks.spawn(async move { executor.execute(&task_pr, mode).await });
        spawned.insert(handle.id(), (index, pr));
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, Some(result)),
            Err(e) => {
                log::error!("Execution task failed: {}", e);
                (e.id(), None)
            }
        };
        let Some((index, pr)) = spawned.remove(&id) else {
            continue;
        };
        // A panicked task still counts as a failed result
        let result = result.unwrap_or_else(|| {
            ExecutionResult::failed(
                pr,
                mode_action(mode),
                ExecutionError::Api("task aborted".to_string()),
            )
        });
        dispatcher.dispatch(Action::Execution(ExecutionAction::ResultReceived {
            index,
            result,
        }));
    }

    dispatcher.dispatch(Action::Execution(ExecutionAction::Finished));
}

fn mode_action(mode: ExecutionMode) -> &'static str {
    match mode {
        ExecutionMode::Approve => "approve",
        ExecutionMode::Merge | ExecutionMode::ApproveThenMerge => "merge",
    }
}
