//! View model for the Executing and Complete screens

use crate::batch::BatchSummary;
use crate::domain_models::ExecutionResult;
use crate::state::{AppState, View};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct ResultsViewModel {
    pub title: String,
    /// "received/total"
    pub progress: String,
    pub ratio: f64,
    pub lines: Vec<ResultLine>,
    pub summary: String,
    pub footer: &'static str,
}

#[derive(Debug, Clone)]
pub struct ResultLine {
    pub icon: &'static str,
    pub color: Color,
    pub text: String,
}

impl ResultsViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let execution = &state.execution;
        let complete = state.view == View::Complete;

        // While running results are shown as they arrive, once complete in selection order
        let results: Vec<&ExecutionResult> = if complete {
            execution.ordered()
        } else {
            execution.results.iter().map(|(_, result)| result).collect()
        };

        let lines = results
            .into_iter()
            .map(|result| ResultLine::new(result, state))
            .collect();

        let ratio = if execution.total == 0 {
            1.0
        } else {
            (execution.received() as f64 / execution.total as f64).min(1.0)
        };

        Self {
            title: if complete {
                format!(" {} - complete ", state.mode.label())
            } else {
                format!(" {} - running ", state.mode.label())
            },
            progress: format!("{}/{}", execution.received(), execution.total),
            ratio,
            lines,
            summary: BatchSummary {
                succeeded: execution.succeeded(),
                failed: execution.failed(),
            }
            .to_string(),
            footer: if complete {
                "Enter/q quit"
            } else {
                "waiting for results"
            },
        }
    }
}

impl ResultLine {
    fn new(result: &ExecutionResult, state: &AppState) -> Self {
        let theme = &state.theme;
        let target = format!("[{}] #{} {}", result.pr.repo, result.pr.number, result.action);
        match result.error() {
            None => Self {
                icon: "✓",
                color: theme.status_success,
                text: target,
            },
            Some(e) => Self {
                icon: "✗",
                color: theme.status_error,
                text: format!("{}: {}", target, e),
            },
        }
    }
}
