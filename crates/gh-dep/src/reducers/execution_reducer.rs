//! Execution Reducer
//!
//! Drives List -> Executing -> Complete from the events reported by the
//! execution middleware.

use crate::actions::ExecutionAction;
use crate::state::{AppState, ExecutionState, View};

pub fn reduce_execution(mut state: AppState, action: &ExecutionAction) -> AppState {
    match action {
        ExecutionAction::Execute => {}
        ExecutionAction::Started { total } => {
            if state.view == View::List && *total > 0 {
                state.view = View::Executing;
                state.execution = ExecutionState::new(*total);
            }
        }
        ExecutionAction::ResultReceived { index, result } => {
            if state.view == View::Executing {
                state.execution.results.push((*index, result.clone()));
            }
        }
        ExecutionAction::Finished => {
            if state.view == View::Executing {
                state.view = View::Complete;
            }
        }
    }
    state
}
