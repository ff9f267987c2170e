//! Search Reducer
//!
//! The buffer is edited in `AppState::search` and only becomes the filter on
//! confirm. Cancel leaves the committed query, and therefore the visible
//! subset and selection, as they were.

use crate::actions::SearchAction;
use crate::state::AppState;

pub fn reduce_search(mut state: AppState, action: &SearchAction) -> AppState {
    match action {
        SearchAction::Start => {
            state.search = Some(state.selection.query.clone());
        }
        SearchAction::Char(c) => {
            if let Some(buffer) = state.search.as_mut() {
                buffer.push(*c);
            }
        }
        SearchAction::Backspace => {
            if let Some(buffer) = state.search.as_mut() {
                buffer.pop();
            }
        }
        SearchAction::Confirm => {
            if let Some(buffer) = state.search.take() {
                state.selection.query = buffer.trim().to_string();
                state.selection.refilter(state.options.require_checks);
            }
        }
        SearchAction::Cancel => {
            state.search = None;
        }
    }
    state
}
