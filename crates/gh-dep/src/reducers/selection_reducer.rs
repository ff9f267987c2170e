//! Selection Reducer
//!
//! Cursor movement and selection marks within the visible subset.

use crate::actions::SelectionAction;
use crate::state::SelectionState;

/// Reduce selection state
pub fn reduce_selection(mut state: SelectionState, action: SelectionAction) -> SelectionState {
    let len = state.visible_len();
    match action {
        SelectionAction::CursorUp => {
            state.cursor = state.cursor.saturating_sub(1);
        }
        SelectionAction::CursorDown => {
            if state.cursor + 1 < len {
                state.cursor += 1;
            }
        }
        SelectionAction::Toggle => {
            if state.cursor < len && !state.selected.remove(&state.cursor) {
                state.selected.insert(state.cursor);
            }
        }
        SelectionAction::SelectAll => {
            state.selected = (0..len).collect();
        }
        SelectionAction::DeselectAll => {
            state.selected.clear();
        }
    }
    state
}
