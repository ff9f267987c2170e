//! KeyboardMiddleware - translates key presses into view specific actions
//!
//! Keys depend on the active view, and in the list on whether a search query
//! is being typed. While a batch is running no key is mapped, Ctrl+C
//! included, so issued actions always run to completion.

use crate::actions::{
    Action, ExecutionAction, GlobalAction, SearchAction, SelectionAction, SettingsAction,
};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, View};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        let Action::Global(GlobalAction::KeyPressed(key)) = action else {
            return true;
        };

        if let Some(mapped) = map_key(*key, state) {
            log::debug!("Key {:?} -> {:?}", key.code, mapped);
            dispatcher.dispatch(mapped);
        }
        false
    }
}

/// Action for a key press in the current state, if any
pub fn map_key(key: KeyEvent, state: &AppState) -> Option<Action> {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');

    match state.view {
        View::Executing => None,
        _ if ctrl_c => Some(Action::Global(GlobalAction::Quit)),
        View::List if state.is_searching() => map_search_key(key),
        View::List => map_list_key(key),
        View::Help => match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
                Some(Action::Global(GlobalAction::CloseHelp))
            }
            _ => None,
        },
        View::Complete => match key.code {
            KeyCode::Enter | KeyCode::Char('q') => Some(Action::Global(GlobalAction::Quit)),
            _ => None,
        },
    }
}

fn map_search_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Enter => SearchAction::Confirm,
        KeyCode::Esc => SearchAction::Cancel,
        KeyCode::Backspace => SearchAction::Backspace,
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            SearchAction::Char(c)
        }
        _ => return None,
    };
    Some(Action::Search(action))
}

fn map_list_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Selection(SelectionAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Action::Selection(SelectionAction::CursorDown),
        KeyCode::Char(' ') => Action::Selection(SelectionAction::Toggle),
        KeyCode::Char('a') => Action::Selection(SelectionAction::SelectAll),
        KeyCode::Char('d') => Action::Selection(SelectionAction::DeselectAll),
        KeyCode::Char('m') => Action::Settings(SettingsAction::CycleMode),
        KeyCode::Char('M') => Action::Settings(SettingsAction::CycleMergeMethod),
        KeyCode::Char('D') => Action::Settings(SettingsAction::ToggleMergeStrategy),
        KeyCode::Char('c') => Action::Settings(SettingsAction::ToggleRequireChecks),
        KeyCode::Char('/') => Action::Search(SearchAction::Start),
        KeyCode::Char('o') => Action::Global(GlobalAction::OpenInBrowser),
        KeyCode::Char('x') => Action::Execution(ExecutionAction::Execute),
        KeyCode::Char('?') => Action::Global(GlobalAction::ShowHelp),
        KeyCode::Char('q') => Action::Global(GlobalAction::Quit),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ExecutionState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn ctrl_c() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_list_keys() {
        let state = AppState::default();
        assert!(matches!(
            map_key(key(KeyCode::Char('j')), &state),
            Some(Action::Selection(SelectionAction::CursorDown))
        ));
        assert!(matches!(
            map_key(key(KeyCode::Char('D')), &state),
            Some(Action::Settings(SettingsAction::ToggleMergeStrategy))
        ));
        assert!(matches!(
            map_key(key(KeyCode::Char('c')), &state),
            Some(Action::Settings(SettingsAction::ToggleRequireChecks))
        ));
        assert!(matches!(
            map_key(ctrl_c(), &state),
            Some(Action::Global(GlobalAction::Quit))
        ));
        assert!(map_key(key(KeyCode::Char('z')), &state).is_none());
    }

    #[test]
    fn test_search_captures_characters() {
        let state = AppState {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            map_key(key(KeyCode::Char('q')), &state),
            Some(Action::Search(SearchAction::Char('q')))
        ));
        assert!(matches!(
            map_key(key(KeyCode::Esc), &state),
            Some(Action::Search(SearchAction::Cancel))
        ));
        assert!(matches!(
            map_key(ctrl_c(), &state),
            Some(Action::Global(GlobalAction::Quit))
        ));
    }

    #[test]
    fn test_executing_maps_no_keys() {
        let state = AppState {
            view: View::Executing,
            execution: ExecutionState::new(3),
            ..Default::default()
        };
        assert!(map_key(key(KeyCode::Char('q')), &state).is_none());
        assert!(map_key(key(KeyCode::Enter), &state).is_none());
        assert!(map_key(key(KeyCode::Esc), &state).is_none());
        assert!(map_key(ctrl_c(), &state).is_none());
    }

    #[test]
    fn test_complete_and_help_keys() {
        let complete = AppState {
            view: View::Complete,
            ..Default::default()
        };
        assert!(matches!(
            map_key(key(KeyCode::Enter), &complete),
            Some(Action::Global(GlobalAction::Quit))
        ));

        let help = AppState {
            view: View::Help,
            ..Default::default()
        };
        assert!(matches!(
            map_key(key(KeyCode::Esc), &help),
            Some(Action::Global(GlobalAction::CloseHelp))
        ));
        assert!(map_key(key(KeyCode::Char('x')), &help).is_none());
    }
}
