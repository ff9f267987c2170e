use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::reducers::app_reducer::reduce;
use crate::state::AppState;
use std::sync::mpsc::{self, Receiver};

/// Store - holds application state and manages the Redux loop
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: Receiver<Action>,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        let (action_tx, action_rx) = mpsc::channel();
        Self {
            state: initial_state,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(action_tx),
            action_rx,
        }
    }

    /// Add middleware to the store
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process an action through middleware chain and reducer
    pub fn dispatch(&mut self, action: Action) {
        let mut should_reduce = true;

        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                should_reduce = false;
                break;
            }
        }

        if should_reduce {
            self.state = reduce(self.state.clone(), &action);
        }

        // Process any actions dispatched by middleware
        self.drain_pending();
    }

    /// Dispatch everything queued by middleware or background tasks
    pub fn drain_pending(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{GlobalAction, SelectionAction};
    use crate::domain_models::{ExecutionMode, ExecutionOptions, Pr, Repository};

    /// Turns every key press into SelectAll
    struct SelectAllOnKey;

    impl Middleware for SelectAllOnKey {
        fn handle(&mut self, action: &Action, _state: &AppState, dispatcher: &Dispatcher) -> bool {
            if let Action::Global(GlobalAction::KeyPressed(_)) = action {
                dispatcher.dispatch(Action::Selection(SelectionAction::SelectAll));
                return false;
            }
            true
        }
    }

    fn store() -> Store {
        let prs = vec![
            Pr::new(Repository::new("acme", "app"), 1, "Bump a from 1 to 2"),
            Pr::new(Repository::new("acme", "app"), 2, "Bump b from 1 to 2"),
        ];
        Store::new(AppState::new(
            prs,
            ExecutionMode::Approve,
            ExecutionOptions::default(),
        ))
    }

    #[test]
    fn test_middleware_dispatch_is_reduced() {
        use ratatui::crossterm::event::{KeyCode, KeyEvent};

        let mut store = store();
        store.add_middleware(Box::new(SelectAllOnKey));
        store.dispatch(Action::Global(GlobalAction::KeyPressed(KeyEvent::from(
            KeyCode::Char('z'),
        ))));
        assert_eq!(store.state().selection.selected.len(), 2);
    }

    #[test]
    fn test_drain_pending_applies_queued_actions() {
        let mut store = store();
        let dispatcher = store.dispatcher().clone();
        std::thread::spawn(move || dispatcher.dispatch(Action::Global(GlobalAction::Quit)))
            .join()
            .unwrap();

        assert!(store.state().running);
        store.drain_pending();
        assert!(!store.state().running);
    }
}
