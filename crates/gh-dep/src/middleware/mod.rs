use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod browser_middleware;
pub mod execution_middleware;
pub mod keyboard_middleware;
pub mod logging;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the UI loop and must not block. Remote work is spawned
/// onto the runtime and reports back through the dispatcher.
pub trait Middleware {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch actions that should re-enter middleware chain
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
