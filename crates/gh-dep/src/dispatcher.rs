//! Dispatcher for middleware and background task action dispatch
//!
//! Actions sent here are queued on the store's channel and re-enter the
//! middleware chain from the beginning once the UI loop drains it. This is
//! the only way results from background tasks reach the state.

use crate::actions::Action;
use std::sync::mpsc::Sender;

#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Queue an action for the store
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }
}
