use crate::actions::{Action, GlobalAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, View};
use crate::utils::browser::open_url;
use tokio::runtime::Handle;

/// Opens the PR under the cursor without blocking the UI loop
pub struct BrowserMiddleware {
    runtime: Handle,
}

impl BrowserMiddleware {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Middleware for BrowserMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, _dispatcher: &Dispatcher) -> bool {
        if !matches!(action, Action::Global(GlobalAction::OpenInBrowser)) {
            return true;
        }

        if state.view == View::List {
            match state.selection.cursor_pr() {
                Some(pr) => {
                    log::info!("Opening {}#{} in browser", pr.repo, pr.number);
                    self.runtime.spawn(open_url(pr.url.clone()));
                }
                None => log::debug!("OpenInBrowser: no PR under cursor"),
            }
        }
        false
    }
}
