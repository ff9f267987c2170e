//! Actions flowing through the store
//!
//! Key presses enter as [`GlobalAction::KeyPressed`] and are translated by the
//! keyboard middleware into the view specific actions below. Background tasks
//! report back through [`ExecutionAction`].

use crate::domain_models::ExecutionResult;
use ratatui::crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum Action {
    Global(GlobalAction),
    Selection(SelectionAction),
    Settings(SettingsAction),
    Search(SearchAction),
    Execution(ExecutionAction),
}

#[derive(Debug, Clone)]
pub enum GlobalAction {
    KeyPressed(KeyEvent),
    ShowHelp,
    CloseHelp,
    /// Open the PR under the cursor in the browser
    OpenInBrowser,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    CursorUp,
    CursorDown,
    Toggle,
    SelectAll,
    DeselectAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    CycleMode,
    CycleMergeMethod,
    ToggleMergeStrategy,
    ToggleRequireChecks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Start,
    Char(char),
    Backspace,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone)]
pub enum ExecutionAction {
    /// Run the current mode on the selected PRs
    Execute,
    /// A batch of `total` actions was launched
    Started { total: usize },
    /// One action finished; `index` is the PR's position in the batch
    ResultReceived {
        index: usize,
        result: ExecutionResult,
    },
    /// Every action of the batch finished
    Finished,
}
