use crate::actions::{Action, GlobalAction, SettingsAction};
use crate::reducers::{execution_reducer, search_reducer, selection_reducer};
use crate::state::{AppState, View};

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    // List interactions are ignored outside the list and while typing a query
    let browsing = state.view == View::List && !state.is_searching();

    match action {
        Action::Global(action) => reduce_global(state, action),
        Action::Selection(action) if browsing => {
            state.selection = selection_reducer::reduce_selection(state.selection, *action);
            state
        }
        Action::Settings(action) if browsing => reduce_settings(state, *action),
        Action::Search(action) if state.view == View::List => {
            search_reducer::reduce_search(state, action)
        }
        Action::Execution(action) => execution_reducer::reduce_execution(state, action),
        _ => state,
    }
}

fn reduce_global(mut state: AppState, action: &GlobalAction) -> AppState {
    match action {
        // A running batch is never abandoned
        GlobalAction::Quit => {
            if state.view != View::Executing {
                state.running = false;
            }
        }
        GlobalAction::ShowHelp => {
            if state.view == View::List && !state.is_searching() {
                state.view = View::Help;
            }
        }
        GlobalAction::CloseHelp => {
            if state.view == View::Help {
                state.view = View::List;
            }
        }
        GlobalAction::KeyPressed(_) | GlobalAction::OpenInBrowser => {}
    }
    state
}

fn reduce_settings(mut state: AppState, action: SettingsAction) -> AppState {
    match action {
        SettingsAction::CycleMode => {
            state.mode = state.mode.next();
        }
        SettingsAction::CycleMergeMethod => {
            state.options.merge_method = state.options.merge_method.next();
        }
        SettingsAction::ToggleMergeStrategy => {
            state.options.merge_strategy = state.options.merge_strategy.toggle();
        }
        SettingsAction::ToggleRequireChecks => {
            state.options.require_checks = !state.options.require_checks;
            state.selection.refilter(state.options.require_checks);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ExecutionAction, SearchAction, SelectionAction};
    use crate::state::ExecutionState;
    use crate::domain_models::{
        ExecutionMode, ExecutionOptions, ExecutionResult, MergeStrategy, Pr, Repository,
    };
    use gh_client::{CiVerdict, MergeMethod};

    fn pr(number: u64, title: &str, ci: CiVerdict) -> Pr {
        let mut pr = Pr::new(Repository::new("acme", "app"), number, title);
        pr.ci = ci;
        pr
    }

    fn state() -> AppState {
        AppState::new(
            vec![
                pr(1, "Bump serde from 1.0 to 1.1", CiVerdict::Success),
                pr(2, "Bump tokio from 1.0 to 1.2", CiVerdict::Pending),
                pr(3, "Bump serde_json from 1.0 to 1.3", CiVerdict::Success),
            ],
            ExecutionMode::Approve,
            ExecutionOptions::default(),
        )
    }

    fn apply(state: AppState, actions: &[Action]) -> AppState {
        actions.iter().fold(state, reduce)
    }

    fn search(query: &str) -> Vec<Action> {
        let mut actions = vec![Action::Search(SearchAction::Start)];
        actions.extend(query.chars().map(|c| Action::Search(SearchAction::Char(c))));
        actions
    }

    #[test]
    fn test_quit() {
        let state = reduce(state(), &Action::Global(GlobalAction::Quit));
        assert!(!state.running);
    }

    #[test]
    fn test_quit_ignored_while_executing() {
        let executing = AppState {
            view: View::Executing,
            execution: ExecutionState::new(2),
            ..state()
        };
        let state = reduce(executing, &Action::Global(GlobalAction::Quit));
        assert!(state.running);
        assert_eq!(state.view, View::Executing);
    }

    #[test]
    fn test_mode_cycle_returns_to_start() {
        let mut state = state();
        let mut seen = Vec::new();
        for _ in 0..3 {
            state = reduce(state, &Action::Settings(SettingsAction::CycleMode));
            seen.push(state.mode);
        }
        assert_eq!(
            seen,
            vec![
                ExecutionMode::Merge,
                ExecutionMode::ApproveThenMerge,
                ExecutionMode::Approve
            ]
        );
    }

    #[test]
    fn test_method_and_strategy_toggles() {
        let state = apply(
            state(),
            &[
                Action::Settings(SettingsAction::CycleMergeMethod),
                Action::Settings(SettingsAction::ToggleMergeStrategy),
            ],
        );
        assert_eq!(state.options.merge_method, MergeMethod::Merge);
        assert_eq!(state.options.merge_strategy, MergeStrategy::DirectApi);
    }

    #[test]
    fn test_toggling_checks_refilters_and_clears_selection() {
        let state = apply(
            state(),
            &[
                Action::Selection(SelectionAction::SelectAll),
                Action::Selection(SelectionAction::CursorDown),
                Action::Settings(SettingsAction::ToggleRequireChecks),
            ],
        );
        assert!(state.options.require_checks);
        assert_eq!(state.selection.filtered, vec![0, 2]);
        assert!(state.selection.selected.is_empty());
        assert_eq!(state.selection.cursor, 0);
    }

    #[test]
    fn test_search_confirm_commits_filter() {
        let mut actions = vec![
            Action::Selection(SelectionAction::Toggle),
            Action::Selection(SelectionAction::CursorDown),
        ];
        actions.extend(search("serdx"));
        actions.push(Action::Search(SearchAction::Backspace));
        actions.push(Action::Search(SearchAction::Confirm));

        let state = apply(state(), &actions);
        assert!(!state.is_searching());
        assert_eq!(state.selection.query, "serd");
        assert_eq!(state.selection.filtered, vec![0, 2]);
        assert!(state.selection.selected.is_empty());
        assert_eq!(state.selection.cursor, 0);
    }

    #[test]
    fn test_search_cancel_restores_filter() {
        let mut actions = search("tokio");
        actions.push(Action::Search(SearchAction::Confirm));
        actions.push(Action::Selection(SelectionAction::Toggle));
        actions.extend(search("zzz"));
        actions.push(Action::Search(SearchAction::Cancel));

        let state = apply(state(), &actions);
        assert_eq!(state.selection.query, "tokio");
        assert_eq!(state.selection.filtered, vec![1]);
        assert!(state.selection.is_selected(0));
    }

    #[test]
    fn test_list_keys_ignored_while_searching() {
        let mut actions = search("x");
        actions.push(Action::Selection(SelectionAction::SelectAll));
        actions.push(Action::Settings(SettingsAction::CycleMode));
        actions.push(Action::Global(GlobalAction::ShowHelp));

        let state = apply(state(), &actions);
        assert!(state.selection.selected.is_empty());
        assert_eq!(state.mode, ExecutionMode::Approve);
        assert_eq!(state.view, View::List);
    }

    #[test]
    fn test_help_only_from_list() {
        let state = reduce(state(), &Action::Global(GlobalAction::ShowHelp));
        assert_eq!(state.view, View::Help);

        // Selection does not leak through the overlay
        let state = reduce(state, &Action::Selection(SelectionAction::Toggle));
        assert!(state.selection.selected.is_empty());

        let state = reduce(state, &Action::Global(GlobalAction::CloseHelp));
        assert_eq!(state.view, View::List);

        let mut executing = reduce(
            state,
            &Action::Execution(ExecutionAction::Started { total: 1 }),
        );
        executing = reduce(executing, &Action::Global(GlobalAction::ShowHelp));
        assert_eq!(executing.view, View::Executing);
    }

    #[test]
    fn test_execution_lifecycle() {
        let state = apply(
            state(),
            &[
                Action::Selection(SelectionAction::SelectAll),
                Action::Execution(ExecutionAction::Started { total: 2 }),
            ],
        );
        assert_eq!(state.view, View::Executing);
        assert_eq!(state.execution.total, 2);

        // Input is locked while executing
        let state = reduce(state, &Action::Settings(SettingsAction::CycleMode));
        assert_eq!(state.mode, ExecutionMode::Approve);

        let second = ExecutionResult::succeeded(pr(3, "c", CiVerdict::Success), "approve");
        let first = ExecutionResult::succeeded(pr(1, "a", CiVerdict::Success), "approve");
        let state = apply(
            state,
            &[
                Action::Execution(ExecutionAction::ResultReceived {
                    index: 1,
                    result: second,
                }),
                Action::Execution(ExecutionAction::ResultReceived {
                    index: 0,
                    result: first,
                }),
                Action::Execution(ExecutionAction::Finished),
            ],
        );
        assert_eq!(state.view, View::Complete);
        let numbers: Vec<u64> = state.execution.ordered().iter().map(|r| r.pr.number).collect();
        assert_eq!(numbers, vec![1, 3]);

        // Complete is terminal
        let state = reduce(state, &Action::Execution(ExecutionAction::Started { total: 1 }));
        assert_eq!(state.view, View::Complete);
    }

    #[test]
    fn test_empty_batch_does_not_start() {
        let state = reduce(state(), &Action::Execution(ExecutionAction::Started { total: 0 }));
        assert_eq!(state.view, View::List);
    }
}
