//! Interactive reviewer state
//!
//! Owned by the UI loop and only ever replaced by the reducer. Background
//! tasks never touch it; they dispatch actions instead.

use crate::domain_models::{ExecutionMode, ExecutionOptions, ExecutionResult, Pr};
use crate::theme::Theme;
use gh_client::CiVerdict;
use std::collections::BTreeSet;

/// Which screen is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    List,
    Executing,
    Complete,
    /// Overlay on top of the list
    Help,
}

/// PRs, the visible subset and what is selected in it
///
/// `selected` and `cursor` are positions in `filtered`, so every refilter
/// clears the selection and resets the cursor.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub all: Vec<Pr>,
    /// Indices into `all` that pass the current filter, in discovery order
    pub filtered: Vec<usize>,
    pub selected: BTreeSet<usize>,
    pub cursor: usize,
    /// Committed search query
    pub query: String,
}

impl SelectionState {
    pub fn new(prs: Vec<Pr>, require_checks: bool) -> Self {
        let mut selection = Self {
            all: prs,
            ..Default::default()
        };
        selection.refilter(require_checks);
        selection
    }

    /// Recompute the visible subset from all PRs
    pub fn refilter(&mut self, require_checks: bool) {
        self.filtered = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, pr)| pr.matches_query(&self.query))
            .filter(|(_, pr)| !require_checks || pr.ci == CiVerdict::Success)
            .map(|(i, _)| i)
            .collect();
        self.selected.clear();
        self.cursor = 0;
    }

    pub fn visible(&self) -> impl Iterator<Item = &Pr> {
        self.filtered.iter().filter_map(|&i| self.all.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn cursor_pr(&self) -> Option<&Pr> {
        self.filtered
            .get(self.cursor)
            .and_then(|&i| self.all.get(i))
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.selected.contains(&position)
    }

    /// Selected PRs in list order
    pub fn selected_prs(&self) -> Vec<Pr> {
        self.selected
            .iter()
            .filter_map(|&position| self.filtered.get(position))
            .filter_map(|&i| self.all.get(i))
            .cloned()
            .collect()
    }
}

/// Results of the running or finished batch
#[derive(Debug, Clone, Default)]
pub struct ExecutionState {
    pub total: usize,
    /// `(batch index, result)` in arrival order
    pub results: Vec<(usize, ExecutionResult)>,
}

impl ExecutionState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
        }
    }

    pub fn received(&self) -> usize {
        self.results.len()
    }

    /// Results in selection order, whatever order they arrived in
    pub fn ordered(&self) -> Vec<&ExecutionResult> {
        let mut ordered: Vec<&(usize, ExecutionResult)> = self.results.iter().collect();
        ordered.sort_by_key(|(index, _)| *index);
        ordered.into_iter().map(|(_, result)| result).collect()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.received() - self.succeeded()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    pub view: View,
    pub selection: SelectionState,
    /// Search buffer while search mode is active
    pub search: Option<String>,
    pub mode: ExecutionMode,
    pub options: ExecutionOptions,
    pub execution: ExecutionState,
    pub theme: Theme,
}

impl AppState {
    pub fn new(prs: Vec<Pr>, mode: ExecutionMode, options: ExecutionOptions) -> Self {
        Self {
            running: true,
            view: View::List,
            selection: SelectionState::new(prs, options.require_checks),
            search: None,
            mode,
            options,
            execution: ExecutionState::default(),
            theme: Theme::default(),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new(), ExecutionMode::default(), ExecutionOptions::default())
    }
}
