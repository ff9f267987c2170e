//! View model for the PR list
//!
//! Pre-computes header values and the rows of the visible window, so the
//! view only has to lay them out.

use crate::state::AppState;
use ratatui::style::{Color, Style, Stylize};

#[derive(Debug, Clone)]
pub struct PrListViewModel {
    pub mode: &'static str,
    pub merge_method: String,
    pub merge_strategy: &'static str,
    pub require_checks: bool,
    /// Query being typed, while in search mode
    pub search_input: Option<String>,
    /// Header line with the filter or query, always ending in e.g. "2/14 selected"
    pub status: Vec<(String, Style)>,
    pub rows: Vec<PrRow>,
    pub empty_message: &'static str,
}

#[derive(Debug, Clone)]
pub struct PrRow {
    pub marker: &'static str,
    pub ci_icon: &'static str,
    pub ci_color: Color,
    pub repo: String,
    pub number: String,
    pub title: String,
    pub is_cursor: bool,
    pub is_selected: bool,
}

impl PrListViewModel {
    /// Build the view model for a list area showing `height` rows
    pub fn from_state(state: &AppState, height: usize) -> Self {
        let selection = &state.selection;
        let offset = scroll_offset(selection.cursor, selection.visible_len(), height);

        let rows = selection
            .visible()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(position, pr)| {
                let is_selected = selection.is_selected(position);
                PrRow {
                    marker: if is_selected { "[x]" } else { "[ ]" },
                    ci_icon: pr.ci.icon(),
                    ci_color: state.theme.ci_color(pr.ci),
                    repo: pr.repo.to_string(),
                    number: format!("#{}", pr.number),
                    title: pr.title.clone(),
                    is_cursor: position == selection.cursor,
                    is_selected,
                }
            })
            .collect();

        let empty_message = if selection.all.is_empty() {
            "No pull requests found"
        } else {
            "No pull requests match the current filter"
        };

        let counts = format!(
            "{}/{} selected",
            selection.selected.len(),
            selection.visible_len()
        );

        let theme = &state.theme;
        let mut status = match (&state.search, selection.query.as_str()) {
            (Some(input), _) => vec![
                (" Search: ".to_string(), theme.key_hint()),
                (format!("{}_", input), theme.text()),
                ("  ".to_string(), theme.muted()),
            ],
            (None, "") => vec![(" ".to_string(), theme.muted())],
            (None, query) => vec![
                (" Filter: ".to_string(), theme.muted()),
                (query.to_string(), theme.text().fg(theme.status_info)),
                ("  ".to_string(), theme.muted()),
            ],
        };
        status.push((counts, theme.muted().bold()));

        Self {
            mode: state.mode.label(),
            merge_method: state.options.merge_method.to_string(),
            merge_strategy: state.options.merge_strategy.label(),
            require_checks: state.options.require_checks,
            search_input: state.search.clone(),
            status,
            rows,
            empty_message,
        }
    }
}

/// First visible position so that `cursor` stays inside a window of `height`
pub fn scroll_offset(cursor: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height || cursor < height {
        return 0;
    }
    (cursor + 1 - height).min(len - height)
}
