use crate::state::{AppState, View};
use ratatui::{layout::Rect, widgets::Block, Frame};

pub mod help_view;
pub mod list_view;
pub mod results_view;

/// Render the entire application UI
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    f.render_widget(Block::default().style(state.theme.text().bg(state.theme.bg_primary)), area);

    match state.view {
        View::List => list_view::render(state, area, f),
        View::Help => {
            list_view::render(state, area, f);
            help_view::render(state, area, f);
        }
        View::Executing | View::Complete => results_view::render(state, area, f),
    }
}
