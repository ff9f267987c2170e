//! Progress and summary of a batch

use crate::state::AppState;
use crate::view_models::ResultsViewModel;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let vm = ResultsViewModel::from_state(state);

    let block = Block::default()
        .title(vm.title.clone())
        .borders(Borders::ALL)
        .border_style(theme.panel_border())
        .title_style(theme.panel_title())
        .title_alignment(Alignment::Center)
        .title_bottom(Line::from(Span::styled(format!(" {} ", vm.footer), theme.muted())));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [gauge_area, summary_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(inner);

    let gauge = Gauge::default()
        .gauge_style(theme.text().fg(theme.accent_secondary))
        .ratio(vm.ratio)
        .label(vm.progress.clone());
    f.render_widget(gauge, gauge_area);

    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", vm.summary), theme.text().bold())),
        summary_area,
    );

    // Newest results stay visible when the list overflows
    let height = list_area.height as usize;
    let skip = vm.lines.len().saturating_sub(height);
    let lines: Vec<Line> = vm
        .lines
        .iter()
        .skip(skip)
        .map(|line| {
            Line::from(vec![
                Span::styled(format!(" {} ", line.icon), theme.text().fg(line.color).bold()),
                Span::styled(line.text.as_str(), theme.text()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);
}
