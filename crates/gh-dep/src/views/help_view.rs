//! Key bindings overlay

use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BINDINGS: &[(&str, &str)] = &[
    ("↑/k ↓/j", "Move cursor"),
    ("Space", "Toggle selection"),
    ("a", "Select all visible"),
    ("d", "Deselect all"),
    ("m", "Cycle mode (approve, merge, approve & merge)"),
    ("M", "Cycle merge method (squash, merge, rebase)"),
    ("D", "Toggle merge strategy (dependabot, api)"),
    ("c", "Toggle CI required"),
    ("/", "Search (Enter apply, Esc cancel)"),
    ("o", "Open PR in browser"),
    ("x", "Execute on selected PRs"),
    ("?", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;

    let panel_width = (area.width * 60 / 100).max(50).min(area.width);
    let panel_height = (BINDINGS.len() as u16 + 4).min(area.height);
    let panel_area = Rect {
        x: area.x + (area.width - panel_width) / 2,
        y: area.y + (area.height - panel_height) / 2,
        width: panel_width,
        height: panel_height,
    };

    // Dim everything behind the panel
    let overlay =
        Block::default().style(Style::default().bg(Color::Black).add_modifier(Modifier::DIM));
    f.render_widget(overlay, area);
    f.render_widget(Clear, panel_area);

    let block = Block::default()
        .title(" Key Bindings ")
        .borders(Borders::ALL)
        .border_style(theme.panel_border())
        .title_style(theme.panel_title())
        .title_alignment(Alignment::Center)
        .title_bottom(Line::from(vec![
            Span::styled(" ?/q/Esc", theme.key_hint().bold()),
            Span::styled(" close ", theme.muted()),
        ]))
        .style(Style::default().bg(theme.bg_panel));

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!(" {:<12}", keys), theme.key_hint()),
                Span::styled(*description, theme.key_description()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), panel_area);
}
