//! PR list view: settings header, PR table and key hints

use crate::state::AppState;
use crate::theme::Theme;
use crate::view_models::pr_list_view_model::PrRow;
use crate::view_models::PrListViewModel;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let [header_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    // Table block borders plus the column header row
    let rows_height = table_area.height.saturating_sub(3) as usize;
    let vm = PrListViewModel::from_state(state, rows_height);

    render_header(&vm, theme, header_area, f);
    render_table(&vm, theme, table_area, f);
    render_footer(&vm, theme, footer_area, f);
}

fn render_header(vm: &PrListViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let checks = if vm.require_checks { "on" } else { "off" };
    let settings = Line::from(vec![
        Span::styled(" Mode: ", theme.muted()),
        Span::styled(vm.mode, theme.text().bold()),
        Span::styled("  Method: ", theme.muted()),
        Span::styled(vm.merge_method.clone(), theme.text().bold()),
        Span::styled("  Strategy: ", theme.muted()),
        Span::styled(vm.merge_strategy, theme.text().bold()),
        Span::styled("  CI required: ", theme.muted()),
        Span::styled(
            checks,
            if vm.require_checks {
                theme.success()
            } else {
                theme.muted()
            },
        ),
    ]);

    let status = Line::from(
        vm.status
            .iter()
            .map(|(text, style)| Span::styled(text.as_str(), *style))
            .collect::<Vec<_>>(),
    );

    let block = Block::default()
        .title(" gh-dep ")
        .borders(Borders::ALL)
        .border_style(theme.panel_border())
        .title_style(theme.panel_title());
    f.render_widget(Paragraph::new(vec![settings, status]).block(block), area);
}

fn render_table(vm: &PrListViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted());

    if vm.rows.is_empty() {
        let message = Paragraph::new(Span::styled(format!(" {}", vm.empty_message), theme.muted()))
            .block(block);
        f.render_widget(message, area);
        return;
    }

    let header = Row::new(vec!["", "CI", "Repository", "#", "Title"]).style(theme.table_header());
    let rows: Vec<Row> = vm.rows.iter().map(|row| table_row(row, theme)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(25),
            Constraint::Length(7),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

fn table_row<'a>(row: &'a PrRow, theme: &Theme) -> Row<'a> {
    let style = if row.is_cursor {
        theme.table_selected()
    } else if row.is_selected {
        theme.table_row().fg(theme.marked_fg)
    } else {
        theme.table_row()
    };

    Row::new(vec![
        Cell::from(row.marker),
        Cell::from(Span::styled(row.ci_icon, theme.text().fg(row.ci_color))),
        Cell::from(row.repo.as_str()),
        Cell::from(row.number.as_str()),
        Cell::from(row.title.as_str()),
    ])
    .style(style)
}

fn render_footer(vm: &PrListViewModel, theme: &Theme, area: Rect, f: &mut Frame) {
    let hints: &[(&str, &str)] = if vm.search_input.is_some() {
        &[("Enter", "apply"), ("Esc", "cancel")]
    } else {
        &[
            ("Space", "select"),
            ("a/d", "all/none"),
            ("m", "mode"),
            ("x", "execute"),
            ("/", "search"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(format!(" {}", key), theme.key_hint()),
                Span::styled(format!(" {} ", description), theme.key_description()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
