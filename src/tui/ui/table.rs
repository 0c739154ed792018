//! Distributions table: rows, skeleton, empty and error states

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::fetch::FetchPhase;
use crate::formatting::{date_and_time, layout, truncate_string};
use crate::models::Distribution;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::create_table_header;

pub const EMPTY_MESSAGE: &str = "No distributions found.";
pub const ERROR_MESSAGE: &str = "Failed to load distributions. Please try again.";

const COLUMNS: [&str; 6] = ["Label", "Domain", "Status", "Date Modified", "Time", ""];

fn widths() -> [Constraint; 6] {
    [
        Constraint::Min(16),    // Label
        Constraint::Min(24),    // Domain
        Constraint::Length(14), // Status
        Constraint::Length(14), // Date Modified
        Constraint::Length(9),  // Time
        Constraint::Length(3),  // Actions
    ]
}

pub fn render_table(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Distributions ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.phase() {
        FetchPhase::Loading => render_skeleton(app, frame, inner, theme),
        FetchPhase::Error(_) => render_message(frame, inner, ERROR_MESSAGE, theme.error),
        FetchPhase::Success(page) if page.data.is_empty() => {
            render_message(frame, inner, EMPTY_MESSAGE, theme.muted);
        }
        FetchPhase::Success(page) => render_rows(app, &page.data, frame, inner, theme),
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let para = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// One placeholder row per expected result
fn render_skeleton(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let bar = |width: usize| Cell::from("░".repeat(width));
    let rows: Vec<Row> = (0..app.filters.limit)
        .map(|_| {
            Row::new(vec![
                bar(14),
                bar(22),
                bar(8),
                bar(12),
                bar(7),
                Cell::from(""),
            ])
            .style(Style::default().fg(theme.skeleton))
        })
        .collect();

    let table = Table::new(rows, widths()).header(create_table_header(&COLUMNS, theme));
    frame.render_widget(table, area);
}

fn render_rows(
    app: &App,
    rows: &[Distribution],
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let available_height = area.height.saturating_sub(1) as usize;
    let selected = app.list_state.selected;

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(app.list_state.scroll_offset)
        .take(available_height)
        .map(|(idx, d)| distribution_to_row(d, idx == selected, theme))
        .collect();

    let table = Table::new(table_rows, widths()).header(create_table_header(&COLUMNS, theme));
    frame.render_widget(table, area);
}

fn distribution_to_row<'a>(d: &Distribution, is_selected: bool, theme: &Theme) -> Row<'a> {
    let (date, time) = date_and_time(&d.updated_at);
    let status_color = theme.status_color(&d.status);

    let row = Row::new(vec![
        Cell::from(truncate_string(&d.name, layout::NAME_WIDTH)).style(Style::default().bold()),
        Cell::from(truncate_string(&d.domain, layout::DOMAIN_WIDTH)),
        Cell::from(format!(" {} ", d.status.label()))
            .style(Style::default().fg(status_color).add_modifier(Modifier::REVERSED)),
        Cell::from(date),
        Cell::from(time),
        Cell::from("⋯"),
    ]);

    if is_selected {
        row.style(Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
    } else {
        row.style(Style::default().fg(theme.fg))
    }
}
