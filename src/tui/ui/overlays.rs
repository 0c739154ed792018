//! Overlay and popup rendering
//!
//! Help, search box, filter dropdowns, sort and chip menus, row actions and
//! the toast notification.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::actions::RowAction;
use crate::editor::{Chip, DatePreset, RangeField};
use crate::models::{Distribution, SortKey};
use crate::tui::app::{App, MenuState, Toast};
use crate::tui::theme::Theme;

use super::widgets::{centered_fixed, centered_rect, hint_line, menu_line, popup};

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(65, 80, area);
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(theme.border_focused).bold(),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "cdnmon - Keyboard Shortcuts",
            Style::default().bold(),
        )),
        Line::from(""),
        heading("Rows"),
        Line::from("  j / Down       Move selection down"),
        Line::from("  k / Up         Move selection up"),
        Line::from("  g / G          Jump to top / bottom"),
        Line::from("  Ctrl+d / PgDn  Half page down"),
        Line::from("  Ctrl+u / PgUp  Half page up"),
        Line::from("  Enter          Row actions"),
        Line::from("  y              Copy domain to clipboard"),
        Line::from(""),
        heading("Pages"),
        Line::from("  h / l          Previous / next page"),
        Line::from("  H / L          First / last page"),
        Line::from("  z              Cycle rows per page (10, 20, 50)"),
        Line::from(""),
        heading("Filters"),
        Line::from("  /              Search by name"),
        Line::from("  s / p          Status / priority"),
        Line::from("  d              Created date range"),
        Line::from("  o              Sort order"),
        Line::from("  c              Remove a filter chip"),
        Line::from("  R              Reset all filters"),
        Line::from(""),
        heading("General"),
        Line::from("  r / F5         Refresh current page"),
        Line::from("  ? / F1         Show this help"),
        Line::from("  Esc            Close overlay"),
        Line::from("  q              Quit"),
        Line::from(""),
        hint_line("Press ? or Esc to close this help", theme),
    ];

    frame.render_widget(Clear, popup_area);
    let help_para = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Help "),
        )
        .style(Style::default().fg(theme.fg));

    frame.render_widget(help_para, popup_area);
}

/// Search box anchored under the filter bar
pub fn render_search_box(app: &App, cursor: usize, frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2).min(50),
        height: 3,
    };
    let inner = popup(frame, popup_area, "Search by name", theme);

    let text = &app.filters.cname;
    let para = Paragraph::new(format!("/{text}")).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);

    let column = text[..cursor.min(text.len())].chars().count() as u16;
    frame.set_cursor_position((inner.x + 1 + column, inner.y));
}

/// Multi-select dropdown; `items` are (label, icon, checked)
pub fn render_checklist(
    title: &str,
    items: Vec<(String, Option<Span<'static>>, bool)>,
    menu: &MenuState,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let height = items.len() as u16 + 5;
    let inner = popup(frame, centered_fixed(32, height, area), title.trim(), theme);

    let mut lines = vec![Line::from("")];
    for (i, (label, icon, checked)) in items.into_iter().enumerate() {
        let mut spans = vec![Span::raw(if checked { "[x] " } else { "[ ] " })];
        if let Some(icon) = icon {
            spans.push(icon);
            spans.push(Span::raw(" "));
        }
        spans.push(Span::raw(label));
        lines.push(menu_line(menu, i, spans, theme));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("[Space] Toggle  [Esc] Close", theme));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);
}

pub fn render_date_menu(
    app: &App,
    menu: &MenuState,
    custom: bool,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    if custom {
        render_range_form(app, frame, area, theme);
        return;
    }

    let height = DatePreset::ALL.len() as u16 + 5;
    let inner = popup(frame, centered_fixed(34, height, area), "Created At", theme);

    let mut lines = vec![Line::from("")];
    for (i, preset) in DatePreset::ALL.iter().enumerate() {
        let mark = if *preset == app.date_control.preset {
            "(•) "
        } else {
            "( ) "
        };
        lines.push(menu_line(
            menu,
            i,
            vec![Span::raw(mark), Span::raw(preset.label())],
            theme,
        ));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("[Enter] Select  [Esc] Close", theme));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);
}

/// Custom range form; the draft is parsed on every frame to show problems
/// before Apply
fn render_range_form(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let control = &app.date_control;
    let inner = popup(frame, centered_fixed(46, 11, area), "Custom range", theme);

    let mut lines = vec![Line::from("")];
    let mut cursor = None;
    for (row, field) in RangeField::ALL.iter().enumerate() {
        let focused = *field == control.field;
        let value = control.input(*field);
        let placeholder = match field {
            RangeField::From | RangeField::To => "YYYY-MM-DD",
            RangeField::Start | RangeField::End => "HH:MM",
        };

        let label = format!("  {:<11} ", field.label());
        let value_span = if value.is_empty() {
            Span::styled(placeholder, Style::default().fg(theme.muted))
        } else {
            Span::raw(value.to_string())
        };
        let label_style = if focused {
            Style::default().fg(theme.border_focused).bold()
        } else {
            Style::default().fg(theme.muted)
        };
        if focused {
            cursor = Some((
                inner.x + label.chars().count() as u16 + value.chars().count() as u16,
                inner.y + 1 + row as u16,
            ));
        }
        lines.push(Line::from(vec![Span::styled(label, label_style), value_span]));
    }

    lines.push(Line::from(""));
    match control.draft() {
        Ok(_) => lines.push(Line::from("")),
        Err(e) => lines.push(Line::from(Span::styled(
            format!("  {e}"),
            Style::default().fg(theme.error),
        ))),
    }
    lines.push(hint_line("[Tab] Next field  [Enter] Apply  [Esc] Cancel", theme));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

pub fn render_sort_menu(app: &App, menu: &MenuState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let height = SortKey::ALL.len() as u16 + 5;
    let inner = popup(frame, centered_fixed(34, height, area), "Sort By", theme);

    let current = app.filters.sort_key();
    let mut lines = vec![Line::from("")];
    for (i, key) in SortKey::ALL.iter().enumerate() {
        let mut spans = vec![Span::raw(key.label())];
        if current == Some(*key) {
            spans.push(Span::styled(" *", Style::default().fg(theme.border_focused)));
        }
        lines.push(menu_line(menu, i, spans, theme));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("[Enter] Select  [Esc] Cancel", theme));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);
}

pub fn render_chips_menu(
    chips: &[Chip],
    menu: &MenuState,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let height = chips.len() as u16 + 5;
    let inner = popup(frame, centered_fixed(40, height, area), "Active filters", theme);

    let mut lines = vec![Line::from("")];
    for (i, chip) in chips.iter().enumerate() {
        lines.push(menu_line(
            menu,
            i,
            vec![Span::styled(
                format!(" {} ", chip.label()),
                Style::default().fg(theme.chip_fg).bg(theme.chip_bg),
            )],
            theme,
        ));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("[Enter] Remove  [Esc] Close", theme));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);
}

pub fn render_row_actions(
    target: &Distribution,
    menu: &MenuState,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let height = RowAction::ALL.len() as u16 + 5;
    let inner = popup(frame, centered_fixed(36, height, area), &target.name, theme);

    let mut lines = vec![Line::from("")];
    for (i, action) in RowAction::ALL.iter().enumerate() {
        let style = if action.is_destructive() {
            Style::default().fg(theme.destructive)
        } else {
            Style::default()
        };
        lines.push(menu_line(
            menu,
            i,
            vec![Span::styled(action.label(), style)],
            theme,
        ));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("[Enter] Run  [Esc] Close", theme));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);
}

/// Toast at the bottom-right corner
pub fn render_toast(toast: &Toast, frame: &mut Frame, area: Rect, theme: &Theme) {
    let toast_width = (toast.message.chars().count() + 4).min(60) as u16;
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(5),
        width: toast_width.min(area.width),
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, toast_area);

    let border_color = if toast.success {
        theme.active
    } else {
        theme.error
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let para = Paragraph::new(format!(" {} ", toast.message))
        .block(block)
        .style(Style::default().fg(theme.fg))
        .alignment(Alignment::Center);

    frame.render_widget(para, toast_area);
}
