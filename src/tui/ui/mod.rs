//! UI rendering for the TUI
//!
//! Rendering is event-driven: a frame is drawn only when an event changed
//! something, not at a fixed rate. Everything shown is derived from the
//! current filters and the cache entry for them.

mod overlays;
mod table;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::editor::{active_chips, date_label, has_active_filters, selected_priorities, selected_statuses};
use crate::fetch::FetchPhase;
use crate::models::{FilterTag, PriorityTag, SortKey, StatusTag};
use crate::tui::app::{App, ModalState};
use crate::tui::theme::Theme;

use overlays::{
    render_checklist, render_chips_menu, render_date_menu, render_help_overlay,
    render_row_actions, render_search_box, render_sort_menu, render_toast,
};
use table::render_table;
use widgets::spinner;

/// Screen row of the first table row: title, filter bar, chips, top border
/// and header come before it
pub const TABLE_FIRST_ROW: u16 = 5;

/// Rows taken by everything except table rows
const CHROME_HEIGHT: u16 = 9;

/// Number of table rows visible in a terminal of `height` rows
#[must_use]
pub fn table_capacity(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_HEIGHT))
}

/// Render the entire TUI
pub fn render(app: &App, frame: &mut Frame) {
    let theme = &app.theme;
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Filter bar
        Constraint::Length(1), // Chips
        Constraint::Min(0),    // Table
        Constraint::Length(1), // Pager
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    render_title_bar(app, frame, layout[0], theme);
    render_filter_bar(app, frame, layout[1], theme);
    render_chips(app, frame, layout[2], theme);
    render_table(app, frame, layout[3], theme);
    render_pager(app, frame, layout[4], theme);
    render_status_bar(app, frame, layout[5], theme);

    match &app.modal {
        ModalState::Help => render_help_overlay(frame, area, theme),
        ModalState::Search { cursor } => render_search_box(app, *cursor, frame, area, theme),
        ModalState::Status { menu } => {
            let checked = selected_statuses(&app.filters);
            let items = StatusTag::ALL
                .iter()
                .map(|tag| (tag.label().to_string(), None, checked.contains(tag)))
                .collect();
            render_checklist(" Status ", items, menu, frame, area, theme);
        }
        ModalState::Priority { menu } => {
            let checked = selected_priorities(&app.filters);
            let items = PriorityTag::ALL
                .iter()
                .map(|tag| {
                    let icon = Span::styled(tag.icon(), Style::default().fg(theme.priority_color(*tag)));
                    (tag.label().to_string(), Some(icon), checked.contains(tag))
                })
                .collect();
            render_checklist(" Priority ", items, menu, frame, area, theme);
        }
        ModalState::Date { menu, custom } => {
            render_date_menu(app, menu, *custom, frame, area, theme);
        }
        ModalState::Sort { menu } => render_sort_menu(app, menu, frame, area, theme),
        ModalState::Chips { menu, chips } => render_chips_menu(chips, menu, frame, area, theme),
        ModalState::RowActions { menu, target } => {
            render_row_actions(target, menu, frame, area, theme);
        }
        ModalState::None => {}
    }

    if let Some(toast) = app.feedback.current_toast() {
        render_toast(toast, frame, area, theme);
    }
}

fn render_title_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans = vec![
        Span::styled(" cdnmon ", Style::default().fg(theme.header_fg).bg(theme.header_bg).bold()),
        Span::styled("  CDN Distributions", Style::default().fg(theme.fg).bold()),
    ];

    if matches!(app.phase(), FetchPhase::Loading) {
        spans.push(Span::styled(
            format!("  {} Loading...", spinner(app.spinner_frame)),
            Style::default().fg(theme.provisioning),
        ));
    } else if let Some(at) = app.last_refresh {
        let secs = at.elapsed().as_secs();
        let age = if secs < 60 {
            format!("{secs}s")
        } else {
            format!("{}m", secs / 60)
        };
        spans.push(Span::styled(
            format!("  Updated {age} ago"),
            Style::default().fg(theme.muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Search box and the four dropdown triggers with their current values
fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.fg).bold();

    let search = if app.filters.cname.is_empty() {
        Span::styled("Filter labels...", label)
    } else {
        Span::styled(app.filters.cname.clone(), value)
    };

    let statuses: Vec<&str> = selected_statuses(&app.filters)
        .iter()
        .map(FilterTag::label)
        .collect();
    let priorities: Vec<&str> = selected_priorities(&app.filters)
        .iter()
        .map(FilterTag::label)
        .collect();
    let sort = app
        .filters
        .sort_key()
        .map_or(app.filters.sort.clone(), |k: SortKey| k.label().to_string());

    let line = Line::from(vec![
        Span::styled(" / ", label),
        search,
        Span::styled("   s ", label),
        Span::styled(summarize("Status", &statuses), value),
        Span::styled("   p ", label),
        Span::styled(summarize("Priority", &priorities), value),
        Span::styled("   d ", label),
        Span::styled(date_label(&app.filters), value),
        Span::styled("   o ", label),
        Span::styled(format!("Sort: {sort}"), value),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Trigger text for a multi-select: its title, one or two labels, or a count
fn summarize(title: &str, labels: &[&str]) -> String {
    match labels.len() {
        0 => title.to_string(),
        1 | 2 => format!("{title}: {}", labels.join(", ")),
        n => format!("{title}: {n} selected"),
    }
}

fn render_chips(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chips = active_chips(&app.filters);
    if chips.is_empty() {
        return;
    }

    let chip_style = Style::default().fg(theme.chip_fg).bg(theme.chip_bg);
    let mut spans = vec![Span::raw(" ")];
    for chip in &chips {
        spans.push(Span::styled(format!(" {} ✕ ", chip.label()), chip_style));
        spans.push(Span::raw(" "));
    }
    if has_active_filters(&app.filters) {
        spans.push(Span::styled(
            " c:remove  R:reset",
            Style::default().fg(theme.muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_pager(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let pager = app.pager();
    let muted = Style::default().fg(theme.muted);
    let enabled = Style::default().fg(theme.fg).bold();
    let control = |text: &'static str, on: bool| Span::styled(text, if on { enabled } else { muted });

    let halves = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);

    let summary = Paragraph::new(Line::from(Span::styled(
        format!(" {} row(s) selected.", pager.row_summary()),
        muted,
    )));
    frame.render_widget(summary, halves[0]);

    let controls = Line::from(vec![
        Span::styled("Rows per page ", muted),
        Span::styled(format!("{}", pager.limit), enabled),
        Span::styled(" (z)   ", muted),
        Span::styled(pager.page_label(), enabled),
        Span::raw("   "),
        control("«H ", pager.can_first()),
        control("‹h ", pager.can_prev()),
        control("l› ", pager.can_next()),
        control("L» ", pager.can_last()),
    ]);
    frame.render_widget(Paragraph::new(controls).alignment(Alignment::Right), halves[1]);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    let keybinds = match &app.modal {
        ModalState::Search { .. } => " type to filter  Backspace:delete  Ctrl+u:clear  Enter/Esc:close ",
        ModalState::Date { custom: true, .. } => " Tab:next field  Enter:apply  Esc:cancel ",
        ModalState::Status { .. } | ModalState::Priority { .. } => {
            " j/k:move  Space:toggle  Esc:close "
        }
        ModalState::None => {
            " j/k:move  h/l:page  z:rows  /:search  s/p/d/o:filters  Enter:actions  r:refresh  ?:help  q:quit "
        }
        _ => " j/k:move  Enter:select  Esc:close ",
    };
    frame.render_widget(
        Paragraph::new(keybinds).style(Style::default().fg(theme.border)),
        layout[0],
    );

    let mut status_parts = vec![Span::styled(
        format!(" {}", app.filters),
        Style::default().fg(theme.muted),
    )];

    // Config warnings stay until fixed
    if let Some(first) = app.feedback.config_warnings.first() {
        let more = app.feedback.config_warnings.len() - 1;
        let text = if more == 0 {
            format!(" | WARN: {first}")
        } else {
            format!(" | WARN: {first} (+{more} more)")
        };
        status_parts.push(Span::styled(text, Style::default().fg(theme.suspended)));
    }

    frame.render_widget(Paragraph::new(Line::from(status_parts)), layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::QueryCache;
    use crate::models::{FilterState, PageResponse};
    use crate::tui::event::DataEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(
            FilterState::default(),
            QueryCache::default(),
            Theme::dark(),
            Vec::new(),
        )
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize("Status", &[]), "Status");
        assert_eq!(summarize("Status", &["Active"]), "Status: Active");
        assert_eq!(
            summarize("Status", &["Active", "Suspended", "Inactive"]),
            "Status: 3 selected"
        );
    }

    #[test]
    fn test_table_capacity() {
        assert_eq!(table_capacity(30), 21);
        assert_eq!(table_capacity(4), 0);
    }

    #[test]
    fn test_render_states() {
        let mut app = app();
        let loading = screen(&app);
        assert!(loading.contains("Loading..."));
        assert!(loading.contains("0 of 0 row(s) selected."));
        assert!(loading.contains("Created At"));

        let ticket = app.take_pending().remove(0);
        app.handle_data(DataEvent::PageLoaded {
            ticket,
            result: Err("server responded with 500".to_string()),
        });
        let failed = screen(&app);
        assert!(failed.contains(table::ERROR_MESSAGE));
        assert!(!failed.contains("500"));
    }

    #[test]
    fn test_render_empty_page() {
        let mut app = app();
        let ticket = app.take_pending().remove(0);
        app.handle_data(DataEvent::PageLoaded {
            ticket,
            result: Ok(PageResponse::default()),
        });
        assert!(screen(&app).contains(table::EMPTY_MESSAGE));
    }
}
