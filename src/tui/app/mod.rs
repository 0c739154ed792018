//! Application state and core logic for the TUI
//!
//! `App` owns the canonical filters and the page cache. Every edit goes
//! through [`App::set_filters`], which swaps the filters wholesale and queues
//! a fetch when the new key has nothing usable cached. The event loop drains
//! queued fetches with [`App::take_pending`].

mod state;

pub use state::{FeedbackState, ListState, MenuState, ModalState, Toast};

use std::time::Instant;

use chrono::Local;
use tracing::{debug, warn};

use crate::actions::{ActionDispatcher, ActionOutcome, RowAction};
use crate::editor::{
    self, Chip, DateControl, DatePreset, active_chips, next_page_size, remove_chip,
    selected_priorities, selected_statuses, set_limit, set_page, set_search, set_sort,
    toggle_priority, toggle_status,
};
use crate::fetch::{FetchPhase, FetchTicket, QueryCache};
use crate::models::{Config, Distribution, FilterState, FilterTag, PriorityTag, SortKey, StatusTag};
use crate::pagination::Pager;
use crate::tui::event::{DataEvent, EventResult, InputEvent, KeyAction};
use crate::tui::theme::Theme;
use crate::tui::ui::{TABLE_FIRST_ROW, table_capacity};

/// Main application state
pub struct App {
    pub running: bool,

    pub modal: ModalState,

    /// The one current filter state; also the key of the page on screen
    pub filters: FilterState,
    pub cache: QueryCache,
    pub date_control: DateControl,

    pub list_state: ListState,
    pub feedback: FeedbackState,
    pub theme: Theme,

    pub last_refresh: Option<Instant>,
    pub spinner_frame: usize,

    actions: ActionDispatcher,
    pending: Vec<FetchTicket>,
}

impl App {
    /// Create the app and queue the fetch for `filters`
    pub fn new(
        filters: FilterState,
        cache: QueryCache,
        theme: Theme,
        config_warnings: Vec<String>,
    ) -> Self {
        let mut app = Self {
            running: true,
            modal: ModalState::None,
            filters,
            cache,
            date_control: DateControl::default(),
            list_state: ListState::default(),
            feedback: FeedbackState::new(config_warnings),
            theme,
            last_refresh: None,
            spinner_frame: 0,
            actions: ActionDispatcher::default(),
            pending: Vec::new(),
        };
        app.request_current();
        app
    }

    pub fn from_config(config: &Config, config_warnings: Vec<String>) -> Self {
        Self::new(
            FilterState::with_defaults(config.display.default_limit, &config.display.default_sort),
            QueryCache::new(config.cache.max_entries),
            Theme::from_name(&config.display.theme),
            config_warnings,
        )
    }

    /// Replace the row action handlers
    pub fn with_actions(mut self, actions: ActionDispatcher) -> Self {
        self.actions = actions;
        self
    }

    fn request_current(&mut self) {
        if let Some(ticket) = self.cache.request(&self.filters) {
            self.pending.push(ticket);
        }
    }

    /// Swap in a new filter state and fetch it if needed
    pub fn set_filters(&mut self, next: FilterState) {
        if next != self.filters {
            debug!(filters = %next, "filters changed");
            self.list_state.move_to_top();
        }
        self.filters = next;
        self.date_control.sync(&self.filters);
        self.request_current();
    }

    /// Number of table rows that fit on screen
    pub fn set_viewport(&mut self, visible_rows: usize) {
        self.list_state.visible_count = visible_rows;
        let len = self.rows().len();
        self.list_state.clamp(len);
    }

    /// Fetches queued since the last call
    pub fn take_pending(&mut self) -> Vec<FetchTicket> {
        std::mem::take(&mut self.pending)
    }

    /// Fetch phase of the current filters
    #[must_use]
    pub fn phase(&self) -> FetchPhase<'_> {
        self.cache.phase(&self.filters)
    }

    /// Rows of the current page; empty unless it has loaded
    #[must_use]
    pub fn rows(&self) -> &[Distribution] {
        match self.phase() {
            FetchPhase::Success(page) => &page.data,
            FetchPhase::Loading | FetchPhase::Error(_) => &[],
        }
    }

    #[must_use]
    pub fn pager(&self) -> Pager {
        let meta = match self.phase() {
            FetchPhase::Success(page) => page.pagination(),
            FetchPhase::Loading | FetchPhase::Error(_) => None,
        };
        Pager::new(&self.filters, meta)
    }

    #[must_use]
    pub fn selected_distribution(&self) -> Option<&Distribution> {
        self.rows().get(self.list_state.selected)
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                let action = KeyAction::from_key_event(key_event, self.modal.is_text_input());
                self.handle_action(action)
            }
            InputEvent::Resize(_, height) => {
                self.set_viewport(table_capacity(height));
                EventResult::Continue
            }
            InputEvent::Mouse(mouse_event) => {
                let action = KeyAction::from_mouse_event(mouse_event);
                self.handle_action(action)
            }
        }
    }

    fn handle_action(&mut self, action: KeyAction) -> EventResult {
        if action == KeyAction::Quit && !self.modal.is_active() {
            self.running = false;
            return EventResult::Quit;
        }

        match self.modal {
            ModalState::Help => return self.handle_help_action(action),
            ModalState::Search { .. } => return self.handle_search_action(action),
            ModalState::Status { .. } | ModalState::Priority { .. } => {
                return self.handle_checklist_action(action);
            }
            ModalState::Date { custom: false, .. } => return self.handle_date_action(action),
            ModalState::Date { custom: true, .. } => return self.handle_range_action(action),
            ModalState::Sort { .. } => return self.handle_sort_action(action),
            ModalState::Chips { .. } => return self.handle_chips_action(action),
            ModalState::RowActions { .. } => return self.handle_row_action(action),
            ModalState::None => {}
        }

        if let Some(result) = self.handle_navigation(&action) {
            return result;
        }

        if let Some(result) = self.handle_pagination(&action) {
            return result;
        }

        match action {
            KeyAction::OpenSearch => {
                self.modal = ModalState::Search {
                    cursor: self.filters.cname.len(),
                };
            }
            KeyAction::OpenStatus => {
                self.modal = ModalState::Status {
                    menu: MenuState::new(StatusTag::ALL.len()),
                };
            }
            KeyAction::OpenPriority => {
                self.modal = ModalState::Priority {
                    menu: MenuState::new(PriorityTag::ALL.len()),
                };
            }
            KeyAction::OpenDate => {
                let current = DatePreset::ALL
                    .iter()
                    .position(|p| *p == self.date_control.preset)
                    .unwrap_or(0);
                self.modal = ModalState::Date {
                    menu: MenuState::at(DatePreset::ALL.len(), current),
                    custom: false,
                };
            }
            KeyAction::OpenSort => {
                let current = SortKey::ALL
                    .iter()
                    .position(|k| k.token() == self.filters.sort)
                    .unwrap_or(0);
                self.modal = ModalState::Sort {
                    menu: MenuState::at(SortKey::ALL.len(), current),
                };
            }
            KeyAction::OpenChips => {
                let chips = active_chips(&self.filters);
                if chips.is_empty() {
                    self.feedback
                        .set_toast(Toast::failure("No active filters".to_string()));
                } else {
                    self.modal = ModalState::Chips {
                        menu: MenuState::new(chips.len()),
                        chips,
                    };
                }
            }
            KeyAction::ResetFilters => {
                self.date_control = DateControl::default();
                self.set_filters(editor::reset(&self.filters));
            }
            KeyAction::Select => {
                if let Some(target) = self.selected_distribution() {
                    self.modal = ModalState::RowActions {
                        menu: MenuState::new(RowAction::ALL.len()),
                        target: Box::new(target.clone()),
                    };
                }
            }
            KeyAction::Refresh => {
                let ticket = self.cache.refresh(&self.filters);
                self.pending.push(ticket);
            }
            KeyAction::YankDomain => self.yank_selected_domain(),
            KeyAction::ShowHelp => self.modal = ModalState::Help,
            KeyAction::MouseClick { row, column: _ } => self.handle_mouse_click(row),
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    /// Row navigation (returns Some if handled)
    fn handle_navigation(&mut self, action: &KeyAction) -> Option<EventResult> {
        let len = self.rows().len();
        match action {
            KeyAction::MoveUp | KeyAction::MouseScrollUp => self.list_state.move_up(len),
            KeyAction::MoveDown | KeyAction::MouseScrollDown => self.list_state.move_down(len),
            KeyAction::MoveToTop => self.list_state.move_to_top(),
            KeyAction::MoveToBottom => self.list_state.move_to_bottom(len),
            KeyAction::PageUp => self.list_state.page_up(len),
            KeyAction::PageDown => self.list_state.page_down(len),
            _ => return None,
        }
        Some(EventResult::Continue)
    }

    /// Pager controls; disabled controls do nothing
    fn handle_pagination(&mut self, action: &KeyAction) -> Option<EventResult> {
        let pager = self.pager();
        let target = match action {
            KeyAction::FirstPage => pager.can_first().then_some(1),
            KeyAction::PrevPage => pager.can_prev().then(|| pager.page - 1),
            KeyAction::NextPage => pager.can_next().then(|| pager.page + 1),
            KeyAction::LastPage => pager.can_last().then(|| pager.last_page()),
            KeyAction::CyclePageSize => {
                let next = set_limit(&self.filters, next_page_size(self.filters.limit));
                self.set_filters(next);
                return Some(EventResult::Continue);
            }
            _ => return None,
        };

        Some(match target {
            Some(page) => {
                self.set_filters(set_page(&self.filters, page));
                EventResult::Continue
            }
            None => EventResult::Unchanged,
        })
    }

    fn handle_mouse_click(&mut self, row: u16) {
        if row < TABLE_FIRST_ROW {
            return;
        }
        let target = self.list_state.scroll_offset + usize::from(row - TABLE_FIRST_ROW);
        if target < self.rows().len() {
            self.list_state.selected = target;
        }
    }

    fn handle_help_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Search box: every edit is committed immediately
    fn handle_search_action(&mut self, action: KeyAction) -> EventResult {
        let ModalState::Search { cursor } = self.modal else {
            return EventResult::Unchanged;
        };
        let mut text = self.filters.cname.clone();
        let cursor = cursor.min(text.len());

        let new_cursor = match action {
            KeyAction::Escape | KeyAction::Select => {
                self.modal = ModalState::None;
                return EventResult::Continue;
            }
            KeyAction::Quit => {
                self.running = false;
                return EventResult::Quit;
            }
            KeyAction::InputChar(c) => {
                text.insert(cursor, c);
                cursor + c.len_utf8()
            }
            KeyAction::InputBackspace => match text[..cursor].chars().next_back() {
                Some(prev) => {
                    let at = cursor - prev.len_utf8();
                    text.remove(at);
                    at
                }
                None => return EventResult::Unchanged,
            },
            KeyAction::InputClear => {
                text.clear();
                0
            }
            _ => return EventResult::Unchanged,
        };

        self.modal = ModalState::Search { cursor: new_cursor };
        self.set_filters(set_search(&self.filters, &text));
        EventResult::Continue
    }

    /// Status and priority checklists share one handler
    fn handle_checklist_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Quit => {
                self.modal = ModalState::None;
            }
            KeyAction::MoveUp | KeyAction::MoveDown => self.move_menu(action),
            KeyAction::Select | KeyAction::Toggle => {
                let next = match &self.modal {
                    ModalState::Status { menu } => {
                        let tag = StatusTag::ALL[menu.selected];
                        let checked = !selected_statuses(&self.filters).contains(&tag);
                        toggle_status(&self.filters, tag, checked)
                    }
                    ModalState::Priority { menu } => {
                        let tag = PriorityTag::ALL[menu.selected];
                        let checked = !selected_priorities(&self.filters).contains(&tag);
                        toggle_priority(&self.filters, tag, checked)
                    }
                    _ => return EventResult::Unchanged,
                };
                self.set_filters(next);
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn handle_date_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Quit => {
                self.modal = ModalState::None;
            }
            KeyAction::MoveUp | KeyAction::MoveDown => self.move_menu(action),
            KeyAction::Select | KeyAction::Toggle => {
                let Some(menu) = self.modal.menu().copied() else {
                    return EventResult::Unchanged;
                };
                let preset = DatePreset::ALL[menu.selected];
                match self
                    .date_control
                    .select_preset(&self.filters, preset, &Local::now())
                {
                    Some(next) => {
                        self.modal = ModalState::None;
                        self.set_filters(next);
                    }
                    None => {
                        self.modal = ModalState::Date { menu, custom: true };
                    }
                }
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    /// Manual range form; nothing reaches the filters until Enter
    fn handle_range_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape => {
                self.date_control.cancel_custom();
                self.modal = ModalState::None;
            }
            KeyAction::Quit => {
                self.running = false;
                return EventResult::Quit;
            }
            KeyAction::InputChar(c) => self.date_control.push_char(c),
            KeyAction::InputBackspace => self.date_control.pop_char(),
            KeyAction::InputClear => {
                while !self.date_control.input(self.date_control.field).is_empty() {
                    self.date_control.pop_char();
                }
            }
            KeyAction::NextField => self.date_control.next_field(),
            KeyAction::Select => match self.date_control.apply_custom(&self.filters, &Local) {
                Ok(next) => {
                    self.modal = ModalState::None;
                    self.set_filters(next);
                }
                Err(e) => self.feedback.set_toast(Toast::failure(e.to_string())),
            },
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn handle_sort_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Quit => {
                self.modal = ModalState::None;
            }
            KeyAction::MoveUp | KeyAction::MoveDown => self.move_menu(action),
            KeyAction::Select | KeyAction::Toggle => {
                if let Some(menu) = self.modal.menu() {
                    let key = SortKey::ALL[menu.selected];
                    self.modal = ModalState::None;
                    self.set_filters(set_sort(&self.filters, key));
                }
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn handle_chips_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Quit => {
                self.modal = ModalState::None;
            }
            KeyAction::MoveUp | KeyAction::MoveDown => self.move_menu(action),
            KeyAction::Select | KeyAction::Toggle => {
                let chip = match &self.modal {
                    ModalState::Chips { menu, chips } => chips.get(menu.selected).cloned(),
                    _ => None,
                };
                let Some(chip) = chip else {
                    return EventResult::Unchanged;
                };
                if matches!(chip, Chip::DateRange { .. }) {
                    self.date_control.preset = DatePreset::All;
                }
                self.set_filters(remove_chip(&self.filters, &chip));

                let remaining = active_chips(&self.filters);
                if remaining.is_empty() {
                    self.modal = ModalState::None;
                } else if let ModalState::Chips { menu, chips } = &mut self.modal {
                    menu.set_len(remaining.len());
                    *chips = remaining;
                }
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn handle_row_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Quit => {
                self.modal = ModalState::None;
            }
            KeyAction::MoveUp | KeyAction::MoveDown => self.move_menu(action),
            KeyAction::Select => {
                if let ModalState::RowActions { menu, target } = std::mem::take(&mut self.modal) {
                    let outcome = self.actions.dispatch(RowAction::ALL[menu.selected], &target);
                    self.feedback.set_toast(match outcome {
                        ActionOutcome::Done(msg) => Toast::success(msg),
                        ActionOutcome::Unavailable(msg) => Toast::failure(msg),
                    });
                }
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn move_menu(&mut self, action: KeyAction) {
        if let Some(menu) = self.modal.menu_mut() {
            match action {
                KeyAction::MoveUp => menu.move_up(),
                KeyAction::MoveDown => menu.move_down(),
                _ => {}
            }
        }
    }

    fn yank_selected_domain(&mut self) {
        let Some(domain) = self.selected_distribution().map(|d| d.domain.clone()) else {
            return;
        };
        let result =
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(domain.clone()));
        self.feedback.set_toast(match result {
            Ok(()) => Toast::success(format!("Copied: {domain}")),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                Toast::failure("Failed to copy (no clipboard)".to_string())
            }
        });
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::PageLoaded { ticket, result } => {
                if let Err(e) = &result {
                    warn!(filters = %ticket.key, error = %e, "failed to load distributions");
                }
                let is_current = ticket.key == self.filters;
                if !self.cache.complete(&ticket, result, &self.filters) || !is_current {
                    return EventResult::Unchanged;
                }
                self.last_refresh = Some(Instant::now());
                let len = self.rows().len();
                self.list_state.clamp(len);
                EventResult::Continue
            }
            DataEvent::AnimationTick => {
                if matches!(self.phase(), FetchPhase::Loading) {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
        }
    }
}
