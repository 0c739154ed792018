//! Application state types for the TUI
//!
//! - Modal states (help, search, checklists, date, sort, chips, row actions)
//! - Menu cursor and table selection state
//! - Feedback state for toasts and config warnings

use std::time::{Duration, Instant};

use crate::editor::Chip;
use crate::models::Distribution;

// ============================================================================
// Menus
// ============================================================================

/// Cursor over a fixed-length option list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub selected: usize,
    pub len: usize,
}

impl MenuState {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Start on `index`, clamped to the list
    #[must_use]
    pub fn at(len: usize, index: usize) -> Self {
        Self {
            selected: index.min(len.saturating_sub(1)),
            len,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected < self.len.saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Shrink after an item was removed
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// Short-lived status bar message (clipboard, row actions, date errors)
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub success: bool,
    pub timestamp: Instant,
}

impl Toast {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            timestamp: Instant::now(),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            timestamp: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.timestamp.elapsed() < Duration::from_secs(3)
    }
}

// ============================================================================
// Table Selection
// ============================================================================

/// Selected row and scroll window of the table
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub visible_count: usize,
}

impl ListState {
    pub fn clamp(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
            return;
        }
        self.selected = self.selected.min(list_len - 1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.visible_count > 0 && self.selected >= self.scroll_offset + self.visible_count
        {
            self.scroll_offset = self.selected + 1 - self.visible_count;
        }
    }

    pub fn move_up(&mut self, list_len: usize) {
        self.selected = self.selected.saturating_sub(1);
        self.clamp(list_len);
    }

    pub fn move_down(&mut self, list_len: usize) {
        if self.selected + 1 < list_len {
            self.selected += 1;
        }
        self.clamp(list_len);
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        self.selected = list_len.saturating_sub(1);
        self.clamp(list_len);
    }

    pub fn page_up(&mut self, list_len: usize) {
        self.selected = self.selected.saturating_sub(self.half_page());
        self.clamp(list_len);
    }

    pub fn page_down(&mut self, list_len: usize) {
        self.selected = self.selected.saturating_add(self.half_page());
        self.clamp(list_len);
    }

    fn half_page(&self) -> usize {
        (self.visible_count / 2).max(1)
    }
}

// ============================================================================
// Modal State
// ============================================================================

/// At most one overlay is open at a time.
///
/// Checklists and the sort menu carry only their cursor; which entries are
/// checked is read from the filters on every render.
#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    /// Name search; each keystroke is committed to the filters
    Search {
        cursor: usize,
    },
    Status {
        menu: MenuState,
    },
    Priority {
        menu: MenuState,
    },
    /// Date presets; `custom` switches to the manual range form
    Date {
        menu: MenuState,
        custom: bool,
    },
    Sort {
        menu: MenuState,
    },
    Chips {
        menu: MenuState,
        chips: Vec<Chip>,
    },
    RowActions {
        menu: MenuState,
        target: Box<Distribution>,
    },
}

impl ModalState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, ModalState::None)
    }

    /// Keys go to a text field rather than to shortcuts
    #[must_use]
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            ModalState::Search { .. } | ModalState::Date { custom: true, .. }
        )
    }

    /// Cursor of the open menu, if the modal has one
    #[must_use]
    pub fn menu(&self) -> Option<&MenuState> {
        match self {
            ModalState::Status { menu }
            | ModalState::Priority { menu }
            | ModalState::Date { menu, .. }
            | ModalState::Sort { menu }
            | ModalState::Chips { menu, .. }
            | ModalState::RowActions { menu, .. } => Some(menu),
            ModalState::None | ModalState::Help | ModalState::Search { .. } => None,
        }
    }

    pub fn menu_mut(&mut self) -> Option<&mut MenuState> {
        match self {
            ModalState::Status { menu }
            | ModalState::Priority { menu }
            | ModalState::Date { menu, .. }
            | ModalState::Sort { menu }
            | ModalState::Chips { menu, .. }
            | ModalState::RowActions { menu, .. } => Some(menu),
            ModalState::None | ModalState::Help | ModalState::Search { .. } => None,
        }
    }
}

// ============================================================================
// Feedback State
// ============================================================================

/// Toasts and config warnings shown over the status bar
#[derive(Debug)]
pub struct FeedbackState {
    pub config_warnings: Vec<String>,
    toast: Option<Toast>,
}

impl FeedbackState {
    pub fn new(config_warnings: Vec<String>) -> Self {
        Self {
            config_warnings,
            toast: None,
        }
    }

    pub fn set_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    #[must_use]
    pub fn current_toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListState {
            visible_count: 3,
            ..ListState::default()
        };

        state.move_down(5);
        assert_eq!(state.selected, 1);

        state.move_to_bottom(5);
        assert_eq!(state.selected, 4);
        assert_eq!(state.scroll_offset, 2);

        state.move_to_top();
        assert_eq!((state.selected, state.scroll_offset), (0, 0));

        state.move_up(5);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_list_state_clamps_to_shorter_page() {
        let mut state = ListState {
            selected: 9,
            scroll_offset: 5,
            visible_count: 5,
        };
        state.clamp(3);
        assert_eq!(state.selected, 2);
        assert_eq!(state.scroll_offset, 2);

        state.clamp(0);
        assert_eq!((state.selected, state.scroll_offset), (0, 0));
    }

    #[test]
    fn test_menu_state_bounds() {
        let mut menu = MenuState::new(3);
        menu.move_up();
        assert_eq!(menu.selected, 0);
        menu.move_down();
        menu.move_down();
        menu.move_down();
        assert_eq!(menu.selected, 2);

        menu.set_len(1);
        assert_eq!(menu.selected, 0);

        assert_eq!(MenuState::at(6, 10).selected, 5);
    }

    #[test]
    fn test_text_input_modes() {
        assert!(ModalState::Search { cursor: 0 }.is_text_input());
        assert!(
            ModalState::Date {
                menu: MenuState::new(7),
                custom: true
            }
            .is_text_input()
        );
        assert!(
            !ModalState::Date {
                menu: MenuState::new(7),
                custom: false
            }
            .is_text_input()
        );
        assert!(!ModalState::Help.is_text_input());
    }
}
