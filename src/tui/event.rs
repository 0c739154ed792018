//! Event types for the TUI
//!
//! Two channels feed the event loop:
//! - InputEvent: user input, read with priority
//! - DataEvent: fetch results and animation ticks

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::fetch::FetchTicket;
use crate::models::PageResponse;

/// Input events from the terminal
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Events produced by background tasks
#[derive(Debug)]
pub enum DataEvent {
    /// Animation tick (200ms), only redraws while a page is loading
    AnimationTick,

    /// A listing request finished. The error detail is for logging only.
    PageLoaded {
        ticket: FetchTicket,
        result: Result<PageResponse, String>,
    },
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Row navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,

    // Pagination
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    CyclePageSize,

    // Filter controls
    OpenSearch,
    OpenStatus,
    OpenPriority,
    OpenDate,
    OpenSort,
    OpenChips,
    ResetFilters,

    // Actions
    Select,
    Toggle,
    Refresh,
    YankDomain,

    // UI
    ShowHelp,
    Escape,
    Quit,

    // Text input
    InputClear,
    InputBackspace,
    InputChar(char),
    NextField,

    // Mouse
    MouseClick { row: u16, column: u16 },
    MouseScrollUp,
    MouseScrollDown,

    Unknown,
}

impl KeyAction {
    /// Map a mouse event to an action
    pub fn from_mouse_event(event: MouseEvent) -> Self {
        use crossterm::event::{MouseButton, MouseEventKind};

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => KeyAction::MouseClick {
                row: event.row,
                column: event.column,
            },
            MouseEventKind::ScrollUp => KeyAction::MouseScrollUp,
            MouseEventKind::ScrollDown => KeyAction::MouseScrollDown,
            _ => KeyAction::Unknown,
        }
    }

    /// Map a key event to an action. Text fields receive raw characters.
    pub fn from_key_event(event: KeyEvent, in_text_input: bool) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if in_text_input {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter => KeyAction::Select,
                KeyCode::Tab => KeyAction::NextField,
                KeyCode::Backspace => KeyAction::InputBackspace,
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::InputClear
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
                KeyCode::Char(c) => KeyAction::InputChar(c),
                _ => KeyAction::Unknown,
            };
        }

        match code {
            KeyCode::Char('q') => KeyAction::Quit,

            // Ctrl+ combinations must come before bare character matches
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageDown,
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageUp,

            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::Char('G') | KeyCode::End => KeyAction::MoveToBottom,
            KeyCode::PageDown => KeyAction::PageDown,
            KeyCode::PageUp => KeyAction::PageUp,

            KeyCode::Char('h') | KeyCode::Left => KeyAction::PrevPage,
            KeyCode::Char('l') | KeyCode::Right => KeyAction::NextPage,
            KeyCode::Char('H') => KeyAction::FirstPage,
            KeyCode::Char('L') => KeyAction::LastPage,
            KeyCode::Char('z') => KeyAction::CyclePageSize,

            KeyCode::Char('/') => KeyAction::OpenSearch,
            KeyCode::Char('s') => KeyAction::OpenStatus,
            KeyCode::Char('p') => KeyAction::OpenPriority,
            KeyCode::Char('d') => KeyAction::OpenDate,
            KeyCode::Char('o') => KeyAction::OpenSort,
            KeyCode::Char('c') => KeyAction::OpenChips,
            KeyCode::Char('R') => KeyAction::ResetFilters,

            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char(' ') => KeyAction::Toggle,
            KeyCode::Char('r') | KeyCode::F(5) => KeyAction::Refresh,
            KeyCode::Char('y') => KeyAction::YankDomain,

            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Esc => KeyAction::Escape,

            _ => KeyAction::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_key_action_quit() {
        assert_eq!(KeyAction::from_key_event(key('q'), false), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(ctrl_c, false), KeyAction::Quit);
        assert_eq!(KeyAction::from_key_event(ctrl_c, true), KeyAction::Quit);
    }

    #[test]
    fn test_pagination_keys() {
        assert_eq!(KeyAction::from_key_event(key('h'), false), KeyAction::PrevPage);
        assert_eq!(KeyAction::from_key_event(key('l'), false), KeyAction::NextPage);
        assert_eq!(KeyAction::from_key_event(key('H'), false), KeyAction::FirstPage);
        assert_eq!(KeyAction::from_key_event(key('L'), false), KeyAction::LastPage);
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(right, false), KeyAction::NextPage);
    }

    #[test]
    fn test_text_input_takes_raw_chars() {
        assert_eq!(
            KeyAction::from_key_event(key('q'), true),
            KeyAction::InputChar('q')
        );
        assert_eq!(
            KeyAction::from_key_event(key('/'), true),
            KeyAction::InputChar('/')
        );

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(ctrl_u, true), KeyAction::InputClear);
        assert_eq!(KeyAction::from_key_event(ctrl_u, false), KeyAction::PageUp);
    }
}
