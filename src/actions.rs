//! Row action menu.
//!
//! Actions are identified by tag and routed through an [`ActionDispatcher`].
//! No lifecycle operation has a backend contract, so the default handler
//! only reports that the action is unavailable.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::models::Distribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    ViewAnalytics,
    Purge,
    Manage,
    Disable,
    Delete,
}

impl RowAction {
    /// Menu order
    pub const ALL: [RowAction; 5] = [
        RowAction::ViewAnalytics,
        RowAction::Purge,
        RowAction::Manage,
        RowAction::Disable,
        RowAction::Delete,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::ViewAnalytics => "View Analytics",
            RowAction::Purge => "Purge",
            RowAction::Manage => "Manage",
            RowAction::Disable => "Disable",
            RowAction::Delete => "Delete",
        }
    }

    /// Shown in the destructive style
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(self, RowAction::Delete)
    }
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of running an action, surfaced as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done(String),
    Unavailable(String),
}

impl ActionOutcome {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ActionOutcome::Done(msg) | ActionOutcome::Unavailable(msg) => msg,
        }
    }
}

pub trait ActionHandler: Send + Sync {
    fn handle(&self, action: RowAction, target: &Distribution) -> ActionOutcome;
}

/// Handler used when nothing is registered for an action
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl ActionHandler for Unavailable {
    fn handle(&self, action: RowAction, target: &Distribution) -> ActionOutcome {
        ActionOutcome::Unavailable(format!("{action} is not available for {}", target.name))
    }
}

pub struct ActionDispatcher {
    handlers: HashMap<RowAction, Box<dyn ActionHandler>>,
    fallback: Box<dyn ActionHandler>,
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: Box::new(Unavailable),
        }
    }
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("registered", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ActionDispatcher {
    pub fn register(&mut self, action: RowAction, handler: Box<dyn ActionHandler>) {
        self.handlers.insert(action, handler);
    }

    pub fn dispatch(&self, action: RowAction, target: &Distribution) -> ActionOutcome {
        info!(%action, id = %target.id, "row action");
        self.handlers
            .get(&action)
            .unwrap_or(&self.fallback)
            .handle(action, target)
    }
}
