//! Terminal User Interface for cdnmon
//!
//! An interactive dashboard over the distributions listing:
//! - Filter bar with search, status, priority, date and sort controls
//! - Per-filter page cache so revisited views appear instantly
//! - Dual-channel event architecture (priority input, async fetches)
//! - Keyboard and mouse navigation

pub mod app;
pub mod event;
pub mod runtime;
pub mod theme;
pub mod ui;

use std::io::{self, IsTerminal, stdout};
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use crate::api::DistributionsClient;
use crate::models::Config;
use crate::tui::app::App;
use crate::tui::runtime::{
    TuiRuntime, create_channels, run_event_loop, spawn_animation_tick, spawn_fetch,
    spawn_input_task,
};

/// Terminal capability requirements for TUI mode
#[derive(Debug)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub term_type: String,
    pub supports_alternate_screen: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self::from_parts(stdout().is_terminal(), std::env::var("TERM").unwrap_or_default())
    }

    fn from_parts(is_tty: bool, term_type: String) -> Self {
        let supports_alternate_screen = !matches!(term_type.as_str(), "dumb" | "" | "unknown");
        Self {
            is_tty,
            term_type,
            supports_alternate_screen,
        }
    }

    pub fn is_suitable(&self) -> bool {
        self.is_tty && self.supports_alternate_screen
    }

    pub fn error_message(&self) -> String {
        if !self.is_tty {
            "TUI mode requires an interactive terminal (stdout is not a TTY).\n\
             Hint: Use 'cdnmon list' instead."
                .to_string()
        } else if !self.supports_alternate_screen {
            format!(
                "Terminal type '{}' may not support TUI mode.\n\
                 Hint: Set TERM to a supported value (e.g., xterm-256color) or use 'cdnmon list'.",
                if self.term_type.is_empty() {
                    "(unset)"
                } else {
                    &self.term_type
                }
            )
        } else {
            "Unknown terminal capability issue.".to_string()
        }
    }
}

/// Run the TUI application
pub async fn run_tui(config: Config, config_warnings: Vec<String>) -> Result<()> {
    let capabilities = TerminalCapabilities::detect();
    if !capabilities.is_suitable() {
        bail!("{}", capabilities.error_message());
    }

    let client = DistributionsClient::new(
        config.base_url()?,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    info!(base_url = client.base_url(), "starting dashboard");

    let mut terminal = setup_terminal()?;
    let mut app = App::from_config(&config, config_warnings);
    app.set_viewport(ui::table_capacity(terminal.size()?.height));

    let (input_tx, input_rx, data_tx, data_rx) = create_channels();
    let mut runtime = TuiRuntime::new();

    runtime.track(spawn_input_task(input_tx, runtime.cancel_token()));
    runtime.track(spawn_animation_tick(data_tx.clone(), runtime.cancel_token()));

    let cancel = runtime.cancel_token();
    let result = run_event_loop(
        app,
        input_rx,
        data_rx,
        |ticket| {
            runtime.track(spawn_fetch(
                client.clone(),
                ticket,
                data_tx.clone(),
                cancel.clone(),
            ));
        },
        |app| {
            terminal.draw(|frame| ui::render(app, frame))?;
            Ok(())
        },
    )
    .await;

    runtime.shutdown().await;
    restore_terminal(&mut terminal)?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI with the tokio runtime (entry point from main)
pub fn run(config: Config, config_warnings: Vec<String>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_tui(config, config_warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_capabilities() {
        assert!(TerminalCapabilities::from_parts(true, "xterm-256color".into()).is_suitable());
        assert!(!TerminalCapabilities::from_parts(false, "xterm".into()).is_suitable());

        let dumb = TerminalCapabilities::from_parts(true, "dumb".into());
        assert!(!dumb.is_suitable());
        assert!(dumb.error_message().contains("'dumb'"));

        let unset = TerminalCapabilities::from_parts(true, String::new());
        assert!(unset.error_message().contains("(unset)"));
    }
}
