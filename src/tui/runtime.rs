//! Async runtime and task management for the TUI
//!
//! This module implements the dual-channel event-driven architecture:
//! - Input channel (priority): user input events, never dropped
//! - Data channel: fetch results and animation ticks
//!
//! The main loop uses `tokio::select!` with bias toward the input channel
//! so a burst of responses cannot starve keystrokes.
//!
//! Fetches are one-shot tasks started by the loop whenever the app queues a
//! ticket. Their results are sent with an awaited `send`: a dropped result
//! would leave its cache entry loading forever.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::DistributionsClient;
use crate::fetch::FetchTicket;
use crate::tui::app::App;
use crate::tui::event::{DataEvent, EventResult, InputEvent};

/// Channel capacities
const INPUT_CHANNEL_CAPACITY: usize = 16;
const DATA_CHANNEL_CAPACITY: usize = 32;

const ANIMATION_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// TUI runtime managing all background tasks
pub struct TuiRuntime {
    cancel_token: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
}

impl Default for TuiRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiRuntime {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            task_handles: Vec::new(),
        }
    }

    /// Get a clone of the cancellation token for spawning tasks
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Add a task handle to track; finished fetch tasks are dropped here
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.task_handles.retain(|h| !h.is_finished());
        self.task_handles.push(handle);
    }

    /// Signal shutdown and wait for tasks to complete
    pub async fn shutdown(self) {
        self.cancel_token.cancel();

        let shutdown = async {
            for handle in self.task_handles {
                let _ = handle.await;
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = tokio::time::sleep(Duration::from_secs(2)) => {
                debug!("background tasks did not stop in time");
            }
        }
    }
}

/// Spawn the input event reader task
pub fn spawn_input_task(tx: mpsc::Sender<InputEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let input_event = match event {
                                Event::Key(key) => Some(InputEvent::Key(key)),
                                Event::Mouse(mouse) => Some(InputEvent::Mouse(mouse)),
                                Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
                                _ => None,
                            };

                            if let Some(evt) = input_event
                                && tx.send(evt).await.is_err()
                            {
                                break; // Receiver dropped
                            }
                        }
                        Some(Err(e)) => {
                            let is_fatal = matches!(
                                e.kind(),
                                std::io::ErrorKind::BrokenPipe
                                    | std::io::ErrorKind::ConnectionReset
                                    | std::io::ErrorKind::UnexpectedEof
                            );

                            if is_fatal {
                                info!("Terminal disconnected: {:?}", e);
                                break;
                            }
                            warn!("Terminal event read error: {:?}", e);
                        }
                        None => break,
                    }
                }
            }
        }
    })
}

/// Spawn one listing request for `ticket`
pub fn spawn_fetch(
    client: DistributionsClient,
    ticket: FetchTicket,
    tx: mpsc::Sender<DataEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(filters = %ticket.key, request_id = ticket.request_id, "fetching page");

        let result = tokio::select! {
            _ = cancel.cancelled() => return,
            result = client.list(&ticket.key) => result,
        };
        let result = result.map_err(|e| e.to_string());

        if tx.send(DataEvent::PageLoaded { ticket, result }).await.is_err() {
            debug!("event loop gone, dropping page");
        }
    })
}

/// Spawn the animation tick task
pub fn spawn_animation_tick(tx: mpsc::Sender<DataEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ANIMATION_TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    // Ticks are only cosmetic; skip when the loop is busy
                    let _ = tx.try_send(DataEvent::AnimationTick);
                }
            }
        }
    })
}

/// Run the main TUI event loop.
///
/// `fetch_fn` is called once for every ticket the app queues, including the
/// initial one.
pub async fn run_event_loop(
    mut app: App,
    mut input_rx: mpsc::Receiver<InputEvent>,
    mut data_rx: mpsc::Receiver<DataEvent>,
    mut fetch_fn: impl FnMut(FetchTicket),
    mut render_fn: impl FnMut(&App) -> Result<()>,
) -> Result<()> {
    let mut needs_render = true;

    loop {
        for ticket in app.take_pending() {
            fetch_fn(ticket);
        }

        if needs_render {
            render_fn(&app)?;
            needs_render = false;
        }

        if !app.running {
            break;
        }

        tokio::select! {
            biased;

            Some(input) = input_rx.recv() => {
                match app.handle_input(input) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            Some(data) = data_rx.recv() => {
                match app.handle_data(data) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            else => break,
        }
    }

    Ok(())
}

/// Create the dual channels for the TUI
pub fn create_channels() -> (
    mpsc::Sender<InputEvent>,
    mpsc::Receiver<InputEvent>,
    mpsc::Sender<DataEvent>,
    mpsc::Receiver<DataEvent>,
) {
    let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    let (data_tx, data_rx) = mpsc::channel(DATA_CHANNEL_CAPACITY);
    (input_tx, input_rx, data_tx, data_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::QueryCache;
    use crate::models::{FilterState, PageResponse};
    use crate::tui::theme::Theme;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new(
            FilterState::default(),
            QueryCache::default(),
            Theme::dark(),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_loop_dispatches_queued_fetches() {
        let (input_tx, input_rx, _data_tx, data_rx) = create_channels();
        input_tx.send(key('l')).await.unwrap();
        input_tx.send(key('z')).await.unwrap();
        input_tx.send(key('q')).await.unwrap();

        let mut fetched = Vec::new();
        let mut renders = 0;
        run_event_loop(
            app(),
            input_rx,
            data_rx,
            |ticket| fetched.push(ticket.key),
            |_| {
                renders += 1;
                Ok(())
            },
        )
        .await
        .unwrap();

        // Initial page, then the page-size change; "next" is disabled
        // without pagination metadata.
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0], FilterState::default());
        assert_eq!(fetched[1].limit, 20);
        assert_eq!(renders, 2);
    }

    #[tokio::test]
    async fn test_loop_applies_results() {
        let (input_tx, input_rx, data_tx, data_rx) = create_channels();
        let mut app = app();
        let ticket = app.take_pending().remove(0);

        data_tx
            .send(DataEvent::PageLoaded {
                ticket,
                result: Ok(PageResponse::default()),
            })
            .await
            .unwrap();
        drop(data_tx);
        drop(input_tx);

        let mut fetched = 0;
        let mut renders = 0;
        run_event_loop(
            app,
            input_rx,
            data_rx,
            |_| fetched += 1,
            |_| {
                renders += 1;
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(fetched, 0);
        // Initial frame plus the loaded page
        assert_eq!(renders, 2);
    }
}
