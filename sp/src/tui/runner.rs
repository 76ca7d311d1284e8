//! TUI Runner - main loop that owns the terminal and the form
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App
//! - Firing the debounce timer on ticks
//! - Applying gateway completions as they arrive
//! - Redrawing after every change

use std::time::Duration;

use eyre::Result;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;
use crate::form::FormController;

/// Tick rate for the event thread; bounds debounce timer resolution
const TICK_RATE: Duration = Duration::from_millis(50);

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    event_handler: EventHandler,
}

impl TuiRunner {
    pub fn new(terminal: Tui, controller: FormController) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app: App::new(controller),
            terminal,
            event_handler: EventHandler::new(TICK_RATE),
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            // Wait for either a terminal event or a finished gateway call
            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {
                            if self.app.controller_mut().poll(Instant::now()) {
                                debug!("TuiRunner::run: recommendation started");
                            }
                        }
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event, Instant::now()) {
                                break;
                            }
                        }
                        Event::Paste(text) => {
                            self.app.handle_paste(&text, Instant::now());
                        }
                        Event::Resize(width, height) => {
                            trace!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(completion) = self.app.controller_mut().next_completion() => {
                    debug!(?completion, "TuiRunner::run: completion");
                    self.app.controller_mut().handle_completion(completion);
                }
            }

            if self.app.should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }
}
