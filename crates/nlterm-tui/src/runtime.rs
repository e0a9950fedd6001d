//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Pipeline runs are spawned onto tokio and report back through an
//! unbounded "inbox" channel the runtime drains each frame.

use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use nlterm_core::config::Config;
use nlterm_core::interrupt;
use nlterm_core::providers::{GeminiClient, GeminiConfig};
use nlterm_core::session::{Pipeline, Session, Translator};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while a pipeline is in flight (~60fps).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when
/// nothing is happening.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    pipeline: Arc<Pipeline>,
    /// Inbox sender - pipeline workers send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - the runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// Must be called from within a tokio runtime: pipeline runs are
    /// spawned as tasks.
    ///
    /// # Errors
    /// Fails when the provider cannot be configured (no API key) or the
    /// terminal cannot be set up.
    pub fn new(config: &Config, root: PathBuf) -> Result<Self> {
        let gemini = GeminiConfig::from_env(
            config.model.clone(),
            config.max_output_tokens,
            config.providers.gemini.base_url.as_deref(),
            config.providers.gemini.api_key.as_deref(),
        )?;
        let translator = Translator::new(Box::new(GeminiClient::new(gemini)), config.dialect);
        let pipeline = Arc::new(Pipeline::new(
            translator,
            config.dialect,
            config.command_timeout(),
        ));

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });

        // Reset interrupt flag in case it was set from a previous run
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(Session::new(config.dialect, root));
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            pipeline,
            inbox_tx,
            inbox_rx,
        })
    }

    /// Runs the main event loop until the user exits.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            // The Ctrl+C signal handler only sets a flag; fold it into the
            // session here so the in-flight run is marked stale.
            if interrupt::is_interrupted() {
                interrupt::reset();
                self.state.session.request_interrupt();
                dirty = true;
            }

            for event in self.collect_events()? {
                let effects = update::update(&mut self.state, event);
                dirty = true;
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the terminal and the inbox.
    ///
    /// Polls fast while a pipeline is in flight (the worker may finish any
    /// moment) and slowly when idle.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            if self.state.session.is_busy() {
                FRAME_DURATION
            } else {
                IDLE_POLL_DURATION
            }
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::RunPipeline(request) => {
                tracing::debug!(seq = request.seq, line = %request.line, "spawning pipeline run");
                let pipeline = Arc::clone(&self.pipeline);
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let outcome = pipeline.run(request).await;
                    // Receiver gone means the runtime is shutting down.
                    let _ = tx.send(UiEvent::Pipeline(outcome));
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
