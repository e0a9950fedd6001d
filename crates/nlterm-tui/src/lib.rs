//! Full-screen TUI for nlterm.
//!
//! Thin rendering shell over the session engine: an Elm-style split of
//! state, reducer, and effects, with a runtime that owns the terminal
//! and executes effects. All pipeline behavior lives in `nlterm-core`;
//! this crate only draws the transcript and routes keys.

mod effects;
mod events;
mod render;
mod runtime;
mod state;
mod terminal;
mod update;

use std::path::PathBuf;

use anyhow::Result;
use nlterm_core::config::Config;

use crate::runtime::TuiRuntime;

/// Runs the interactive session until the user exits.
pub async fn run_interactive_session(config: &Config, root: PathBuf) -> Result<()> {
    let mut runtime = TuiRuntime::new(config, root)?;
    runtime.run()
}
