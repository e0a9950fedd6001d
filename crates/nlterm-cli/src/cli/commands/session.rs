//! Interactive session command handler.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use nlterm_core::config::Config;

use super::exec;

pub async fn run(config: &Config, root: PathBuf) -> Result<()> {
    // If stdin is piped, run exec mode instead
    if !std::io::stdin().is_terminal() {
        let mut line = String::new();
        std::io::stdin().lock().read_to_string(&mut line)?;
        let line = line.trim();
        if line.is_empty() {
            anyhow::bail!("No input provided via pipe");
        }
        return exec::run(config, root, line).await;
    }

    nlterm_tui::run_interactive_session(config, root)
        .await
        .context("interactive session failed")
}
