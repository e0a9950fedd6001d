//! Session-scoped state: working directory and command history.

use std::path::{Path, PathBuf};

use crate::dialect::Dialect;

/// Mutable state that outlives individual pipeline runs.
///
/// The history cursor ranges over `[0, history.len()]`; `len` means
/// "not browsing, at a fresh blank line".
#[derive(Debug)]
pub struct SessionState {
    cwd: PathBuf,
    history: Vec<String>,
    cursor: usize,
}

impl SessionState {
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            history: Vec::new(),
            cursor: 0,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Called only after a successful directory-change built-in.
    pub fn update_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Appends a submitted command and resets the cursor to the fresh line.
    pub fn record(&mut self, command: String) {
        self.history.push(command);
        self.cursor = self.history.len();
    }

    /// Steps back through history. At the oldest entry it stays put and
    /// keeps returning that entry.
    pub fn navigate_previous(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.history.get(self.cursor).map(String::as_str)
    }

    /// Steps forward through history. Past the newest entry it returns an
    /// empty string: the fresh-line state.
    pub fn navigate_next(&mut self) -> Option<String> {
        if self.history.is_empty() {
            return None;
        }
        if self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            self.history.get(self.cursor).cloned()
        } else {
            self.cursor = self.history.len();
            Some(String::new())
        }
    }

    /// The prompt string anchored to the current working directory.
    pub fn prompt_string(&self, dialect: Dialect) -> String {
        format!("{}{} ", self.cwd.display(), dialect.prompt_separator())
    }
}
