//! Application state for the TUI.

use nlterm_core::session::Session;

/// Top-level TUI state: the session engine plus the quit flag.
///
/// The session owns the transcript and the live input region; the TUI
/// never mutates either except through the session's API, which is what
/// keeps the input-boundary invariant out of the rendering layer.
pub struct AppState {
    pub session: Session,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            should_quit: false,
        }
    }
}
