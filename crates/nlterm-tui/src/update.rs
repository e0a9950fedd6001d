//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use nlterm_core::session::{HistoryDirection, Submission};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(Event::Key(key)) => handle_key(app, key),
        UiEvent::Terminal(_) => vec![],
        UiEvent::Pipeline(outcome) => {
            app.session.apply_outcome(outcome);
            vec![]
        }
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.session.request_interrupt();
                return vec![];
            }
            KeyCode::Char('l') => {
                app.session.request_clear();
                return vec![];
            }
            KeyCode::Char('d') => {
                return vec![UiEffect::Quit];
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Enter => match app.session.submit_line() {
            Submission::Started(request) => vec![UiEffect::RunPipeline(request)],
            Submission::Exit => vec![UiEffect::Quit],
            Submission::Ignored | Submission::Redisplayed | Submission::Cleared => vec![],
        },
        KeyCode::Up => {
            app.session.navigate_history(HistoryDirection::Previous);
            vec![]
        }
        KeyCode::Down => {
            app.session.navigate_history(HistoryDirection::Next);
            vec![]
        }
        KeyCode::Left => {
            app.session.transcript_mut().move_left();
            vec![]
        }
        KeyCode::Right => {
            app.session.transcript_mut().move_right();
            vec![]
        }
        KeyCode::Home => {
            app.session.transcript_mut().move_home();
            vec![]
        }
        KeyCode::End => {
            app.session.transcript_mut().move_end();
            vec![]
        }
        KeyCode::Backspace => {
            app.session.transcript_mut().backspace();
            vec![]
        }
        KeyCode::Delete => {
            app.session.transcript_mut().delete();
            vec![]
        }
        KeyCode::Char(c) => {
            app.session.transcript_mut().insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}
