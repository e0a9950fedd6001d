//! Pure view/render functions for the TUI.
//!
//! Functions here take state by immutable reference and draw to a
//! ratatui Frame. Never mutate state or return effects.

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::AppState;
use nlterm_core::session::{SegmentStyle, Transcript};

/// Renders the entire TUI to the frame.
///
/// The transcript is tail-anchored: when it grows past the viewport, the
/// paragraph is scrolled so the live input region stays visible.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    // No prompt is open while a pipeline runs, so the cursor hides too.
    let lines = transcript_lines(app.session.transcript(), !app.session.is_busy());

    let height = area.height as usize;
    let scroll = lines.len().saturating_sub(height);
    // Line counts stay well under u16::MAX for any real transcript; the
    // clear keyword resets them long before that.
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    let transcript = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(transcript, area);
}

fn segment_style(style: SegmentStyle) -> Style {
    match style {
        SegmentStyle::Prompt => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        SegmentStyle::Input => Style::default(),
        SegmentStyle::Output => Style::default().fg(Color::Green),
        SegmentStyle::Error => Style::default().fg(Color::Red),
    }
}

/// Builds display lines from the frozen segments plus the live input region.
///
/// Segments carry embedded newlines; a line break inside a segment closes
/// the current display line. With `show_cursor`, the live region and its
/// cursor are appended to the last open line, right after the prompt.
fn transcript_lines(transcript: &Transcript, show_cursor: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in transcript.segments() {
        let style = segment_style(segment.style);
        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }

    if show_cursor {
        current.extend(input_spans(transcript));
    }
    lines.push(Line::from(current));
    lines
}

/// Renders the live input with a block cursor: the char under the cursor
/// is reversed, or a reversed space when the cursor sits at the end.
fn input_spans(transcript: &Transcript) -> Vec<Span<'static>> {
    let input = transcript.input();
    let cursor = transcript.cursor();
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

    let mut spans = Vec::new();
    let before: String = input.chars().take(cursor).collect();
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }

    match input.chars().nth(cursor) {
        Some(c) => {
            spans.push(Span::styled(c.to_string(), cursor_style));
            let after: String = input.chars().skip(cursor + 1).collect();
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        }
        None => spans.push(Span::styled(" ", cursor_style)),
    }

    spans
}
