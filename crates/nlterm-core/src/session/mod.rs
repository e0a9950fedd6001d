//! The session engine.
//!
//! [`Session`] is the pipeline controller's state machine: it owns the
//! transcript (with its live input region) and the session state, hands
//! out pipeline requests on submit, and folds finished outcomes back in.
//! The async halves - translation and execution - live in [`pipeline`]
//! and run on a worker task; the controller itself is synchronous so the
//! foreground never blocks on I/O.

pub mod classify;
pub mod exec;
pub mod pipeline;
pub mod state;
pub mod transcript;
pub mod translate;

use std::path::PathBuf;

use crate::dialect::Dialect;

pub use classify::{InputKind, classify};
pub use exec::ExecOutcome;
pub use pipeline::{Pipeline, PipelineOutcome, PipelineRequest};
pub use state::SessionState;
pub use transcript::{Segment, SegmentStyle, Transcript};
pub use translate::{TranslationResult, Translator};

/// Direction for history navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Previous,
    Next,
}

/// What a submit action resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A pipeline is already in flight; the submit was ignored.
    Ignored,
    /// Blank line: the prompt was redisplayed, nothing recorded.
    Redisplayed,
    /// Exit keyword: the session should terminate.
    Exit,
    /// Clear keyword: the transcript was wiped, history kept.
    Cleared,
    /// A pipeline request the caller must run and feed back via
    /// [`Session::apply_outcome`].
    Started(PipelineRequest),
}

/// One interactive session: transcript, state, and the submit cycle.
///
/// Exactly one pipeline may be in flight at a time. A cooperative
/// interrupt marks the in-flight request stale; its outcome is then
/// discarded instead of rendered.
pub struct Session {
    transcript: Transcript,
    state: SessionState,
    dialect: Dialect,
    next_seq: u64,
    in_flight: Option<u64>,
}

impl Session {
    /// Creates a session rooted at `cwd`, appends the welcome banner, and
    /// opens the first prompt.
    pub fn new(dialect: Dialect, cwd: PathBuf) -> Self {
        let mut session = Self {
            transcript: Transcript::new(),
            state: SessionState::new(cwd),
            dialect,
            next_seq: 0,
            in_flight: None,
        };
        session.transcript.append(
            format!(
                "Welcome to Natural Language Terminal ({})\n\
                 - Type normal {} commands OR natural language\n\
                 - Natural language will be automatically detected and translated\n\
                 - Type 'exit' or 'quit' to close the terminal\n\n",
                session.dialect.shell_name(),
                session.dialect.shell_name(),
            ),
            SegmentStyle::Output,
        );
        session.open_prompt();
        session
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Mutable access to the transcript for live-region edits. The
    /// transcript API guarantees edits cannot cross the boundary.
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The prompt string for the current working directory.
    pub fn current_prompt_string(&self) -> String {
        self.state.prompt_string(self.dialect)
    }

    /// True while a pipeline run is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Submits the live input region.
    pub fn submit_line(&mut self) -> Submission {
        if self.in_flight.is_some() {
            // Single pipeline in flight: drop the submit, keep the input.
            return Submission::Ignored;
        }

        let line = self.transcript.take_submission();
        let line = line.trim().to_string();

        if line.is_empty() {
            self.open_prompt();
            return Submission::Redisplayed;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return Submission::Exit;
        }

        if line.eq_ignore_ascii_case("clear") || line.eq_ignore_ascii_case("cls") {
            self.transcript.clear();
            self.open_prompt();
            return Submission::Cleared;
        }

        self.state.record(line.clone());

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);

        Submission::Started(PipelineRequest {
            seq,
            line,
            cwd: self.state.cwd().to_path_buf(),
        })
    }

    /// Replaces the live input region with a history entry.
    pub fn navigate_history(&mut self, direction: HistoryDirection) {
        let entry = match direction {
            HistoryDirection::Previous => self.state.navigate_previous().map(str::to_string),
            HistoryDirection::Next => self.state.navigate_next(),
        };
        if let Some(entry) = entry {
            self.transcript.set_input(&entry);
        }
    }

    /// Wipes the transcript (Ctrl+L / the clear keyword). History stays.
    pub fn request_clear(&mut self) {
        self.transcript.clear();
        self.open_prompt();
    }

    /// Cooperative interrupt.
    ///
    /// Marks any in-flight request stale so its outcome is discarded, echoes
    /// `^C`, and opens a fresh prompt.
    pub fn request_interrupt(&mut self) {
        if let Some(seq) = self.in_flight.take() {
            tracing::debug!(seq, "marking in-flight pipeline stale");
        }
        self.transcript.append("\n^C\n", SegmentStyle::Output);
        self.open_prompt();
    }

    /// Folds a finished pipeline run back into the session.
    ///
    /// Stale outcomes (interrupted, or superseded) are discarded. Live
    /// outcomes append their segments, adopt the new working directory, and
    /// open a fresh prompt - every pipeline run ends with exactly one
    /// new prompt, so the session can never wedge.
    pub fn apply_outcome(&mut self, outcome: PipelineOutcome) {
        if self.in_flight != Some(outcome.seq) {
            tracing::debug!(seq = outcome.seq, "discarding stale pipeline outcome");
            return;
        }
        self.in_flight = None;

        for segment in outcome.segments {
            self.transcript.append(segment.text, segment.style);
        }
        self.state.update_cwd(outcome.cwd);
        self.open_prompt();
    }

    fn open_prompt(&mut self) {
        let prompt = self.current_prompt_string();
        self.transcript.open_region(&prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Dialect::Bash, PathBuf::from("/tmp"))
    }

    fn type_line(s: &mut Session, line: &str) {
        for c in line.chars() {
            s.transcript_mut().insert_char(c);
        }
    }

    #[test]
    fn test_blank_submit_redisplays_without_history() {
        let mut s = session();
        let before = s.state().history().len();
        assert_eq!(s.submit_line(), Submission::Redisplayed);
        assert_eq!(s.state().history().len(), before);
        // The tail is a fresh prompt segment.
        let last = s.transcript().segments().last().unwrap();
        assert_eq!(last.style, SegmentStyle::Prompt);
    }

    #[test]
    fn test_exit_keywords_terminate() {
        for keyword in ["exit", "quit", "EXIT", "Quit"] {
            let mut s = session();
            type_line(&mut s, keyword);
            assert_eq!(s.submit_line(), Submission::Exit);
        }
    }

    #[test]
    fn test_clear_wipes_transcript_keeps_history() {
        let mut s = session();
        type_line(&mut s, "echo hi");
        let Submission::Started(req) = s.submit_line() else {
            panic!("expected Started");
        };
        s.apply_outcome(PipelineOutcome {
            seq: req.seq,
            segments: vec![Segment::new("hi\n", SegmentStyle::Output)],
            cwd: req.cwd,
        });

        type_line(&mut s, "clear");
        assert_eq!(s.submit_line(), Submission::Cleared);
        assert_eq!(s.state().history(), &["echo hi".to_string()]);
        // Only the freshly opened prompt remains.
        assert_eq!(s.transcript().segments().len(), 1);
    }

    #[test]
    fn test_submit_while_busy_is_ignored() {
        let mut s = session();
        type_line(&mut s, "echo one");
        assert!(matches!(s.submit_line(), Submission::Started(_)));
        assert!(s.is_busy());

        type_line(&mut s, "echo two");
        assert_eq!(s.submit_line(), Submission::Ignored);
        // The typed line is still in the live region.
        assert_eq!(s.transcript().input(), "echo two");
    }

    #[test]
    fn test_apply_outcome_appends_and_reopens_prompt() {
        let mut s = session();
        type_line(&mut s, "echo hi");
        let Submission::Started(req) = s.submit_line() else {
            panic!("expected Started");
        };

        s.apply_outcome(PipelineOutcome {
            seq: req.seq,
            segments: vec![Segment::new("hi\n", SegmentStyle::Output)],
            cwd: PathBuf::from("/tmp"),
        });

        assert!(!s.is_busy());
        let styles: Vec<SegmentStyle> = s
            .transcript()
            .segments()
            .iter()
            .map(|seg| seg.style)
            .collect();
        assert_eq!(styles.last(), Some(&SegmentStyle::Prompt));
        assert!(styles.contains(&SegmentStyle::Output));
    }

    #[test]
    fn test_interrupt_discards_inflight_outcome() {
        let mut s = session();
        type_line(&mut s, "sleep 100");
        let Submission::Started(req) = s.submit_line() else {
            panic!("expected Started");
        };

        s.request_interrupt();
        assert!(!s.is_busy());
        let segments_after_interrupt = s.transcript().segments().len();

        // The worker eventually finishes; its outcome must be dropped.
        s.apply_outcome(PipelineOutcome {
            seq: req.seq,
            segments: vec![Segment::new("late\n", SegmentStyle::Output)],
            cwd: PathBuf::from("/elsewhere"),
        });
        assert_eq!(s.transcript().segments().len(), segments_after_interrupt);
        assert_eq!(s.state().cwd(), PathBuf::from("/tmp"));
    }

    #[test]
    fn test_cwd_change_updates_prompt() {
        let mut s = session();
        type_line(&mut s, "cd sub");
        let Submission::Started(req) = s.submit_line() else {
            panic!("expected Started");
        };
        s.apply_outcome(PipelineOutcome {
            seq: req.seq,
            segments: vec![Segment::new("Changed directory\n", SegmentStyle::Output)],
            cwd: PathBuf::from("/tmp/sub"),
        });
        assert_eq!(s.current_prompt_string(), "/tmp/sub$ ");
    }

    #[test]
    fn test_history_navigation_fills_input_region() {
        let mut s = session();
        for line in ["echo a", "echo b"] {
            type_line(&mut s, line);
            let Submission::Started(req) = s.submit_line() else {
                panic!("expected Started");
            };
            s.apply_outcome(PipelineOutcome {
                seq: req.seq,
                segments: Vec::new(),
                cwd: PathBuf::from("/tmp"),
            });
        }

        s.navigate_history(HistoryDirection::Previous);
        assert_eq!(s.transcript().input(), "echo b");
        s.navigate_history(HistoryDirection::Previous);
        assert_eq!(s.transcript().input(), "echo a");
        s.navigate_history(HistoryDirection::Next);
        assert_eq!(s.transcript().input(), "echo b");
        s.navigate_history(HistoryDirection::Next);
        assert_eq!(s.transcript().input(), "");
    }

    #[test]
    fn test_welcome_banner_present() {
        let s = session();
        assert!(
            s.transcript().segments()[0]
                .text
                .contains("Welcome to Natural Language Terminal")
        );
    }
}
