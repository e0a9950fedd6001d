//! The submit pipeline: classify, optionally translate, execute.
//!
//! One `run` call handles one submitted line end to end and returns the
//! segments to append plus the resulting working directory. The pipeline
//! itself holds no session state; staleness and single-flight rules are
//! enforced by the [`Session`](super::Session) controller that consumes
//! the outcome.

use std::path::PathBuf;
use std::time::Duration;

use crate::dialect::Dialect;
use crate::session::classify::{InputKind, classify};
use crate::session::exec::{ExecOutcome, execute};
use crate::session::transcript::{Segment, SegmentStyle};
use crate::session::translate::{TranslationResult, Translator};

/// One submitted line, snapshotted at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Monotonically increasing per-session sequence number. Used to
    /// discard results of interrupted (stale) runs.
    pub seq: u64,
    pub line: String,
    pub cwd: PathBuf,
}

/// Everything a finished pipeline run wants rendered.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub seq: u64,
    pub segments: Vec<Segment>,
    pub cwd: PathBuf,
}

/// Drives classification, translation, and execution for one line.
pub struct Pipeline {
    translator: Translator,
    dialect: Dialect,
    command_timeout: Option<Duration>,
}

impl Pipeline {
    pub fn new(translator: Translator, dialect: Dialect, command_timeout: Option<Duration>) -> Self {
        Self {
            translator,
            dialect,
            command_timeout,
        }
    }

    /// Runs one request to completion. Never fails: every failure mode is
    /// rendered as transcript segments.
    pub async fn run(&self, request: PipelineRequest) -> PipelineOutcome {
        let mut segments = Vec::new();

        let kind = classify(&request.line, self.dialect);
        tracing::debug!(seq = request.seq, ?kind, line = %request.line, "classified submission");

        let exec_outcome = match kind {
            InputKind::Direct => Some(self.execute(&request.line, &request.cwd).await),
            InputKind::NaturalLanguage => {
                segments.push(Segment::new(
                    format!("Translating: {}\n", request.line),
                    SegmentStyle::Output,
                ));

                match self.translator.translate(&request.line, &request.cwd).await {
                    TranslationResult::Direct => {
                        segments.push(Segment::new(
                            format!("Executing as-is: {}\n", request.line),
                            SegmentStyle::Output,
                        ));
                        Some(self.execute(&request.line, &request.cwd).await)
                    }
                    TranslationResult::Command(command) => {
                        segments.push(Segment::new(
                            format!("Executing: {command}\n"),
                            SegmentStyle::Output,
                        ));
                        Some(self.execute(&command, &request.cwd).await)
                    }
                    TranslationResult::Rejected(reason) => {
                        segments.push(Segment::new(format!("{reason}\n"), SegmentStyle::Error));
                        None
                    }
                }
            }
        };

        let cwd = match exec_outcome {
            Some(outcome) => {
                if !outcome.text.is_empty() {
                    let style = if outcome.is_error {
                        SegmentStyle::Error
                    } else {
                        SegmentStyle::Output
                    };
                    segments.push(Segment::new(outcome.text, style));
                }
                outcome.cwd
            }
            None => request.cwd,
        };

        PipelineOutcome {
            seq: request.seq,
            segments,
            cwd,
        }
    }

    async fn execute(&self, command: &str, cwd: &std::path::Path) -> ExecOutcome {
        execute(command, cwd, self.dialect, self.command_timeout).await
    }
}
