//! UI event types.

use crossterm::event::Event;
use nlterm_core::session::PipelineOutcome;

/// Events the runtime feeds through the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// A terminal input event (key press, resize, ...).
    Terminal(Event),
    /// A finished pipeline run, delivered via the inbox channel.
    Pipeline(PipelineOutcome),
}
