//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use nlterm_core::session::PipelineRequest;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Spawn a worker task for one pipeline run.
    RunPipeline(PipelineRequest),
}
