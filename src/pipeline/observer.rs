//! Pipeline progress notifications

use std::fmt;

use super::RunReport;
use crate::error::Error;

/// Step of a sync run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Converting,
    Persisting,
    ResolvingName,
    Updating,
}

impl Stage {
    /// Progress label shown while the stage runs
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Fetching => "Fetching OpenAPI document",
            Stage::Converting => "Converting to Postman collection",
            Stage::Persisting => "Saving collection",
            Stage::ResolvingName => "Reading existing collection name",
            Stage::Updating => "Updating Postman collection",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives every state transition of a run.
///
/// All methods default to no-ops so implementations only override what they
/// display.
pub trait PipelineObserver {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_succeeded(&self, _stage: Stage, _message: &str) {}

    /// The stage degraded but the run continues
    fn stage_warned(&self, _stage: Stage, _message: &str) {}

    /// The stage failed and the run stops
    fn stage_failed(&self, _stage: Stage, _error: &Error) {}

    /// Advisory raised outside of a stage
    fn warning(&self, _message: &str) {}

    /// Terminal SUCCESS state
    fn finished(&self, _report: &RunReport) {}
}
