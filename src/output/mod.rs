//! Progress and result display

pub mod console;

pub use console::ConsoleReporter;

use crate::pipeline::PipelineObserver;

/// Observer that displays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl PipelineObserver for SilentReporter {}
