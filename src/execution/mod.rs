//! Run lifecycle: capture context, engine worker, and the output log
//!
//! A run moves `Idle -> Running -> Idle`. The engine executes on a blocking
//! worker and reports back through [`RunEvent`] messages, which the owner of the
//! [`ExecutionCoordinator`] feeds into [`ExecutionCoordinator::apply`].

mod context;
mod coordinator;
mod output;

pub use context::{CAPTURE_FUNCTIONS, Capture, ExecutionContext};
pub use coordinator::{ExecutionCoordinator, RunEvent, RunEvents, RunId, RunState};
pub use output::{OutputKind, OutputSink};

use thiserror::Error;

/// Failure raised by the engine; its message becomes the `Error:` line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reasons a run request is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("no async runtime available to host the run")]
    NoRuntime,
}

/// Executes a whole script, emitting output through the context.
///
/// The returned string is the display form of the script's final value.
pub trait Executor: Send + Sync + 'static {
    fn execute(&self, source: &str, context: &ExecutionContext) -> Result<String, EngineError>;
}
