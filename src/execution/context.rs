use std::fmt::Display;

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use super::{RunEvent, RunId};

/// Builtin output functions handed to the engine; all three capture alike
pub const CAPTURE_FUNCTIONS: [&str; 3] = ["print", "println", "p"];

/// Appends lines to the output of one particular run
#[derive(Debug, Clone)]
pub struct Capture {
    run: RunId,
    events: UnboundedSender<RunEvent>,
}

impl Capture {
    pub(super) fn new(run: RunId, events: UnboundedSender<RunEvent>) -> Self {
        Self { run, events }
    }

    pub fn emit(&self, value: impl Display) {
        let line = value.to_string();
        if self.events.send(RunEvent::Output { run: self.run, line }).is_err() {
            trace!(run = ?self.run, "output dropped, coordinator gone");
        }
    }
}

/// The capture functions available to one run
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    capture: Capture,
}

impl ExecutionContext {
    pub fn new(capture: Capture) -> Self {
        Self { capture }
    }

    pub fn run(&self) -> RunId {
        self.capture.run
    }

    /// Name to capture operation mapping, one entry per builtin alias
    pub fn functions(&self) -> impl Iterator<Item = (&'static str, Capture)> + '_ {
        CAPTURE_FUNCTIONS
            .into_iter()
            .map(|name| (name, self.capture.clone()))
    }

    pub fn capture(&self, value: impl Display) {
        self.capture.emit(value);
    }
}
