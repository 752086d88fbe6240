use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::{Analyzer, AnalyzerError, Diagnostic, Marker};

/// Sequence number handed out per analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnalysisTicket(u64);

/// Drives the analyzer and decides which results reach the editor
pub struct AnalysisCoordinator<A> {
    analyzer: A,
    issued: u64,
    applied: u64,
}

impl<A: Analyzer> AnalysisCoordinator<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            issued: 0,
            applied: 0,
        }
    }

    /// Analyze `source`, absorbing any analyzer failure
    pub fn analyze(&self, source: &str) -> Vec<Diagnostic> {
        match self.try_analyze(source) {
            Ok(diagnostics) => diagnostics,
            Err(err) => {
                warn!(error = %err, "analysis failed");
                Vec::new()
            }
        }
    }

    /// Reserve the next sequence number for a request about to be issued
    pub fn issue(&mut self) -> AnalysisTicket {
        self.issued += 1;
        AnalysisTicket(self.issued)
    }

    /// Analyze and translate in one step. `None` means the editor should keep
    /// whatever markers it currently shows.
    pub fn refresh(&mut self, source: &str) -> Option<Vec<Marker>> {
        let ticket = self.issue();
        let result = self.try_analyze(source);
        self.complete(ticket, result)
    }

    /// Accept the result of the request identified by `ticket`.
    ///
    /// Failed requests are logged and dropped. Successful requests only produce
    /// markers if no newer request has been applied already.
    pub fn complete(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<Vec<Diagnostic>, AnalyzerError>,
    ) -> Option<Vec<Marker>> {
        let diagnostics = match result {
            Ok(diagnostics) => diagnostics,
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "analysis failed, keeping previous markers");
                return None;
            }
        };

        if ticket.0 <= self.applied {
            debug!(
                ticket = ticket.0,
                applied = self.applied,
                "discarding stale analysis result"
            );
            return None;
        }

        self.applied = ticket.0;
        Some(diagnostics.iter().map(Marker::from).collect())
    }

    /// Run the analyzer, converting a panic into an [`AnalyzerError`]
    pub fn try_analyze(&self, source: &str) -> Result<Vec<Diagnostic>, AnalyzerError> {
        let raw = panic::catch_unwind(AssertUnwindSafe(|| self.analyzer.analyze(source)))
            .map_err(|payload| AnalyzerError::Panicked(panic_message(payload.as_ref())))??;

        Ok(raw.into_iter().map(Diagnostic::from).collect())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
