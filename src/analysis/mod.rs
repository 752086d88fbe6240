//! Static analysis feedback loop
//!
//! Turns analyzer output into editor markers on every text change. The analyzer
//! itself is an injected capability (see [`Analyzer`]); a failing analyzer never
//! disturbs the markers already on screen.

mod coordinator;
mod diagnostic;

pub use coordinator::{AnalysisCoordinator, AnalysisTicket};
pub use diagnostic::{Diagnostic, MARKER_END_COLUMN, Marker, RawDiagnostic, Severity};

use thiserror::Error;

/// Errors an analyzer may report instead of diagnostics
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The analyzer could not process the source at all
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),

    /// The analyzer panicked while processing the source
    #[error("analyzer panicked: {0}")]
    Panicked(String),
}

/// Produces diagnostics for a source snapshot
pub trait Analyzer {
    fn analyze(&self, source: &str) -> Result<Vec<RawDiagnostic>, AnalyzerError>;
}
