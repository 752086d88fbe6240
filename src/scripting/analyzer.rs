use rhai::Engine;

use super::EngineLimits;
use crate::analysis::{Analyzer, AnalyzerError, RawDiagnostic};

/// Severity code reported for parse failures
const PARSE_ERROR: i64 = 1;

/// Reports Rhai parse errors as diagnostics
pub struct RhaiAnalyzer {
    engine: Engine,
}

impl RhaiAnalyzer {
    pub fn new(limits: EngineLimits) -> Self {
        Self {
            engine: limits.build_engine(),
        }
    }
}

impl Default for RhaiAnalyzer {
    fn default() -> Self {
        Self::new(EngineLimits::default())
    }
}

impl Analyzer for RhaiAnalyzer {
    fn analyze(&self, source: &str) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
        match self.engine.compile(source) {
            Ok(_) => Ok(Vec::new()),
            Err(err) => {
                // Positions without a line (end of input) land on the last line
                let line = err
                    .1
                    .line()
                    .unwrap_or_else(|| source.lines().count().max(1));
                Ok(vec![RawDiagnostic::new(line, err.0.to_string(), PARSE_ERROR)])
            }
        }
    }
}
