use serde::Serialize;

/// Last column covered by a marker; wide enough to span any realistic line
pub const MARKER_END_COLUMN: usize = 1000;

/// A diagnostic exactly as the analyzer reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiagnostic {
    pub line: usize, // 1-based
    pub message: String,
    pub severity: i64,
}

impl RawDiagnostic {
    pub fn new(line: usize, message: impl Into<String>, severity: i64) -> Self {
        Self {
            line,
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Analyzer code `1` is an error; every other code is a warning
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    pub fn sign(&self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warning => 'W',
        }
    }
}

/// A single issue reported for one source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
    pub severity: Severity,
}

impl From<RawDiagnostic> for Diagnostic {
    fn from(raw: RawDiagnostic) -> Self {
        Self {
            line: raw.line,
            message: raw.message,
            severity: Severity::from_code(raw.severity),
        }
    }
}

/// Editor overlay projection of a [`Diagnostic`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub message: String,
    pub severity: Severity,
}

impl Marker {
    /// Whether the marker covers the given 1-based line
    pub fn covers(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

impl From<&Diagnostic> for Marker {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            start_line: diagnostic.line,
            end_line: diagnostic.line,
            start_column: 1,
            end_column: MARKER_END_COLUMN,
            message: diagnostic.message.clone(),
            severity: diagnostic.severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_one_is_error() {
        assert_eq!(Severity::from_code(1), Severity::Error);
    }

    #[test]
    fn every_other_severity_is_warning() {
        let codes = [i64::MIN, -1, 0, 2, 3, 4, 8, 255, i64::MAX];
        for code in codes.into_iter().chain(-50..=50).filter(|c| *c != 1) {
            assert_eq!(Severity::from_code(code), Severity::Warning, "code {code}");
        }
    }

    #[test]
    fn marker_spans_the_whole_line() {
        // Scenario: analyzer flags line 3
        let diagnostic = Diagnostic::from(RawDiagnostic::new(3, "unexpected token", 1));
        let marker = Marker::from(&diagnostic);

        assert_eq!(
            marker,
            Marker {
                start_line: 3,
                end_line: 3,
                start_column: 1,
                end_column: MARKER_END_COLUMN,
                message: "unexpected token".to_string(),
                severity: Severity::Error,
            }
        );
        assert!(marker.covers(3));
        assert!(!marker.covers(4));
    }

    #[test]
    fn marker_serializes_camel_case() {
        let marker = Marker::from(&Diagnostic::from(RawDiagnostic::new(2, "unused", 2)));
        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["startLine"], 2);
        assert_eq!(json["endColumn"], MARKER_END_COLUMN);
        assert_eq!(json["severity"], "Warning");
    }
}
