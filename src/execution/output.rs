/// Presentation class of an output line, derived from its prefix only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Plain,
    Result,
    Error,
}

impl OutputKind {
    pub fn classify(line: &str) -> Self {
        if line.starts_with("Error:") {
            OutputKind::Error
        } else if line.starts_with("\nResult:") {
            OutputKind::Result
        } else {
            OutputKind::Plain
        }
    }
}

/// Ordered, append-only log of the current run's output
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    lines: Vec<String>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines paired with their presentation class, in append order
    pub fn classified(&self) -> impl Iterator<Item = (OutputKind, &str)> {
        self.lines
            .iter()
            .map(|line| (OutputKind::classify(line), line.as_str()))
    }
}
