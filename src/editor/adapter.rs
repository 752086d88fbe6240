use tracing::debug;

use super::EditorSurface;
use crate::analysis::{AnalysisCoordinator, Analyzer, Marker};
use crate::syntax::LanguageDefinition;

/// Connects an editing widget to the analysis loop.
///
/// Owns the authoritative copy of the document text; the widget reports every
/// edit through [`EditorAdapter::on_change`].
pub struct EditorAdapter<S, A> {
    surface: S,
    language: &'static LanguageDefinition,
    document: String,
    analysis: AnalysisCoordinator<A>,
}

impl<S: EditorSurface, A: Analyzer> EditorAdapter<S, A> {
    pub fn new(surface: S, analyzer: A, language: &'static LanguageDefinition) -> Self {
        Self {
            surface,
            language,
            document: String::new(),
            analysis: AnalysisCoordinator::new(analyzer),
        }
    }

    /// Register the language and analyze the starting document
    pub fn mount(&mut self) {
        self.surface.register_language(self.language);
        let text = self.surface.text();
        debug!(language = self.language.id, bytes = text.len(), "editor mounted");
        self.on_change(text);
    }

    pub fn on_change(&mut self, text: String) {
        self.document = text;
        if let Some(markers) = self.analysis.refresh(&self.document) {
            self.apply_markers(markers);
        }
    }

    pub fn apply_markers(&mut self, markers: Vec<Marker>) {
        self.surface.set_markers(markers);
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::analysis::{AnalyzerError, RawDiagnostic, Severity};
    use crate::syntax::RHAI;

    #[derive(Default)]
    struct FakeSurface {
        text: String,
        language: Option<&'static str>,
        markers: Vec<Marker>,
        marker_updates: usize,
    }

    impl EditorSurface for FakeSurface {
        fn text(&self) -> String {
            self.text.clone()
        }

        fn register_language(&mut self, language: &'static LanguageDefinition) {
            self.language = Some(language.id);
        }

        fn set_markers(&mut self, markers: Vec<Marker>) {
            self.markers = markers;
            self.marker_updates += 1;
        }
    }

    /// Flags any line containing `bad`; fails whenever `fail` is set
    struct Switchable {
        fail: Rc<Cell<bool>>,
    }

    impl Analyzer for Switchable {
        fn analyze(&self, source: &str) -> Result<Vec<RawDiagnostic>, AnalyzerError> {
            if self.fail.get() {
                return Err(AnalyzerError::Unavailable("offline".to_string()));
            }
            Ok(source
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains("bad"))
                .map(|(idx, _)| RawDiagnostic::new(idx + 1, "unexpected token", 1))
                .collect())
        }
    }

    fn adapter(text: &str) -> (EditorAdapter<FakeSurface, Switchable>, Rc<Cell<bool>>) {
        let fail = Rc::new(Cell::new(false));
        let surface = FakeSurface {
            text: text.to_string(),
            ..FakeSurface::default()
        };
        let analyzer = Switchable {
            fail: Rc::clone(&fail),
        };
        (EditorAdapter::new(surface, analyzer, &RHAI), fail)
    }

    #[test]
    fn mount_registers_language_and_analyzes() {
        let (mut editor, _) = adapter("ok\nok\nbad");
        editor.mount();

        assert_eq!(editor.surface().language, Some("rhai"));
        assert_eq!(editor.document(), "ok\nok\nbad");
        let markers = &editor.surface().markers;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].start_line, 3);
        assert_eq!(markers[0].severity, Severity::Error);
    }

    #[test]
    fn on_change_replaces_markers() {
        let (mut editor, _) = adapter("bad");
        editor.mount();
        editor.on_change("fine".to_string());

        assert_eq!(editor.document(), "fine");
        assert!(editor.surface().markers.is_empty());
        assert_eq!(editor.surface().marker_updates, 2);
    }

    #[test]
    fn analyzer_failure_keeps_previous_markers() {
        let (mut editor, fail) = adapter("bad");
        editor.mount();
        let before = editor.surface().markers.clone();

        fail.set(true);
        editor.on_change("now fine".to_string());

        assert_eq!(editor.document(), "now fine");
        assert_eq!(editor.surface().markers, before);
        assert_eq!(editor.surface().marker_updates, 1);
    }
}
