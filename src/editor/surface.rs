use crate::analysis::Marker;
use crate::syntax::LanguageDefinition;

/// What the orchestration layer needs from an editing widget
pub trait EditorSurface {
    /// Full current text
    fn text(&self) -> String;

    fn register_language(&mut self, language: &'static LanguageDefinition);

    /// Replace the diagnostic overlay
    fn set_markers(&mut self, markers: Vec<Marker>);
}
