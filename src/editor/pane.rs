use tracing::error;

use super::{Buffer, Cursor, EditorSurface};
use crate::analysis::{Marker, Severity};
use crate::syntax::{LanguageDefinition, Token, Tokenizer};

/// The terminal editing widget: text, cursor, scroll, and marker overlay
pub struct EditorPane {
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub scroll_offset: usize,
    markers: Vec<Marker>,
    tokenizer: Option<Tokenizer>,
    tab_width: usize,
}

impl EditorPane {
    pub fn new(text: &str, tab_width: usize) -> Self {
        Self {
            buffer: Buffer::from_text(text),
            cursor: Cursor::new(),
            scroll_offset: 0,
            markers: Vec::new(),
            tokenizer: None,
            tab_width: tab_width.max(1),
        }
    }

    /// Adjust scroll offset to keep cursor visible within viewport
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if self.cursor.line < self.scroll_offset {
            self.scroll_offset = self.cursor.line;
        }
        if viewport_height > 0 && self.cursor.line >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor.line + 1 - viewport_height;
        }
    }

    /// The most severe marker on a 0-based buffer line
    pub fn marker_at(&self, line_idx: usize) -> Option<&Marker> {
        let line = line_idx + 1;
        let mut on_line = self.markers.iter().filter(|m| m.covers(line));
        let first = on_line.next()?;
        if first.severity == Severity::Error {
            return Some(first);
        }
        Some(
            on_line
                .find(|m| m.severity == Severity::Error)
                .unwrap_or(first),
        )
    }

    /// (errors, warnings) currently shown
    pub fn marker_counts(&self) -> (usize, usize) {
        self.markers
            .iter()
            .fold((0, 0), |(errors, warnings), m| match m.severity {
                Severity::Error => (errors + 1, warnings),
                Severity::Warning => (errors, warnings + 1),
            })
    }

    pub fn language(&self) -> Option<&'static str> {
        self.tokenizer.as_ref().map(Tokenizer::language)
    }

    /// Syntax tokens for a line; empty until a language is registered
    pub fn tokens(&self, line: &str) -> Vec<Token> {
        self.tokenizer
            .as_ref()
            .map(|t| t.tokenize(line))
            .unwrap_or_default()
    }

    // Movement

    pub fn move_left(&mut self) {
        self.cursor.move_left();
    }

    pub fn move_right(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.cursor.move_right(line_len);
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up();
        self.clamp_cursor_col();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down(self.buffer.line_count());
        self.clamp_cursor_col();
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.col = self.buffer.line_len(self.cursor.line);
    }

    fn clamp_cursor_col(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.cursor.clamp_col(line_len);
    }

    // Text editing; each returns whether the text changed

    pub fn insert_char(&mut self, ch: char) -> bool {
        self.buffer
            .insert_char(self.cursor.line, self.cursor.col, ch);
        self.cursor.col += 1;
        true
    }

    pub fn insert_tab(&mut self) -> bool {
        let spaces = " ".repeat(self.tab_width);
        self.buffer
            .insert_str(self.cursor.line, self.cursor.col, &spaces);
        self.cursor.col += self.tab_width;
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.buffer
            .insert_newline(self.cursor.line, self.cursor.col);
        self.cursor.line += 1;
        self.cursor.col = 0;
        true
    }

    pub fn delete_char_backward(&mut self) -> bool {
        if self.cursor.col > 0 {
            self.buffer
                .delete_char_backward(self.cursor.line, self.cursor.col);
            self.cursor.col -= 1;
            true
        } else if self.cursor.line > 0 {
            // Join with previous line
            let prev_line_len = self.buffer.line_len(self.cursor.line - 1);
            self.buffer.delete_char_backward(self.cursor.line, 0);
            self.cursor.line -= 1;
            self.cursor.col = prev_line_len;
            true
        } else {
            false
        }
    }

    pub fn delete_char_forward(&mut self) -> bool {
        self.buffer.delete_char(self.cursor.line, self.cursor.col)
    }
}

impl EditorSurface for EditorPane {
    fn text(&self) -> String {
        self.buffer.text()
    }

    fn register_language(&mut self, language: &'static LanguageDefinition) {
        match Tokenizer::new(language) {
            Ok(tokenizer) => self.tokenizer = Some(tokenizer),
            Err(err) => {
                error!(language = language.id, error = %err, "invalid tokenizer rules, colouring disabled")
            }
        }
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Diagnostic, RawDiagnostic};
    use crate::syntax::{RHAI, TokenKind};

    fn marker(line: usize, severity: i64) -> Marker {
        Marker::from(&Diagnostic::from(RawDiagnostic::new(line, "m", severity)))
    }

    #[test]
    fn typing_updates_text_and_cursor() {
        let mut pane = EditorPane::new("", 4);
        pane.insert_char('l');
        pane.insert_char('e');
        pane.insert_char('t');
        pane.insert_newline();
        pane.insert_tab();
        assert_eq!(pane.text(), "let\n    ");
        assert_eq!(pane.cursor, Cursor { line: 1, col: 4 });
    }

    #[test]
    fn backspace_joins_lines() {
        let mut pane = EditorPane::new("ab\ncd", 4);
        pane.move_down();
        assert!(pane.delete_char_backward());
        assert_eq!(pane.text(), "abcd");
        assert_eq!(pane.cursor, Cursor { line: 0, col: 2 });
    }

    #[test]
    fn backspace_at_origin_changes_nothing() {
        let mut pane = EditorPane::new("ab", 4);
        assert!(!pane.delete_char_backward());
        assert_eq!(pane.text(), "ab");
    }

    #[test]
    fn moving_down_clamps_column() {
        let mut pane = EditorPane::new("long line\nab", 4);
        pane.move_to_line_end();
        pane.move_down();
        assert_eq!(pane.cursor, Cursor { line: 1, col: 2 });
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut pane = EditorPane::new("1\n2\n3\n4\n5\n6", 4);
        for _ in 0..5 {
            pane.move_down();
        }
        pane.adjust_scroll(3);
        assert_eq!(pane.scroll_offset, 3);

        pane.cursor.line = 0;
        pane.adjust_scroll(3);
        assert_eq!(pane.scroll_offset, 0);
    }

    #[test]
    fn errors_outrank_warnings_on_a_line() {
        let mut pane = EditorPane::new("a\nb\nc", 4);
        pane.set_markers(vec![marker(2, 2), marker(2, 1), marker(3, 2)]);

        assert_eq!(pane.marker_at(1).map(|m| m.severity), Some(Severity::Error));
        assert_eq!(pane.marker_at(2).map(|m| m.severity), Some(Severity::Warning));
        assert!(pane.marker_at(0).is_none());
        assert_eq!(pane.marker_counts(), (1, 2));
    }

    #[test]
    fn tokens_require_registered_language() {
        let mut pane = EditorPane::new("let x = 1;", 4);
        assert!(pane.tokens("let x = 1;").is_empty());

        pane.register_language(&RHAI);
        assert_eq!(pane.language(), Some("rhai"));
        let tokens = pane.tokens("let x = 1;");
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
    }
}
