use super::Color;
use crate::analysis::Severity;
use crate::execution::OutputKind;
use crate::syntax::TokenKind;

/// Colours for every element the playground draws
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // Editor chrome
    pub background: Color,
    pub foreground: Color,
    pub line_number: Color,
    pub line_number_active: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub separator: Color,

    // Markers
    pub error: Color,
    pub warning: Color,

    // Output pane
    pub output_plain: Color,
    pub output_result: Color,

    // Syntax
    pub syntax_keyword: Color,
    pub syntax_predefined: Color,
    pub syntax_string: Color,
    pub syntax_number: Color,
    pub syntax_comment: Color,
    pub syntax_identifier: Color,
}

impl Theme {
    pub fn token(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Keyword => self.syntax_keyword,
            TokenKind::Predefined => self.syntax_predefined,
            TokenKind::String => self.syntax_string,
            TokenKind::Number => self.syntax_number,
            TokenKind::Comment => self.syntax_comment,
            TokenKind::Identifier => self.syntax_identifier,
            TokenKind::Default => self.foreground,
        }
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
        }
    }

    pub fn output(&self, kind: OutputKind) -> Color {
        match kind {
            OutputKind::Plain => self.output_plain,
            OutputKind::Result => self.output_result,
            OutputKind::Error => self.error,
        }
    }

    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark",
            background: Color::rgb(0x28, 0x28, 0x28),
            foreground: Color::rgb(0xeb, 0xdb, 0xb2),
            line_number: Color::rgb(0x7c, 0x6f, 0x64),
            line_number_active: Color::rgb(0xfa, 0xbd, 0x2f),
            status_bar_bg: Color::rgb(0x50, 0x49, 0x45),
            status_bar_fg: Color::rgb(0xeb, 0xdb, 0xb2),
            separator: Color::rgb(0x66, 0x5c, 0x54),
            error: Color::rgb(0xfb, 0x49, 0x34),
            warning: Color::rgb(0xfa, 0xbd, 0x2f),
            output_plain: Color::rgb(0xd5, 0xc4, 0xa1),
            output_result: Color::rgb(0xb8, 0xbb, 0x26),
            syntax_keyword: Color::rgb(0xfb, 0x49, 0x34),
            syntax_predefined: Color::rgb(0x8e, 0xc0, 0x7c),
            syntax_string: Color::rgb(0xb8, 0xbb, 0x26),
            syntax_number: Color::rgb(0xd3, 0x86, 0x9b),
            syntax_comment: Color::rgb(0x92, 0x83, 0x74),
            syntax_identifier: Color::rgb(0x83, 0xa5, 0x98),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord",
            background: Color::rgb(0x2e, 0x34, 0x40),
            foreground: Color::rgb(0xd8, 0xde, 0xe9),
            line_number: Color::rgb(0x4c, 0x56, 0x6a),
            line_number_active: Color::rgb(0x88, 0xc0, 0xd0),
            status_bar_bg: Color::rgb(0x3b, 0x42, 0x52),
            status_bar_fg: Color::rgb(0xe5, 0xe9, 0xf0),
            separator: Color::rgb(0x43, 0x4c, 0x5e),
            error: Color::rgb(0xbf, 0x61, 0x6a),
            warning: Color::rgb(0xeb, 0xcb, 0x8b),
            output_plain: Color::rgb(0xe5, 0xe9, 0xf0),
            output_result: Color::rgb(0xa3, 0xbe, 0x8c),
            syntax_keyword: Color::rgb(0x81, 0xa1, 0xc1),
            syntax_predefined: Color::rgb(0x88, 0xc0, 0xd0),
            syntax_string: Color::rgb(0xa3, 0xbe, 0x8c),
            syntax_number: Color::rgb(0xb4, 0x8e, 0xad),
            syntax_comment: Color::rgb(0x61, 0x6e, 0x88),
            syntax_identifier: Color::rgb(0xd8, 0xde, 0xe9),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}
