//! The playground language definition
//!
//! Rules are tried in order at every position; the first match wins.

/// Category of a token, used for colouring only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    String,
    Keyword,
    Predefined,
    Number,
    Identifier,
    Default,
}

/// A language id plus its ordered tokenizer rules
#[derive(Debug)]
pub struct LanguageDefinition {
    pub id: &'static str,
    pub extensions: &'static [&'static str],
    pub rules: &'static [(&'static str, TokenKind)],
}

impl LanguageDefinition {
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    }
}

pub static RHAI: LanguageDefinition = LanguageDefinition {
    id: "rhai",
    extensions: &["rhai"],
    rules: &[
        (r"//.*", TokenKind::Comment),
        (r#""(?:[^"\\]|\\.)*"?"#, TokenKind::String),
        (r"'(?:[^'\\]|\\.)*'?", TokenKind::String),
        (
            r"(?:let|const|if|else|switch|do|while|until|loop|for|in|continue|break|return|throw|try|catch|fn|private|import|export|as|global|this|true|false)\b",
            TokenKind::Keyword,
        ),
        (
            r"(?:print|println|p|debug|type_of|is_def_var|is_def_fn)\b",
            TokenKind::Predefined,
        ),
        (
            r"(?:0x[0-9a-fA-F_]+|0b[01_]+|0o[0-7_]+|[0-9][0-9_]*(?:\.[0-9_]+)?(?:[eE][+-]?[0-9]+)?)",
            TokenKind::Number,
        ),
        (r"[A-Za-z_][A-Za-z0-9_]*", TokenKind::Identifier),
    ],
};
