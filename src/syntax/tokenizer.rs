use regex::Regex;

use super::language::{LanguageDefinition, TokenKind};

/// A highlighted span within a line, in byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Compiled form of a [`LanguageDefinition`]
#[derive(Debug)]
pub struct Tokenizer {
    language: &'static str,
    rules: Vec<(Regex, TokenKind)>,
}

impl Tokenizer {
    pub fn new(definition: &'static LanguageDefinition) -> Result<Self, regex::Error> {
        let rules = definition
            .rules
            .iter()
            .map(|(pattern, kind)| Regex::new(&format!("^(?:{pattern})")).map(|re| (re, *kind)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            language: definition.id,
            rules,
        })
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Split a single line into non-overlapping tokens, left to right.
    ///
    /// Text that matches no rule is reported as [`TokenKind::Default`].
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        let mut plain_start = None;

        while pos < line.len() {
            let rest = &line[pos..];
            let hit = self.rules.iter().find_map(|(re, kind)| {
                re.find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (m.end(), *kind))
            });

            match hit {
                Some((len, kind)) => {
                    if let Some(start) = plain_start.take() {
                        tokens.push(Token {
                            start,
                            end: pos,
                            kind: TokenKind::Default,
                        });
                    }
                    tokens.push(Token {
                        start: pos,
                        end: pos + len,
                        kind,
                    });
                    pos += len;
                }
                None => {
                    plain_start.get_or_insert(pos);
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if let Some(start) = plain_start {
            tokens.push(Token {
                start,
                end: line.len(),
                kind: TokenKind::Default,
            });
        }

        tokens
    }
}
