//! Syntax colouring driven by a declarative rule table
//!
//! The language definition is static configuration; [`Tokenizer`] is the only
//! code that interprets it.

mod language;
mod tokenizer;

pub use language::{LanguageDefinition, RHAI, TokenKind};
pub use tokenizer::{Token, Tokenizer};
