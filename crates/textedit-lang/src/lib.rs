#![warn(missing_docs)]
//! `textedit-lang` - declarative language definitions for `textedit-core`.
//!
//! A [`LanguageDefinition`] is plain data: keyword and identifier tables, comment delimiters,
//! and a tokenizer strategy. It stays declarative until it is installed into an editor, at which
//! point [`LanguageDefinition::compile`] turns it into a [`CompiledLanguage`]. Invalid rule
//! patterns are reported there, never later while editing.
//!
//! Two tokenizer strategies exist, and a compiled language holds exactly one of them:
//!
//! - a custom tokenizer function (the built-in C-style scanner, or any [`TokenizeFn`])
//! - an ordered list of `(pattern, ColorClass)` rules where the first match wins
//!
//! ```rust
//! use textedit_lang::{ColorClass, LanguageDefinition};
//!
//! let lua = LanguageDefinition::lua().compile().unwrap();
//! let token = lua.next_token(b"local x = 1").unwrap();
//! assert_eq!(token.class, ColorClass::Identifier);
//! assert_eq!(lua.classify_identifier(b"local", false), ColorClass::Keyword);
//! ```

mod builtin;
mod color;
mod compiled;
mod definition;
mod error;
pub mod tokenize;

pub use color::ColorClass;
pub use compiled::{CUSTOM_BATCH_LINES, CompiledLanguage, CompiledRule, RULES_BATCH_LINES, Tokenizer};
pub use definition::{BuiltinTokenizer, Identifier, LanguageDefinition, TokenRuleSpec};
pub use error::LanguageError;
pub use tokenize::{Token, TokenizeFn};
