//! Install-time form of a [`LanguageDefinition`](crate::LanguageDefinition).

use crate::tokenize::{Token, TokenizeFn};
use crate::{ColorClass, Identifier, LanguageError};
use regex::bytes::Regex;
use std::collections::{HashMap, HashSet};

/// Lines re-tokenized per pass with a rule-list tokenizer.
pub const RULES_BATCH_LINES: usize = 10_000;

/// Lines re-tokenized per pass with a character-at-a-time tokenizer function.
pub const CUSTOM_BATCH_LINES: usize = 10;

/// One compiled `(pattern, class)` rule, anchored at the scan position.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    class: ColorClass,
}

impl CompiledRule {
    /// Compile `pattern` so it only matches at the start of the input.
    pub fn new(pattern: &str, class: ColorClass) -> Result<Self, LanguageError> {
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            LanguageError::InvalidRule {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self { regex, class })
    }

    /// Color class given to matches of this rule.
    pub fn class(&self) -> ColorClass {
        self.class
    }

    /// Length of the non-empty match at the start of `input`, if any.
    pub fn match_len(&self, input: &[u8]) -> Option<usize> {
        self.regex
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// Tokenizer strategy, selected once when the definition is compiled.
#[derive(Debug, Clone)]
pub enum Tokenizer {
    /// Character-at-a-time tokenizer function.
    Custom(TokenizeFn),
    /// Ordered rules; the first rule that matches wins.
    Rules(Vec<CompiledRule>),
}

impl Tokenizer {
    /// Produce the next token at the start of `input`.
    pub fn next_token(&self, input: &[u8]) -> Option<Token> {
        match self {
            Tokenizer::Custom(function) => function(input),
            Tokenizer::Rules(rules) => rules.iter().find_map(|rule| {
                rule.match_len(input)
                    .map(|len| Token::new(0, len, rule.class()))
            }),
        }
    }

    /// Default number of lines tokenized per colorizer pass.
    pub fn batch_lines(&self) -> usize {
        match self {
            Tokenizer::Custom(_) => CUSTOM_BATCH_LINES,
            Tokenizer::Rules(_) => RULES_BATCH_LINES,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Tokenizer::Custom(_) => "custom",
            Tokenizer::Rules(_) => "rules",
        }
    }
}

/// A language definition ready for use by the colorizer.
#[derive(Debug, Clone)]
pub struct CompiledLanguage {
    pub(crate) name: String,
    pub(crate) keywords: HashSet<String>,
    pub(crate) identifiers: HashMap<String, Identifier>,
    pub(crate) preproc_identifiers: HashMap<String, Identifier>,
    pub(crate) comment_start: Vec<u8>,
    pub(crate) comment_end: Vec<u8>,
    pub(crate) single_line_comment: Vec<u8>,
    pub(crate) preproc_char: char,
    pub(crate) case_sensitive: bool,
    pub(crate) auto_indentation: bool,
    pub(crate) tokenizer: Tokenizer,
}

impl CompiledLanguage {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block comment opener, empty when the language has none.
    pub fn comment_start(&self) -> &[u8] {
        &self.comment_start
    }

    /// Block comment closer, empty when the language has none.
    pub fn comment_end(&self) -> &[u8] {
        &self.comment_end
    }

    /// Single-line comment marker, empty when the language has none.
    pub fn single_line_comment(&self) -> &[u8] {
        &self.single_line_comment
    }

    /// Preprocessor line marker.
    pub fn preproc_char(&self) -> char {
        self.preproc_char
    }

    /// Whether identifier lookups are case sensitive.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether Enter copies the leading blanks of the current line.
    pub fn auto_indentation(&self) -> bool {
        self.auto_indentation
    }

    /// Tokenizer strategy.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Next token at the start of `input`; see [`Tokenizer::next_token`].
    pub fn next_token(&self, input: &[u8]) -> Option<Token> {
        self.tokenizer.next_token(input)
    }

    /// Default colorizer batch size for this language's tokenizer.
    pub fn batch_lines(&self) -> usize {
        self.tokenizer.batch_lines()
    }

    /// Reclassify an identifier token.
    ///
    /// Outside preprocessor lines the keyword table is consulted first, then known identifiers,
    /// then preprocessor identifiers. On a preprocessor line only the preprocessor table applies.
    pub fn classify_identifier(&self, text: &[u8], in_preproc: bool) -> ColorClass {
        let mut id = String::from_utf8_lossy(text).into_owned();
        if !self.case_sensitive {
            id.make_ascii_uppercase();
        }

        if in_preproc {
            if self.preproc_identifiers.contains_key(&id) {
                ColorClass::PreprocIdentifier
            } else {
                ColorClass::Identifier
            }
        } else if self.keywords.contains(&id) {
            ColorClass::Keyword
        } else if self.identifiers.contains_key(&id) {
            ColorClass::KnownIdentifier
        } else if self.preproc_identifiers.contains_key(&id) {
            ColorClass::PreprocIdentifier
        } else {
            ColorClass::Identifier
        }
    }

    /// Declaration text of a known identifier, for hover tooltips.
    pub fn declaration(&self, name: &str) -> Option<&str> {
        let key = if self.case_sensitive {
            name.to_string()
        } else {
            name.to_ascii_uppercase()
        };
        self.identifiers
            .get(&key)
            .or_else(|| self.preproc_identifiers.get(&key))
            .map(|id| id.declaration.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageDefinition;

    #[test]
    fn test_first_matching_rule_wins() {
        let lang = LanguageDefinition::new("t")
            .with_rule("[a-z]+", ColorClass::Identifier)
            .with_rule("[a-z]+[0-9]+", ColorClass::Number)
            .compile()
            .unwrap();

        // The longer second rule would match more, but order decides.
        let token = lang.next_token(b"abc123").unwrap();
        assert_eq!(token, Token::new(0, 3, ColorClass::Identifier));
    }

    #[test]
    fn test_rules_are_anchored() {
        let lang = LanguageDefinition::new("t")
            .with_rule("[0-9]+", ColorClass::Number)
            .compile()
            .unwrap();
        assert_eq!(lang.next_token(b"x 12"), None);
    }

    #[test]
    fn test_empty_matches_are_ignored() {
        let lang = LanguageDefinition::new("t")
            .with_rule("[0-9]*", ColorClass::Number)
            .compile()
            .unwrap();
        assert_eq!(lang.next_token(b"abc"), None);
    }

    #[test]
    fn test_batch_size_per_strategy() {
        assert_eq!(LanguageDefinition::c().compile().unwrap().batch_lines(), 10);
        assert_eq!(
            LanguageDefinition::lua().compile().unwrap().batch_lines(),
            10_000
        );
    }

    #[test]
    fn test_preproc_line_ignores_keywords() {
        let lang = LanguageDefinition::c().compile().unwrap();
        assert_eq!(lang.classify_identifier(b"include", true), ColorClass::PreprocIdentifier);
        assert_eq!(lang.classify_identifier(b"int", true), ColorClass::Identifier);
        assert_eq!(lang.classify_identifier(b"int", false), ColorClass::Keyword);
        assert_eq!(lang.classify_identifier(b"printf", false), ColorClass::KnownIdentifier);
    }
}
