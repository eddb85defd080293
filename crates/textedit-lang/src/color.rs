use serde::{Deserialize, Serialize};

/// Highlighting category assigned to a token.
///
/// This is only a class tag. Mapping classes to actual colors is the job of the palette owned by
/// the editor or the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    /// Unclassified text.
    #[default]
    Default,
    /// Language keyword (`if`, `while`, ...).
    Keyword,
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Character literal.
    CharLiteral,
    /// Operator or delimiter.
    Punctuation,
    /// Preprocessor directive.
    Preprocessor,
    /// Identifier not found in any table.
    Identifier,
    /// Identifier found in the known-identifier table (built-in functions, types).
    KnownIdentifier,
    /// Identifier found in the preprocessor-identifier table.
    PreprocIdentifier,
    /// Single-line comment.
    Comment,
    /// Block comment.
    MultiLineComment,
}

impl ColorClass {
    /// All classes, in palette order.
    pub const ALL: [ColorClass; 12] = [
        ColorClass::Default,
        ColorClass::Keyword,
        ColorClass::Number,
        ColorClass::String,
        ColorClass::CharLiteral,
        ColorClass::Punctuation,
        ColorClass::Preprocessor,
        ColorClass::Identifier,
        ColorClass::KnownIdentifier,
        ColorClass::PreprocIdentifier,
        ColorClass::Comment,
        ColorClass::MultiLineComment,
    ];
}
