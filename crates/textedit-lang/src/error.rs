use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or compiling a language definition.
pub enum LanguageError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid token rule '{pattern}': {source}")]
    /// A token rule pattern failed to compile.
    InvalidRule {
        /// The rule pattern as written in the definition.
        pattern: String,
        /// The regex compiler error.
        #[source]
        source: regex::Error,
    },

    #[error("block comment delimiters must be both set or both empty")]
    /// Only one of the block comment start/end delimiters was configured.
    UnbalancedBlockComment,
}
