//! Editor configuration.

use crate::buffer::{DEFAULT_TAB_SIZE, MAX_TAB_SIZE};
use serde::{Deserialize, Serialize};
use textedit_lang::{LanguageDefinition, LanguageError};
use thiserror::Error;

/// Errors produced while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid editor options: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Tab size outside `1..=32`.
    #[error("tab size {0} is outside 1..=32")]
    InvalidTabSize(usize),
    /// The configured language name is not a built-in.
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
    /// The language definition failed to compile.
    #[error(transparent)]
    Language(#[from] LanguageError),
}

/// Session options.
///
/// ```rust
/// use textedit_core::EditorOptions;
///
/// let options = EditorOptions::from_yaml("tab_size: 2\nlanguage: lua\n").unwrap();
/// assert_eq!(options.tab_size, 2);
/// assert!(options.colorizer_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Columns per tab stop.
    pub tab_size: usize,
    /// Reject mutations.
    pub read_only: bool,
    /// Run the colorizer.
    pub colorizer_enabled: bool,
    /// Typed characters replace the character under the cursor.
    pub overwrite: bool,
    /// Hint for renderers to draw whitespace markers.
    pub show_whitespaces: bool,
    /// Seconds within which a third click counts as a triple click.
    pub double_click_time: f64,
    /// Lines tokenized per colorizer pass. `None` picks a size from the tokenizer kind.
    pub colorize_batch_lines: Option<usize>,
    /// Built-in language name (`c`, `c++`, `glsl`, `hlsl`, `lua`).
    pub language: Option<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            read_only: false,
            colorizer_enabled: true,
            overwrite: false,
            show_whitespaces: true,
            double_click_time: 0.30,
            colorize_batch_lines: None,
            language: None,
        }
    }
}

impl EditorOptions {
    /// Parse and validate options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges and resolve the language name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TAB_SIZE).contains(&self.tab_size) {
            return Err(ConfigError::InvalidTabSize(self.tab_size));
        }
        self.language_definition()?;
        Ok(())
    }

    /// The built-in definition named by [`EditorOptions::language`], if any.
    pub fn language_definition(&self) -> Result<Option<LanguageDefinition>, ConfigError> {
        match &self.language {
            None => Ok(None),
            Some(name) => LanguageDefinition::builtin(name)
                .map(Some)
                .ok_or_else(|| ConfigError::UnknownLanguage(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let options = EditorOptions::from_yaml("{}").unwrap();
        assert_eq!(options, EditorOptions::default());
    }

    #[test]
    fn test_tab_size_out_of_range() {
        let err = EditorOptions::from_yaml("tab_size: 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTabSize(0)));
        let err = EditorOptions::from_yaml("tab_size: 33").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTabSize(33)));
    }

    #[test]
    fn test_unknown_language() {
        let err = EditorOptions::from_yaml("language: cobol").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLanguage(ref name) if name == "cobol"));
    }

    #[test]
    fn test_every_builtin_name_resolves() {
        for name in ["c", "C++", "cpp", "glsl", "HLSL", "lua"] {
            let options = EditorOptions::from_yaml(&format!("language: {name}")).unwrap();
            assert!(options.language_definition().unwrap().is_some(), "{name}");
        }
    }

    #[test]
    fn test_batch_override() {
        let options = EditorOptions::from_yaml("colorize_batch_lines: 50\nread_only: true").unwrap();
        assert_eq!(options.colorize_batch_lines, Some(50));
        assert!(options.read_only);
    }
}
