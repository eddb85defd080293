use crate::compiled::{CompiledLanguage, CompiledRule, Tokenizer};
use crate::tokenize::{self, TokenizeFn};
use crate::{ColorClass, LanguageError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Extra information attached to a known identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identifier {
    /// Human-readable declaration (e.g. `"Built-in function"`), used for tooltips by hosts.
    #[serde(default)]
    pub declaration: String,
}

impl Identifier {
    /// Create an identifier entry with the given declaration text.
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
        }
    }
}

/// An uncompiled `(pattern, class)` tokenizer rule.
///
/// Patterns use the `regex` crate syntax and are matched anchored at the scan position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRuleSpec {
    /// Regex pattern.
    pub pattern: String,
    /// Class given to text matched by this rule.
    pub class: ColorClass,
}

impl TokenRuleSpec {
    /// Create a rule.
    pub fn new(pattern: impl Into<String>, class: ColorClass) -> Self {
        Self {
            pattern: pattern.into(),
            class,
        }
    }
}

/// Built-in tokenizer functions selectable by name from YAML definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTokenizer {
    /// The C-family scanner in [`tokenize::c_style`].
    CStyle,
}

impl BuiltinTokenizer {
    fn function(self) -> TokenizeFn {
        match self {
            BuiltinTokenizer::CStyle => tokenize::c_style,
        }
    }
}

/// Declarative configuration for one language.
///
/// Definitions are plain data and can be built in code, loaded from YAML via
/// [`LanguageDefinition::from_yaml`], or taken from the built-ins ([`LanguageDefinition::c`],
/// [`LanguageDefinition::cpp`], [`LanguageDefinition::glsl`], [`LanguageDefinition::hlsl`],
/// [`LanguageDefinition::lua`]).
///
/// When both a tokenizer function and rules are present the function wins; the rule list is
/// only used when no function is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageDefinition {
    /// Display name.
    pub name: String,
    /// Keyword table.
    pub keywords: HashSet<String>,
    /// Known identifiers (built-in functions, types), keyed by name.
    pub identifiers: HashMap<String, Identifier>,
    /// Identifiers recognized on preprocessor lines.
    pub preproc_identifiers: HashMap<String, Identifier>,
    /// Block comment opener (e.g. `/*`). Empty disables block comments.
    pub comment_start: String,
    /// Block comment closer (e.g. `*/`).
    pub comment_end: String,
    /// Single-line comment marker (e.g. `//`). Empty disables line comments.
    pub single_line_comment: String,
    /// Marker that starts a preprocessor line when it is the first non-blank character.
    pub preproc_char: char,
    /// Whether identifier lookups are case sensitive.
    pub case_sensitive: bool,
    /// Whether Enter copies the current line's leading blanks.
    pub auto_indentation: bool,
    /// Ordered tokenizer rules; the first match wins.
    pub token_rules: Vec<TokenRuleSpec>,
    /// Built-in tokenizer selected by name.
    pub tokenizer: Option<BuiltinTokenizer>,
    /// Custom tokenizer function. Not serializable.
    #[serde(skip)]
    pub tokenize: Option<TokenizeFn>,
}

impl Default for LanguageDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            keywords: HashSet::new(),
            identifiers: HashMap::new(),
            preproc_identifiers: HashMap::new(),
            comment_start: String::new(),
            comment_end: String::new(),
            single_line_comment: String::new(),
            preproc_char: '#',
            case_sensitive: true,
            auto_indentation: true,
            token_rules: Vec::new(),
            tokenizer: None,
            tokenize: None,
        }
    }
}

impl LanguageDefinition {
    /// Create an empty definition with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load a definition from YAML.
    ///
    /// ```rust
    /// use textedit_lang::LanguageDefinition;
    ///
    /// let def = LanguageDefinition::from_yaml(r#"
    /// name: INI
    /// single_line_comment: ";"
    /// token_rules:
    ///   - { pattern: '\[[^\]]*\]', class: keyword }
    ///   - { pattern: '[A-Za-z_][A-Za-z0-9_]*', class: identifier }
    /// "#).unwrap();
    /// assert_eq!(def.token_rules.len(), 2);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, LanguageError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Add keywords.
    pub fn with_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        self.keywords
            .extend(keywords.into_iter().map(str::to_string));
        self
    }

    /// Add known identifiers sharing one declaration text.
    pub fn with_identifiers<'a>(
        mut self,
        names: impl IntoIterator<Item = &'a str>,
        declaration: &str,
    ) -> Self {
        for name in names {
            self.identifiers
                .insert(name.to_string(), Identifier::new(declaration));
        }
        self
    }

    /// Set block and single-line comment delimiters.
    pub fn with_comments(mut self, start: &str, end: &str, single_line: &str) -> Self {
        self.comment_start = start.to_string();
        self.comment_end = end.to_string();
        self.single_line_comment = single_line.to_string();
        self
    }

    /// Append a tokenizer rule.
    pub fn with_rule(mut self, pattern: &str, class: ColorClass) -> Self {
        self.token_rules.push(TokenRuleSpec::new(pattern, class));
        self
    }

    /// Use a custom tokenizer function.
    pub fn with_tokenizer(mut self, tokenize: TokenizeFn) -> Self {
        self.tokenize = Some(tokenize);
        self
    }

    /// Returns `true` if block comment delimiters are configured.
    pub fn has_block_comment(&self) -> bool {
        !self.comment_start.is_empty() && !self.comment_end.is_empty()
    }

    /// Compile the definition: resolve the tokenizer strategy and compile rule patterns.
    ///
    /// Case-insensitive languages get their tables upper-cased here so lookups can fold the
    /// token once.
    pub fn compile(&self) -> Result<CompiledLanguage, LanguageError> {
        if self.comment_start.is_empty() != self.comment_end.is_empty() {
            return Err(LanguageError::UnbalancedBlockComment);
        }

        let tokenizer = match self.tokenize.or(self.tokenizer.map(BuiltinTokenizer::function)) {
            Some(function) => Tokenizer::Custom(function),
            None => Tokenizer::Rules(
                self.token_rules
                    .iter()
                    .map(|rule| CompiledRule::new(&rule.pattern, rule.class))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        let fold = |name: &String| {
            if self.case_sensitive {
                name.clone()
            } else {
                name.to_ascii_uppercase()
            }
        };

        let compiled = CompiledLanguage {
            name: self.name.clone(),
            keywords: self.keywords.iter().map(fold).collect(),
            identifiers: self
                .identifiers
                .iter()
                .map(|(k, v)| (fold(k), v.clone()))
                .collect(),
            preproc_identifiers: self
                .preproc_identifiers
                .iter()
                .map(|(k, v)| (fold(k), v.clone()))
                .collect(),
            comment_start: self.comment_start.clone().into_bytes(),
            comment_end: self.comment_end.clone().into_bytes(),
            single_line_comment: self.single_line_comment.clone().into_bytes(),
            preproc_char: self.preproc_char,
            case_sensitive: self.case_sensitive,
            auto_indentation: self.auto_indentation,
            tokenizer,
        };

        tracing::debug!(
            language = %compiled.name,
            strategy = compiled.tokenizer.kind(),
            keywords = compiled.keywords.len(),
            "compiled language definition"
        );

        Ok(compiled)
    }
}
