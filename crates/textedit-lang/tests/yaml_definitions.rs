use pretty_assertions::assert_eq;
use textedit_lang::{
    BuiltinTokenizer, ColorClass, LanguageDefinition, LanguageError, Token, Tokenizer,
};

fn load(name: &str) -> LanguageDefinition {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let yaml = std::fs::read_to_string(path).unwrap();
    LanguageDefinition::from_yaml(&yaml).unwrap()
}

#[test]
fn test_rule_based_definition_from_yaml() {
    let def = load("ini.yaml");
    assert_eq!(def.name, "INI");
    assert_eq!(def.single_line_comment, ";");
    assert!(!def.has_block_comment());
    assert_eq!(def.preproc_char, '#');
    assert_eq!(def.token_rules.len(), 5);

    let ini = def.compile().unwrap();
    assert!(matches!(ini.tokenizer(), Tokenizer::Rules(rules) if rules.len() == 5));
    assert_eq!(
        ini.next_token(b"[server]"),
        Some(Token::new(0, 8, ColorClass::Preprocessor))
    );
    assert_eq!(
        ini.next_token(b"port=80"),
        Some(Token::new(0, 4, ColorClass::Identifier))
    );
}

#[test]
fn test_case_insensitive_lookup_from_yaml() {
    let ini = load("ini.yaml").compile().unwrap();
    assert_eq!(ini.classify_identifier(b"YES", false), ColorClass::Keyword);
    assert_eq!(ini.classify_identifier(b"Include", false), ColorClass::KnownIdentifier);
    assert_eq!(ini.declaration("INCLUDE"), Some("Include another file"));
}

#[test]
fn test_builtin_tokenizer_from_yaml() {
    let def = load("shader.yaml");
    assert_eq!(def.tokenizer, Some(BuiltinTokenizer::CStyle));

    let shader = def.compile().unwrap();
    assert!(matches!(shader.tokenizer(), Tokenizer::Custom(_)));
    assert_eq!(shader.batch_lines(), textedit_lang::CUSTOM_BATCH_LINES);
    assert_eq!(
        shader.next_token(b"  vec3 n;"),
        Some(Token::new(2, 6, ColorClass::Identifier))
    );
    assert_eq!(shader.comment_start(), b"/*");
}

#[test]
fn test_invalid_pattern_surfaces_on_compile_only() {
    let def = LanguageDefinition::from_yaml(
        r#"
name: Broken
token_rules:
  - { pattern: '(unclosed', class: string }
"#,
    )
    .unwrap();

    match def.compile() {
        Err(LanguageError::InvalidRule { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected an invalid rule error, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_is_reported() {
    let err = LanguageDefinition::from_yaml("token_rules: [ { pattern: 1").unwrap_err();
    assert!(matches!(err, LanguageError::Yaml(_)));
}

#[test]
fn test_unknown_color_class_is_rejected() {
    let err = LanguageDefinition::from_yaml(
        "token_rules:\n  - { pattern: 'x', class: sparkly }\n",
    )
    .unwrap_err();
    assert!(matches!(err, LanguageError::Yaml(_)));
}
