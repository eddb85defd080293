//! Colorization driven through the editor.

use pretty_assertions::assert_eq;
use textedit_core::palette::blend_half;
use textedit_core::{
    ColorClass, Coordinates, EditorOptions, LanguageDefinition, PaletteIndex, TextEditor,
};

fn c_editor(text: &str) -> TextEditor {
    let mut e = TextEditor::new();
    e.set_language_definition(&LanguageDefinition::c()).unwrap();
    e.set_text(text);
    e
}

fn in_block_comment(e: &TextEditor, line: usize) -> bool {
    !e.line(line).is_empty() && e.line(line).iter().all(|g| g.multi_line_comment)
}

#[test]
fn test_unterminated_block_comment_runs_to_end() {
    let mut e = c_editor("int a;\n/* open\nint b;\nint c;");
    e.colorize_all();

    assert!(e.line(0).iter().all(|g| !g.multi_line_comment));
    for line in 1..4 {
        assert!(in_block_comment(&e, line), "line {line}");
    }
}

#[test]
fn test_inserted_closer_ends_comment() {
    let mut e = c_editor("int a;\n/* open\nint b;\nint c;");
    e.colorize_all();

    e.set_cursor_position(Coordinates::new(2, 6));
    e.insert_text("*/");
    e.colorize_all();

    assert!(in_block_comment(&e, 2));
    assert!(e.line(3).iter().all(|g| !g.multi_line_comment));
    assert_eq!(e.line(3)[0].class, ColorClass::Keyword);

    // Undoing the closer reopens the comment.
    e.undo(1);
    e.colorize_all();
    assert!(in_block_comment(&e, 3));
}

#[test]
fn test_single_line_comment_flags() {
    let mut e = c_editor("x = 1; // note\ny = 2;");
    e.colorize_all();
    let flags: Vec<bool> = e.line(0).iter().map(|g| g.comment).collect();
    assert_eq!(flags.iter().filter(|&&c| c).count(), 7);
    assert!(!flags[6]);
    assert!(flags[7]);
    assert!(e.line(1).iter().all(|g| !g.comment));
}

#[test]
fn test_colorize_works_in_batches() {
    let mut e = c_editor(&"int x;\n".repeat(24));
    assert_eq!(e.line_count(), 25);

    assert!(e.colorize());
    assert!(e.colorize());
    assert!(!e.colorize());
    assert_eq!(e.colorizer().pending(), None);
    assert!(
        (0..24).all(|line| e.line(line)[0].class == ColorClass::Keyword),
        "every line tokenized"
    );
}

#[test]
fn test_batch_size_override_from_options() {
    let options = EditorOptions {
        language: Some("c".to_string()),
        colorize_batch_lines: Some(100),
        ..EditorOptions::default()
    };
    let mut e = TextEditor::with_options(&options).unwrap();
    e.set_text(&"int x;\n".repeat(50));
    assert!(!e.colorize());
}

#[test]
fn test_glsl_preprocessor_line() {
    let mut e = TextEditor::new();
    e.set_language_definition(&LanguageDefinition::glsl()).unwrap();
    e.set_text("#version 330\nvoid main() {}");
    e.colorize_all();

    let directive = e.line(0);
    assert!(directive.iter().all(|g| g.preprocessor));
    assert_eq!(directive[0].class, ColorClass::Preprocessor);
    assert_eq!(directive[9].class, ColorClass::Number);
    assert_eq!(e.line(1)[0].class, ColorClass::Keyword);
    assert!(e.line(1).iter().all(|g| !g.preprocessor));

    let palette = *e.palette();
    assert_eq!(
        e.glyph_color(&directive[9]),
        blend_half(palette[PaletteIndex::Number], palette[PaletteIndex::Preprocessor])
    );
}

#[test]
fn test_disabled_colorizer_keeps_work_pending() {
    let mut e = c_editor("int x;");
    e.set_colorizer_enabled(false);
    assert!(e.colorize());
    assert_eq!(e.line(0)[0].class, ColorClass::Default);
    assert_eq!(
        e.glyph_color(&e.line(0)[0]),
        e.palette()[PaletteIndex::Default]
    );

    e.set_colorizer_enabled(true);
    e.colorize_all();
    assert_eq!(e.line(0)[0].class, ColorClass::Keyword);
}

#[test]
fn test_without_language_nothing_is_pending() {
    let mut e = TextEditor::new();
    e.set_text("int x;");
    assert!(e.colorizer().pending().is_some());
    assert!(!e.colorize());
    assert_eq!(e.colorizer().pending(), None);
}
