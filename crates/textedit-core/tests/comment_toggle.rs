use pretty_assertions::assert_eq;
use textedit_core::{Coordinates, LanguageDefinition, SelectionMode, TextEditor};

fn editor(text: &str) -> TextEditor {
    let mut editor = TextEditor::new();
    editor.set_text(text);
    editor
}

fn select(editor: &mut TextEditor, from: (usize, usize), to: (usize, usize)) {
    editor.set_selection(
        Coordinates::new(from.0, from.1),
        Coordinates::new(to.0, to.1),
        SelectionMode::Normal,
    );
}

#[test]
fn test_toggle_twice_is_identity() {
    let text = "fn main() {\n    let x = 1;\n\n\tlet y = 2;\n}";
    let mut e = editor(text);
    select(&mut e, (0, 0), (4, 1));

    e.toggle_comment(false);
    assert_eq!(
        e.get_text(),
        "//fn main() {\n    //let x = 1;\n\n\t//let y = 2;\n//}"
    );
    e.toggle_comment(false);
    assert_eq!(e.get_text(), text);
}

#[test]
fn test_uncomment_requires_every_line() {
    let mut e = editor("// a\n// b\nc");
    select(&mut e, (0, 0), (1, 4));
    e.toggle_comment(false);
    assert_eq!(e.get_text(), " a\n b\nc");
}

#[test]
fn test_single_line_uses_cursor_line() {
    let mut e = editor("one\ntwo");
    e.set_cursor_position(Coordinates::new(1, 3));
    e.toggle_comment(false);
    assert_eq!(e.get_text(), "one\n//two");
    assert_eq!(e.cursor_position(), Coordinates::new(1, 5));

    e.toggle_comment(false);
    assert_eq!(e.get_text(), "one\ntwo");
    assert_eq!(e.cursor_position(), Coordinates::new(1, 3));
}

#[test]
fn test_empty_line_is_noop() {
    let mut e = editor("a\n\nb");
    e.set_cursor_position(Coordinates::new(1, 0));
    e.toggle_comment(false);
    e.toggle_comment(true);
    assert_eq!(e.get_text(), "a\n\nb");
    assert!(!e.can_undo());
}

#[test]
fn test_line_comment_is_one_undo_step() {
    let mut e = editor("a\nb\nc");
    e.select_all();
    e.toggle_comment(false);
    assert_eq!(e.undo_log().len(), 1);
    e.undo(1);
    assert_eq!(e.get_text(), "a\nb\nc");
    e.redo(1);
    assert_eq!(e.get_text(), "//a\n//b\n//c");
}

#[test]
fn test_lua_block_markers() {
    let mut e = editor("print(1)");
    e.set_language_definition(&LanguageDefinition::lua()).unwrap();
    e.select_all();
    e.toggle_comment(true);
    assert_eq!(e.get_text(), "--[[print(1)]]");
    e.toggle_comment(true);
    assert_eq!(e.get_text(), "print(1)");
}

#[test]
fn test_language_without_markers_is_noop() {
    let mut e = editor("key = value");
    let plain = LanguageDefinition::new("plain");
    e.set_language_definition(&plain).unwrap();
    e.select_all();
    e.toggle_comment(false);
    e.toggle_comment(true);
    assert_eq!(e.get_text(), "key = value");
}

#[test]
fn test_block_wrap_spanning_lines() {
    let mut e = editor("a\nb\nc");
    select(&mut e, (0, 1), (2, 0));
    e.toggle_comment(true);
    assert_eq!(e.get_text(), "a/*\nb\n*/c");
    assert_eq!(e.cursor_position(), Coordinates::new(2, 2));
    e.undo(1);
    assert_eq!(e.get_text(), "a\nb\nc");
}
