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
fn test_newline_copies_only_blanks_before_cursor() {
    let mut e = editor("    ab");
    e.set_cursor_position(Coordinates::new(0, 2));
    e.enter_character('\n', false);
    assert_eq!(e.text_lines(), vec!["  ", "    ab"]);
    assert_eq!(e.cursor_position(), Coordinates::new(1, 2));
}

#[test]
fn test_newline_with_c_keeps_mixed_indentation() {
    let mut e = editor(" \tif (x) {");
    e.set_language_definition(&LanguageDefinition::c()).unwrap();
    e.move_end(false);
    e.enter_character('\n', false);
    assert_eq!(e.text_lines(), vec![" \tif (x) {", " \t"]);
    assert_eq!(e.cursor_position(), Coordinates::new(1, 4));
}

#[test]
fn test_lua_does_not_auto_indent() {
    let mut e = editor("  x = 1");
    e.set_language_definition(&LanguageDefinition::lua()).unwrap();
    e.move_end(false);
    e.enter_character('\n', false);
    assert_eq!(e.get_text(), "  x = 1\n");
    assert_eq!(e.cursor_position(), Coordinates::new(1, 0));
}

#[test]
fn test_indent_partial_last_line() {
    let mut e = editor("a\nb\nc");
    select(&mut e, (0, 1), (1, 1));
    e.set_cursor_position(Coordinates::new(1, 1));
    e.enter_character('\t', false);

    assert_eq!(e.get_text(), "\ta\n\tb\nc");
    assert_eq!(e.selection_start(), Coordinates::new(0, 0));
    assert_eq!(e.selection_end(), Coordinates::new(1, 5));
    assert_eq!(e.cursor_position(), Coordinates::new(1, 5));
}

#[test]
fn test_indent_cursor_at_selection_start_stays_at_start() {
    let mut e = editor("a\nb");
    select(&mut e, (0, 0), (1, 1));
    e.set_cursor_position(Coordinates::new(0, 0));
    e.enter_character('\t', false);
    assert_eq!(e.cursor_position(), Coordinates::new(0, 0));
}

#[test]
fn test_outdent_removes_at_most_one_tab_width_of_spaces() {
    let mut e = editor("      x\n  y\n\tz");
    e.select_all();
    e.enter_character('\t', true);
    assert_eq!(e.get_text(), "  x\ny\nz");

    e.enter_character('\t', true);
    assert_eq!(e.get_text(), "x\ny\nz");
}

#[test]
fn test_outdent_with_nothing_to_remove_records_nothing() {
    let mut e = editor("a\nb");
    e.select_all();
    e.enter_character('\t', true);
    assert_eq!(e.get_text(), "a\nb");
    assert!(!e.can_undo());
}

#[test]
fn test_tab_replaces_single_line_selection() {
    let mut e = editor("abc");
    select(&mut e, (0, 0), (0, 2));
    e.enter_character('\t', false);
    assert_eq!(e.get_text(), "\tc");
    assert_eq!(e.cursor_position(), Coordinates::new(0, 4));
}

#[test]
fn test_indent_follows_tab_size() {
    let mut e = editor("a\nb");
    e.set_tab_size(2);
    e.select_all();
    e.enter_character('\t', false);
    assert_eq!(e.selection_end(), Coordinates::new(1, 3));

    e.undo(1);
    assert_eq!(e.get_text(), "a\nb");
    e.redo(1);
    assert_eq!(e.get_text(), "\ta\n\tb");
}
