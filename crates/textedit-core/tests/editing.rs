use pretty_assertions::assert_eq;
use textedit_core::{Coordinates, EditorState, SelectionMode, TextEditor};

fn editor(text: &str) -> TextEditor {
    let mut editor = TextEditor::new();
    editor.set_text(text);
    editor
}

#[test]
fn test_set_text_get_text_round_trip() {
    for text in ["", "one", "one\n", "a\n\nb", "\n\n", "tab\there\n  indent"] {
        let editor = editor(text);
        assert_eq!(editor.get_text(), text);
    }
}

#[test]
fn test_text_lines_keep_empty_lines() {
    let mut e = TextEditor::new();
    e.set_text_lines(&["fn f() {", "", "}"]);
    assert_eq!(e.line_count(), 3);
    assert_eq!(e.text_lines(), vec!["fn f() {", "", "}"]);
    assert_eq!(e.get_text(), "fn f() {\n\n}");
}

#[test]
fn test_cross_line_delete_merges_lines() {
    let mut e = TextEditor::new();
    e.set_text_lines(&["abc", "def"]);
    e.set_selection(
        Coordinates::new(0, 1),
        Coordinates::new(1, 1),
        SelectionMode::Normal,
    );
    e.delete_selection();
    assert_eq!(e.text_lines(), vec!["aef"]);
    assert_eq!(e.line_count(), 1);
}

#[test]
fn test_insert_multi_line_text_moves_cursor() {
    let mut e = editor("head tail");
    e.set_cursor_position(Coordinates::new(0, 5));
    e.insert_text("one\ntwo\n");
    assert_eq!(e.get_text(), "head one\ntwo\ntail");
    assert_eq!(e.cursor_position(), Coordinates::new(2, 0));
    assert!(!e.has_selection());
}

#[test]
fn test_insert_strips_carriage_returns() {
    let mut e = editor("");
    e.insert_text("a\r\nb");
    assert_eq!(e.get_text(), "a\nb");
    e.undo(1);
    assert_eq!(e.get_text(), "");
}

#[test]
fn test_insert_then_undo_restores_state() {
    let mut e = editor("alpha\nbeta\ngamma");
    e.set_selection(
        Coordinates::new(0, 2),
        Coordinates::new(1, 3),
        SelectionMode::Normal,
    );
    e.set_cursor_position(Coordinates::new(1, 3));
    let before_text = e.get_text();
    let before_state = e.state();

    e.insert_text("X\nY");
    assert_eq!(e.get_text(), "alX\nYa\ngamma");

    e.undo(1);
    assert_eq!(e.get_text(), before_text);
    assert_eq!(e.state(), before_state);
}

#[test]
fn test_malformed_bytes_survive_editing() {
    let mut e = TextEditor::new();
    e.set_text_bytes(b"a\xffb");
    e.set_cursor_position(Coordinates::new(0, 2));
    e.insert_bytes(b"\xc3");
    assert_eq!(e.text_bytes(), b"a\xff\xc3b");
    e.backspace();
    assert_eq!(e.text_bytes(), b"a\xffb");
}

#[test]
fn test_text_changed_flag() {
    let mut e = editor("x");
    assert!(e.take_text_changed());
    assert!(!e.is_text_changed());
    e.move_end(false);
    assert!(!e.is_text_changed());
    e.enter_character('y', false);
    assert!(e.take_text_changed());
}

#[test]
fn test_cursor_changed_flag() {
    let mut e = editor("abc");
    e.take_cursor_position_changed();
    e.move_right(1, false, false);
    assert!(e.take_cursor_position_changed());
    assert!(!e.take_cursor_position_changed());
}

#[test]
fn test_set_text_clears_history_and_state() {
    let mut e = editor("abc");
    e.move_end(false);
    e.insert_text("d");
    assert!(e.can_undo());
    e.set_text("new");
    assert!(!e.can_undo());
    assert_eq!(e.state(), EditorState::default());
}

#[test]
fn test_current_line_and_word_under_cursor() {
    let mut e = editor("first line\nsecond line");
    e.set_colorizer_enabled(false);
    e.set_cursor_position(Coordinates::new(1, 2));
    assert_eq!(e.current_line_text(), "second line");
    assert_eq!(e.word_under_cursor(), "second ");
    e.select_word_under_cursor();
    assert_eq!(e.selected_text(), "second ");
}

#[test]
fn test_overwrite_at_line_end_appends() {
    let mut e = editor("ab");
    e.set_overwrite(true);
    e.move_end(false);
    e.enter_character('c', false);
    assert_eq!(e.get_text(), "abc");
}
