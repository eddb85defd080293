//! Buffer mutations.
//!
//! Every public operation here produces exactly one [`UndoRecord`]. Mutating a read-only
//! session is a caller bug and panics.

use crate::buffer::{
    Glyph, glyphs, is_blank, is_continuation, is_space, prev_char_start, sequence_len,
};
use crate::coords::{Coordinates, TextPosition};
use crate::editor::TextEditor;
use crate::host::Clipboard;
use crate::selection::SelectionMode;
use crate::undo::UndoRecord;

const FALLBACK_BLOCK_COMMENT: (&[u8], &[u8]) = (b"/*", b"*/");
const FALLBACK_LINE_COMMENT: &[u8] = b"//";

fn char_count(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| !is_continuation(b)).count()
}

impl TextEditor {
    fn assert_writable(&self) {
        assert!(!self.read_only, "mutation of a read-only editor");
    }

    fn push_record(&mut self, mut record: UndoRecord) {
        record.after = self.state;
        self.undo_log.push(record);
    }

    /// Collapse the cursor, selection and interactive pair onto `at`.
    fn collapse_to(&mut self, at: Coordinates) {
        self.set_cursor_position(at);
        self.interactive_start = at;
        self.interactive_end = at;
        self.set_selection(at, at, SelectionMode::Normal);
    }

    /// Delete the selection, recording it as removed text in `record`.
    fn take_selection(&mut self, record: &mut UndoRecord) {
        let start = self.state.selection_start;
        let end = self.state.selection_end;
        if start >= end {
            return;
        }
        let (from, to) = (self.buffer.position(start), self.buffer.position(end));
        record.set_removed(self.buffer.bytes_between(from, to), from, to);
        self.buffer.delete_between(from, to);
        self.collapse_to(start);
        self.invalidate_lines(start.line, start.line);
    }

    /// Insert `text` at the cursor, replacing the selection.
    pub fn insert_text(&mut self, text: &str) {
        self.insert_bytes(text.as_bytes());
    }

    /// Insert raw bytes at the cursor, replacing the selection.
    ///
    /// Malformed UTF-8 is kept as one character per byte. `\r` is dropped, so text made only of
    /// carriage returns records nothing.
    pub fn insert_bytes(&mut self, text: &[u8]) {
        self.assert_writable();
        let text: Vec<u8> = text.iter().copied().filter(|&b| b != b'\r').collect();
        if text.is_empty() {
            return;
        }

        let mut record = UndoRecord::new(self.state);
        self.take_selection(&mut record);

        let at = self.cursor_position();
        let from = self.buffer.position(at);
        let (to, created) = self.buffer.insert_bytes_at(from, &text);
        record.set_added(text, from, to);

        self.collapse_to(self.buffer.coordinates(to));
        self.invalidate_lines(at.line, at.line + created);
        self.push_record(record);
    }

    /// Delete the selection as one undoable edit. Does nothing without a selection.
    pub fn delete_selection(&mut self) {
        self.assert_writable();
        if !self.has_selection() {
            return;
        }
        let mut record = UndoRecord::new(self.state);
        self.take_selection(&mut record);
        self.push_record(record);
    }

    /// Type one character.
    ///
    /// `\n` splits the line and copies the leading indentation when the language allows it.
    /// `\t` with a multi-line selection indents every selected line, or outdents them when
    /// `shift` is held. In overwrite mode the character under the cursor is replaced.
    pub fn enter_character(&mut self, ch: char, shift: bool) {
        self.assert_writable();
        if ch == '\r' {
            return;
        }

        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            if ch == '\t' && self.state.selection_start.line != self.state.selection_end.line {
                self.shift_lines(shift, record);
                return;
            }
            self.take_selection(&mut record);
        }

        let at = self.cursor_position();
        let index = self.buffer.column_to_index(at);
        let from = TextPosition::new(at.line, index);

        let added: Vec<u8> = if ch == '\n' {
            let auto_indent = self
                .language
                .as_ref()
                .is_none_or(|language| language.auto_indentation());
            let mut text = vec![b'\n'];
            if auto_indent {
                text.extend(
                    self.buffer.line(at.line)[..index]
                        .iter()
                        .map(|g| g.ch)
                        .take_while(|&b| is_blank(b)),
                );
            }
            text
        } else {
            let mut utf8 = [0; 4];
            let encoded = ch.encode_utf8(&mut utf8).as_bytes().to_vec();

            let line = self.buffer.line(at.line);
            if self.overwrite && record.removed.is_empty() && index < line.len() {
                let stop = TextPosition::new(at.line, index + sequence_len(line, index));
                record.set_removed(self.buffer.bytes_between(from, stop), from, stop);
                self.buffer.delete_between(from, stop);
            }
            encoded
        };

        let (to, created) = self.buffer.insert_bytes_at(from, &added);
        record.set_added(added, from, to);

        self.collapse_to(self.buffer.coordinates(to));
        self.invalidate_lines(at.line, at.line + created);
        self.push_record(record);
    }

    /// Indent (or outdent) every line touched by the selection.
    ///
    /// A selection ending at column 0 does not include that last line.
    fn shift_lines(&mut self, outdent: bool, mut record: UndoRecord) {
        let sel_start = self.state.selection_start;
        let sel_end = self.state.selection_end;

        let first = sel_start.line;
        let mut last = sel_end.line;
        if sel_end.column == 0 && last > 0 {
            last -= 1;
        }
        let last = last.min(self.buffer.line_count() - 1).max(first);

        let start = Coordinates::new(first, 0);
        let from = TextPosition::new(first, 0);
        let before_end = TextPosition::new(last, self.buffer.line(last).len());
        let before = self.buffer.bytes_between(from, before_end);

        let tab_size = self.buffer.tab_size();
        let mut modified = false;
        for i in first..=last {
            let line = self.buffer.line_mut(i);
            if outdent {
                let n = match line.first() {
                    Some(g) if g.ch == b'\t' => 1,
                    _ => line.iter().take(tab_size).take_while(|g| g.ch == b' ').count(),
                };
                if n > 0 {
                    line.drain(..n);
                    modified = true;
                }
            } else {
                line.splice(0..0, glyphs(b"\t"));
                modified = true;
            }
        }
        if !modified {
            return;
        }

        let after_to = TextPosition::new(last, self.buffer.line(last).len());
        record.set_removed(before, from, before_end);
        record.set_added(self.buffer.bytes_between(from, after_to), from, after_to);

        let after_end = self.buffer.coordinates(after_to);
        let new_end = if sel_end.column != 0 {
            after_end
        } else {
            Coordinates::new(sel_end.line, 0)
        };
        let cursor = if self.state.cursor <= sel_start {
            start
        } else {
            new_end
        };
        self.state.selection_start = start;
        self.state.selection_end = new_end;
        self.interactive_start = start;
        self.interactive_end = new_end;
        self.set_cursor_position(cursor);

        self.invalidate_lines(first, last);
        self.push_record(record);
    }

    /// Delete the character before the cursor, joining with the previous line at column 0.
    pub fn backspace(&mut self) {
        self.assert_writable();
        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            self.take_selection(&mut record);
        } else {
            let pos = self.cursor_position();
            let cursor = if pos.column == 0 {
                if pos.line == 0 {
                    return;
                }
                let prev = pos.line - 1;
                let joint = Coordinates::new(prev, self.buffer.line_max_column(prev));
                record.set_removed(
                    b"\n".to_vec(),
                    TextPosition::new(prev, self.buffer.line(prev).len()),
                    TextPosition::new(pos.line, 0),
                );
                self.buffer.join_with_previous(pos.line);
                joint
            } else {
                let to = self.buffer.position(pos);
                let start_index = prev_char_start(self.buffer.line(pos.line), to.index);
                let from = TextPosition::new(pos.line, start_index);
                let start = self.buffer.coordinates(from);
                record.set_removed(self.buffer.bytes_between(from, to), from, to);
                self.buffer.delete_between(from, to);
                start
            };
            self.collapse_to(cursor);
            self.invalidate_lines(cursor.line, cursor.line);
        }

        self.push_record(record);
    }

    /// Delete the character under the cursor, joining with the next line at the line end.
    pub fn delete(&mut self) {
        self.assert_writable();
        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            self.take_selection(&mut record);
        } else {
            let pos = self.cursor_position();
            let index = self.buffer.column_to_index(pos);
            if index >= self.buffer.line(pos.line).len() {
                if pos.line + 1 >= self.buffer.line_count() {
                    return;
                }
                record.set_removed(
                    b"\n".to_vec(),
                    TextPosition::new(pos.line, index),
                    TextPosition::new(pos.line + 1, 0),
                );
                self.buffer.join_with_previous(pos.line + 1);
            } else {
                let stop = index + sequence_len(self.buffer.line(pos.line), index);
                let (from, to) = (TextPosition::new(pos.line, index), TextPosition::new(pos.line, stop));
                record.set_removed(self.buffer.bytes_between(from, to), from, to);
                self.buffer.delete_between(from, to);
            }
            self.collapse_to(pos);
            self.invalidate_lines(pos.line, pos.line);
        }

        self.push_record(record);
    }

    fn block_comment_markers(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        match &self.language {
            None => Some((
                FALLBACK_BLOCK_COMMENT.0.to_vec(),
                FALLBACK_BLOCK_COMMENT.1.to_vec(),
            )),
            Some(language) => {
                let (start, end) = (language.comment_start(), language.comment_end());
                (!start.is_empty() && !end.is_empty()).then(|| (start.to_vec(), end.to_vec()))
            }
        }
    }

    fn line_comment_marker(&self) -> Option<Vec<u8>> {
        match &self.language {
            None => Some(FALLBACK_LINE_COMMENT.to_vec()),
            Some(language) => {
                let marker = language.single_line_comment();
                (!marker.is_empty()).then(|| marker.to_vec())
            }
        }
    }

    /// Comment or uncomment code.
    ///
    /// In block mode the selection is wrapped in (or unwrapped from) the language's block
    /// markers; with no selection an empty marker pair is inserted. Otherwise every touched
    /// line gets the single-line marker before its first non-blank character, unless all of
    /// them already carry it, in which case it is stripped.
    pub fn toggle_comment(&mut self, block: bool) {
        self.assert_writable();

        let cursor = self.cursor_position();
        let (mut first, mut last) = (cursor.line, cursor.line);
        if self.state.selection_start.line != self.state.selection_end.line {
            first = self.state.selection_start.line.min(self.state.selection_end.line);
            last = self.state.selection_start.line.max(self.state.selection_end.line);
        }
        let last = last.min(self.buffer.line_count() - 1);
        if first > last || (first == last && self.buffer.line(first).is_empty()) {
            return;
        }

        if block {
            self.toggle_block_comment();
        } else {
            self.toggle_line_comment(first, last);
        }
    }

    fn toggle_block_comment(&mut self) {
        let Some((open, close)) = self.block_comment_markers() else {
            return;
        };
        let mut record = UndoRecord::new(self.state);

        if !self.has_selection() {
            let at = self.cursor_position();
            let mut text = open.clone();
            text.push(b' ');
            text.extend_from_slice(&close);

            let from = self.buffer.position(at);
            let (to, _) = self.buffer.insert_bytes_at(from, &text);
            record.set_added(text, from, to);

            let inside = TextPosition::new(at.line, from.index + open.len());
            self.collapse_to(self.buffer.coordinates(inside));
            self.invalidate_lines(at.line, at.line);
            self.push_record(record);
            return;
        }

        let start = self.state.selection_start;
        let end = self.state.selection_end;
        let (from, to) = (self.buffer.position(start), self.buffer.position(end));
        let selected = self.buffer.bytes_between(from, to);

        let wrapped = selected.len() >= open.len() + close.len()
            && selected.starts_with(&open)
            && selected.ends_with(&close);
        let replacement = if wrapped {
            selected[open.len()..selected.len() - close.len()].to_vec()
        } else {
            [open.as_slice(), &selected, close.as_slice()].concat()
        };

        self.buffer.delete_between(from, to);
        let (new_to, _) = self.buffer.insert_bytes_at(from, &replacement);
        record.set_removed(selected, from, to);
        record.set_added(replacement, from, new_to);
        let new_end = self.buffer.coordinates(new_to);

        self.state.selection_start = start;
        self.state.selection_end = new_end;
        self.interactive_start = start;
        self.interactive_end = new_end;
        self.set_cursor_position(new_end);

        self.invalidate_lines(start.line, end.line.max(new_end.line));
        self.push_record(record);
    }

    fn toggle_line_comment(&mut self, first: usize, last: usize) {
        let Some(marker) = self.line_comment_marker() else {
            return;
        };
        let marker_columns = char_count(&marker);

        let first_non_blank = |line: &[Glyph]| {
            line.iter().position(|g| !is_space(g.ch)).unwrap_or(line.len())
        };
        let has_marker = |line: &[Glyph]| {
            let at = first_non_blank(line);
            line.len() >= at + marker.len()
                && line[at..at + marker.len()]
                    .iter()
                    .zip(&marker)
                    .all(|(g, &b)| g.ch == b)
        };

        let non_empty: Vec<usize> = (first..=last)
            .filter(|&i| !self.buffer.line(i).is_empty())
            .collect();
        let uncomment = !non_empty.is_empty()
            && non_empty.iter().all(|&i| has_marker(self.buffer.line(i)));

        let mut record = UndoRecord::new(self.state);
        let from = TextPosition::new(first, 0);
        let before_end = TextPosition::new(last, self.buffer.line(last).len());
        let before = self.buffer.bytes_between(from, before_end);

        let mut modified = false;
        for i in non_empty {
            let at = first_non_blank(self.buffer.line(i));
            let column = self.buffer.index_to_column(i, at);

            let shift = |coords: &mut Coordinates| {
                if coords.line != i {
                    return;
                }
                if uncomment && coords.column > column {
                    coords.column = column.max(coords.column.saturating_sub(marker_columns));
                } else if !uncomment && coords.column >= column {
                    coords.column += marker_columns;
                }
            };
            shift(&mut self.state.cursor);
            shift(&mut self.state.selection_start);
            shift(&mut self.state.selection_end);
            shift(&mut self.interactive_start);
            shift(&mut self.interactive_end);

            let line = self.buffer.line_mut(i);
            if uncomment {
                line.drain(at..at + marker.len());
            } else {
                line.splice(at..at, glyphs(&marker));
            }
            modified = true;
        }
        if !modified {
            return;
        }

        let after_end = TextPosition::new(last, self.buffer.line(last).len());
        record.set_removed(before, from, before_end);
        record.set_added(self.buffer.bytes_between(from, after_end), from, after_end);

        self.cursor_position_changed = true;
        self.invalidate_lines(first, last);
        self.push_record(record);
    }

    /// Copy the selection, or the whole current line when nothing is selected.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        let text = if self.has_selection() {
            self.selected_text()
        } else {
            self.current_line_text()
        };
        clipboard.set_text(&text);
    }

    /// Copy and delete the selection. A read-only session only copies.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) {
        if self.read_only {
            self.copy(clipboard);
            return;
        }
        if !self.has_selection() {
            return;
        }
        self.copy(clipboard);
        let mut record = UndoRecord::new(self.state);
        self.take_selection(&mut record);
        self.push_record(record);
    }

    /// Replace the selection with the clipboard text. Ignored when read-only.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) {
        if self.read_only {
            return;
        }
        if let Some(text) = clipboard.get_text()
            && !text.is_empty()
        {
            self.insert_text(&text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryClipboard;
    use pretty_assertions::assert_eq;

    fn editor(text: &str) -> TextEditor {
        let mut editor = TextEditor::new();
        editor.set_text(text);
        editor
    }

    #[test]
    fn test_newline_copies_indentation() {
        let mut e = editor("\tif x {");
        e.set_cursor_position(Coordinates::new(0, 10));
        e.enter_character('\n', false);
        assert_eq!(e.get_text(), "\tif x {\n\t");
        assert_eq!(e.cursor_position(), Coordinates::new(1, 4));

        e.undo(1);
        assert_eq!(e.get_text(), "\tif x {");
        e.redo(1);
        assert_eq!(e.get_text(), "\tif x {\n\t");
    }

    #[test]
    fn test_overwrite_replaces_one_codepoint() {
        let mut e = editor("añb");
        e.set_overwrite(true);
        e.set_cursor_position(Coordinates::new(0, 1));
        e.enter_character('x', false);
        assert_eq!(e.get_text(), "axb");
        e.undo(1);
        assert_eq!(e.get_text(), "añb");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut e = editor("hello world");
        e.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(0, 5),
            SelectionMode::Normal,
        );
        e.enter_character('J', false);
        assert_eq!(e.get_text(), "J world");
        assert_eq!(e.undo_log().len(), 1);
        e.undo(1);
        assert_eq!(e.get_text(), "hello world");
        assert_eq!(e.selected_text(), "hello");
    }

    #[test]
    fn test_backspace_removes_multibyte_and_joins() {
        let mut e = editor("ab\n€x");
        e.set_cursor_position(Coordinates::new(1, 1));
        e.backspace();
        assert_eq!(e.get_text(), "ab\nx");
        e.backspace();
        assert_eq!(e.get_text(), "abx");
        assert_eq!(e.cursor_position(), Coordinates::new(0, 2));
        e.undo(2);
        assert_eq!(e.get_text(), "ab\n€x");
    }

    #[test]
    fn test_backspace_after_tab_uses_visual_columns() {
        let mut e = editor("a\tb");
        e.set_cursor_position(Coordinates::new(0, 4));
        e.backspace();
        assert_eq!(e.get_text(), "ab");
        assert_eq!(e.cursor_position(), Coordinates::new(0, 1));
    }

    #[test]
    fn test_delete_at_line_end_joins() {
        let mut e = editor("ab\ncd");
        e.set_cursor_position(Coordinates::new(0, 2));
        e.delete();
        assert_eq!(e.get_text(), "abcd");
        e.delete();
        assert_eq!(e.get_text(), "abd");
        e.undo(2);
        assert_eq!(e.get_text(), "ab\ncd");
    }

    #[test]
    fn test_delete_at_document_end_is_noop() {
        let mut e = editor("ab");
        e.set_cursor_position(Coordinates::new(0, 2));
        e.delete();
        assert!(!e.can_undo());
    }

    #[test]
    fn test_block_comment_without_selection() {
        let mut e = editor("x");
        e.set_cursor_position(Coordinates::new(0, 1));
        e.toggle_comment(true);
        assert_eq!(e.get_text(), "x/* */");
        assert_eq!(e.cursor_position(), Coordinates::new(0, 3));
    }

    #[test]
    fn test_block_comment_wrap_and_unwrap() {
        let mut e = editor("a = b;");
        e.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(0, 6),
            SelectionMode::Normal,
        );
        e.toggle_comment(true);
        assert_eq!(e.get_text(), "/*a = b;*/");
        assert_eq!(e.selected_text(), "/*a = b;*/");
        e.toggle_comment(true);
        assert_eq!(e.get_text(), "a = b;");
    }

    #[test]
    fn test_line_comment_uses_language_marker() {
        let mut e = editor("x = 1\n  y = 2");
        e.set_language_definition(&textedit_lang::LanguageDefinition::lua())
            .unwrap();
        e.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(1, 2),
            SelectionMode::Normal,
        );
        e.toggle_comment(false);
        assert_eq!(e.get_text(), "--x = 1\n  --y = 2");
        assert_eq!(e.selection_end(), Coordinates::new(1, 4));
        e.toggle_comment(false);
        assert_eq!(e.get_text(), "x = 1\n  y = 2");
    }

    #[test]
    fn test_mixed_lines_get_commented() {
        let mut e = editor("// a\nb");
        e.select_all();
        e.toggle_comment(false);
        assert_eq!(e.get_text(), "//// a\n//b");
    }

    #[test]
    fn test_block_indent_and_outdent() {
        let mut e = editor("a\n  b\nc");
        e.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(2, 0),
            SelectionMode::Normal,
        );
        e.enter_character('\t', false);
        assert_eq!(e.get_text(), "\ta\n\t  b\nc");
        assert_eq!(e.selection_end(), Coordinates::new(2, 0));

        e.enter_character('\t', true);
        e.enter_character('\t', true);
        assert_eq!(e.get_text(), "a\nb\nc");

        e.undo(3);
        assert_eq!(e.get_text(), "a\n  b\nc");
    }

    #[test]
    fn test_cut_copy_paste() {
        let mut e = editor("one two");
        let mut clipboard = MemoryClipboard::default();

        e.copy(&mut clipboard);
        assert_eq!(clipboard.get_text().as_deref(), Some("one two"));

        e.set_selection(
            Coordinates::new(0, 0),
            Coordinates::new(0, 4),
            SelectionMode::Normal,
        );
        e.cut(&mut clipboard);
        assert_eq!(e.get_text(), "two");

        e.move_end(false);
        e.paste(&mut clipboard);
        assert_eq!(e.get_text(), "twoone ");
        assert_eq!(e.undo_log().len(), 2);
    }

    #[test]
    fn test_read_only_cut_only_copies() {
        let mut e = editor("keep");
        let mut clipboard = MemoryClipboard::default();
        e.select_all();
        e.set_read_only(true);
        e.cut(&mut clipboard);
        e.paste(&mut clipboard);
        assert_eq!(e.get_text(), "keep");
        assert_eq!(clipboard.get_text().as_deref(), Some("keep"));
    }

    #[test]
    #[should_panic(expected = "read-only")]
    fn test_read_only_insert_panics() {
        let mut e = editor("x");
        e.set_read_only(true);
        e.insert_text("y");
    }
}
