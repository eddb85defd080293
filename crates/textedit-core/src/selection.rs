//! Cursor and selection control.
//!
//! The cursor and the interactive anchor pair move together: plain movement collapses the
//! pair onto the cursor, and movement with `select` set extends whichever end the cursor was
//! sitting on.

use crate::buffer::{Glyph, is_continuation, is_space, prev_char_start, sequence_len};
use crate::coords::Coordinates;
use crate::editor::TextEditor;

/// Selection granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Character granularity.
    #[default]
    Normal,
    /// Snap to word boundaries.
    Word,
    /// Snap to whole lines.
    Line,
}

/// Which end of the interactive pair a movement heads toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

impl TextEditor {
    /// Clamp `coords` into the buffer.
    pub fn sanitize_coordinates(&self, coords: Coordinates) -> Coordinates {
        self.buffer.sanitize(coords)
    }

    /// Move the cursor without touching the selection.
    pub fn set_cursor_position(&mut self, position: Coordinates) {
        if self.state.cursor != position {
            self.state.cursor = position;
            self.cursor_position_changed = true;
        }
    }

    /// Set the selection start, swapping with the end if they cross.
    pub fn set_selection_start(&mut self, position: Coordinates) {
        self.state.selection_start = self.buffer.sanitize(position);
        if self.state.selection_start > self.state.selection_end {
            std::mem::swap(&mut self.state.selection_start, &mut self.state.selection_end);
        }
    }

    /// Set the selection end, swapping with the start if they cross.
    pub fn set_selection_end(&mut self, position: Coordinates) {
        self.state.selection_end = self.buffer.sanitize(position);
        if self.state.selection_start > self.state.selection_end {
            std::mem::swap(&mut self.state.selection_start, &mut self.state.selection_end);
        }
    }

    /// Select `[start, end)`, clamped and ordered, then snapped according to `mode`.
    pub fn set_selection(&mut self, start: Coordinates, end: Coordinates, mode: SelectionMode) {
        let old = (self.state.selection_start, self.state.selection_end);

        let mut start = self.buffer.sanitize(start);
        let mut end = self.buffer.sanitize(end);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        match mode {
            SelectionMode::Normal => {}
            SelectionMode::Word => {
                start = self.find_word_start(start);
                if !self.is_on_word_boundary(end) {
                    end = self.find_word_end(self.find_word_start(end));
                }
            }
            SelectionMode::Line => {
                start = Coordinates::new(start.line, 0);
                end = Coordinates::new(end.line, self.buffer.line_max_column(end.line));
            }
        }

        self.state.selection_start = start;
        self.state.selection_end = end;
        if (start, end) != old {
            self.cursor_position_changed = true;
        }
    }

    /// Returns `true` if the selection is non-empty.
    pub fn has_selection(&self) -> bool {
        self.state.has_selection()
    }

    /// Selection start.
    pub fn selection_start(&self) -> Coordinates {
        self.state.selection_start
    }

    /// Selection end.
    pub fn selection_end(&self) -> Coordinates {
        self.state.selection_end
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        let end = Coordinates::new(self.buffer.line_count(), 0);
        self.set_selection(Coordinates::default(), end, SelectionMode::Normal);
    }

    /// Select the word under the cursor.
    pub fn select_word_under_cursor(&mut self) {
        let cursor = self.cursor_position();
        let start = self.find_word_start(cursor);
        let end = self.find_word_end(cursor);
        self.set_selection(start, end, SelectionMode::Normal);
    }

    /// The word containing `coords`.
    pub fn word_at(&self, coords: Coordinates) -> String {
        if coords.line >= self.buffer.line_count() {
            return String::new();
        }
        let start = self.buffer.column_to_index(self.find_word_start(coords));
        let end = self.buffer.column_to_index(self.find_word_end(coords));
        let line = self.buffer.line(coords.line);
        let bytes: Vec<u8> = line[start.min(end)..end.min(line.len())]
            .iter()
            .map(|g| g.ch)
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// The word under the cursor.
    pub fn word_under_cursor(&self) -> String {
        self.word_at(self.cursor_position())
    }

    fn same_class(&self, a: &Glyph, b: &Glyph) -> bool {
        !self.is_colorizer_enabled() || a.class == b.class
    }

    /// Start of the word containing `from`. Leading whitespace is skipped backward first.
    pub(crate) fn find_word_start(&self, from: Coordinates) -> Coordinates {
        if from.line >= self.buffer.line_count() {
            return from;
        }
        let line = self.buffer.line(from.line);
        let mut index = self.buffer.column_to_index(from);
        if index >= line.len() {
            return from;
        }

        while index > 0 && is_space(line[index].ch) {
            index -= 1;
        }

        let first = line[index];
        while index > 0 {
            let c = line[index].ch;
            if !is_continuation(c) {
                if is_space(c) {
                    index += 1;
                    break;
                }
                if !self.same_class(&line[index - 1], &first) {
                    break;
                }
            }
            index -= 1;
        }
        Coordinates::new(from.line, self.buffer.index_to_column(from.line, index))
    }

    /// End of the word containing `from`. Trailing whitespace after a word is included.
    pub(crate) fn find_word_end(&self, from: Coordinates) -> Coordinates {
        if from.line >= self.buffer.line_count() {
            return from;
        }
        let line = self.buffer.line(from.line);
        let mut index = self.buffer.column_to_index(from);
        if index >= line.len() {
            return from;
        }

        let first = line[index];
        let first_space = is_space(first.ch);
        while index < line.len() {
            let glyph = line[index];
            if !self.same_class(&glyph, &first) {
                break;
            }
            if first_space != is_space(glyph.ch) {
                if is_space(glyph.ch) {
                    while index < line.len() && is_space(line[index].ch) {
                        index += 1;
                    }
                }
                break;
            }
            index += sequence_len(line, index);
        }
        Coordinates::new(from.line, self.buffer.index_to_column(from.line, index))
    }

    /// Start of the next alphanumeric run after the one containing `from`, crossing lines.
    pub(crate) fn find_next_word(&self, from: Coordinates) -> Coordinates {
        let count = self.buffer.line_count();
        if from.line >= count {
            return from;
        }

        let mut line_no = from.line;
        let mut index = self.buffer.column_to_index(from);
        let mut skip = self
            .buffer
            .line(line_no)
            .get(index)
            .is_some_and(|g| g.ch.is_ascii_alphanumeric());

        loop {
            if line_no >= count {
                let last = count - 1;
                return Coordinates::new(last, self.buffer.line_max_column(last));
            }
            let line = self.buffer.line(line_no);
            if let Some(glyph) = line.get(index) {
                let is_word = glyph.ch.is_ascii_alphanumeric();
                if is_word && !skip {
                    return Coordinates::new(line_no, self.buffer.index_to_column(line_no, index));
                }
                if !is_word {
                    skip = false;
                }
                index += 1;
            } else {
                index = 0;
                line_no += 1;
                skip = false;
            }
        }
    }

    /// Returns `true` if `at` sits between two differently classed glyphs.
    pub(crate) fn is_on_word_boundary(&self, at: Coordinates) -> bool {
        if at.line >= self.buffer.line_count() || at.column == 0 {
            return true;
        }
        let line = self.buffer.line(at.line);
        let index = self.buffer.column_to_index(at);
        if index >= line.len() || index == 0 {
            return true;
        }
        if self.is_colorizer_enabled() {
            line[index].class != line[index - 1].class
        } else {
            is_space(line[index].ch) != is_space(line[index - 1].ch)
        }
    }

    fn track_interactive(&mut self, old: Coordinates, select: bool, direction: Direction) {
        let cursor = self.state.cursor;
        if !select {
            self.interactive_start = cursor;
            self.interactive_end = cursor;
            return;
        }
        match direction {
            Direction::Backward => {
                if old == self.interactive_start {
                    self.interactive_start = cursor;
                } else if old == self.interactive_end {
                    self.interactive_end = cursor;
                } else {
                    self.interactive_start = cursor;
                    self.interactive_end = old;
                }
            }
            Direction::Forward => {
                if old == self.interactive_end {
                    self.interactive_end = cursor;
                } else if old == self.interactive_start {
                    self.interactive_start = cursor;
                } else {
                    self.interactive_start = old;
                    self.interactive_end = cursor;
                }
            }
        }
    }

    fn apply_interactive(&mut self, mode: SelectionMode) {
        self.set_selection(self.interactive_start, self.interactive_end, mode);
    }

    /// Move the cursor up `amount` lines, keeping its column.
    pub fn move_up(&mut self, amount: usize, select: bool) {
        let old = self.state.cursor;
        self.state.cursor.line = old.line.saturating_sub(amount);
        if self.state.cursor != old {
            self.cursor_position_changed = true;
            self.track_interactive(old, select, Direction::Backward);
            self.apply_interactive(SelectionMode::Normal);
        }
    }

    /// Move the cursor down `amount` lines, keeping its column.
    pub fn move_down(&mut self, amount: usize, select: bool) {
        let old = self.state.cursor;
        let last = self.buffer.line_count() - 1;
        self.state.cursor.line = old.line.saturating_add(amount).min(last);
        if self.state.cursor != old {
            self.cursor_position_changed = true;
            self.track_interactive(old, select, Direction::Forward);
            self.apply_interactive(SelectionMode::Normal);
        }
    }

    /// Move the cursor left `amount` characters, wrapping to the previous line.
    ///
    /// In word mode each step lands on the start of a word.
    pub fn move_left(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.state.cursor;
        let mut cursor = self.cursor_position();
        let mut line_no = cursor.line;
        let mut index = self.buffer.column_to_index(cursor);

        for _ in 0..amount {
            if index == 0 {
                if line_no == 0 {
                    break;
                }
                line_no -= 1;
                index = self.buffer.line(line_no).len();
            } else {
                index = prev_char_start(self.buffer.line(line_no), index);
            }

            cursor = Coordinates::new(line_no, self.buffer.index_to_column(line_no, index));
            if word_mode {
                cursor = self.find_word_start(cursor);
                index = self.buffer.column_to_index(cursor);
            }
        }

        self.state.cursor = Coordinates::new(line_no, self.buffer.index_to_column(line_no, index));
        if self.state.cursor != old {
            self.cursor_position_changed = true;
        }
        self.track_interactive(old, select, Direction::Backward);
        let mode = if select && word_mode {
            SelectionMode::Word
        } else {
            SelectionMode::Normal
        };
        self.apply_interactive(mode);
    }

    /// Move the cursor right `amount` characters, wrapping to the next line.
    ///
    /// In word mode each step lands on the start of the next word.
    pub fn move_right(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.state.cursor;
        let mut cursor = self.cursor_position();
        let last = self.buffer.line_count() - 1;

        for _ in 0..amount {
            let line = self.buffer.line(cursor.line);
            let index = self.buffer.column_to_index(cursor);
            if index >= line.len() {
                if cursor.line >= last {
                    break;
                }
                cursor = Coordinates::new(cursor.line + 1, 0);
            } else {
                let next = index + sequence_len(line, index);
                cursor = Coordinates::new(cursor.line, self.buffer.index_to_column(cursor.line, next));
                if word_mode {
                    cursor = self.find_next_word(cursor);
                }
            }
        }

        self.state.cursor = cursor;
        if cursor != old {
            self.cursor_position_changed = true;
        }
        self.track_interactive(old, select, Direction::Forward);
        let mode = if select && word_mode {
            SelectionMode::Word
        } else {
            SelectionMode::Normal
        };
        self.apply_interactive(mode);
    }

    /// Move the cursor to the start of the document.
    pub fn move_top(&mut self, select: bool) {
        let old = self.state.cursor;
        self.set_cursor_position(Coordinates::default());
        if self.state.cursor != old {
            if select {
                self.interactive_end = old;
                self.interactive_start = self.state.cursor;
            } else {
                self.interactive_start = self.state.cursor;
                self.interactive_end = self.state.cursor;
            }
            self.apply_interactive(SelectionMode::Normal);
        }
    }

    /// Move the cursor to the end of the document.
    pub fn move_bottom(&mut self, select: bool) {
        let old = self.cursor_position();
        let last = self.buffer.line_count() - 1;
        let target = Coordinates::new(last, self.buffer.line_max_column(last));
        self.set_cursor_position(target);
        if select {
            self.interactive_start = old;
            self.interactive_end = target;
        } else {
            self.interactive_start = target;
            self.interactive_end = target;
        }
        self.apply_interactive(SelectionMode::Normal);
    }

    /// Move the cursor to the start of its line.
    pub fn move_home(&mut self, select: bool) {
        let old = self.state.cursor;
        self.set_cursor_position(Coordinates::new(old.line, 0));
        if self.state.cursor != old {
            self.track_interactive(old, select, Direction::Backward);
            self.apply_interactive(SelectionMode::Normal);
        }
    }

    /// Move the cursor to the end of its line.
    pub fn move_end(&mut self, select: bool) {
        let old = self.state.cursor;
        let end = self.buffer.line_max_column(old.line);
        self.set_cursor_position(Coordinates::new(old.line, end));
        if self.state.cursor != old {
            self.track_interactive(old, select, Direction::Forward);
            self.apply_interactive(SelectionMode::Normal);
        }
    }

    /// Handle a primary-button press at `at`.
    ///
    /// A press that is not itself a double click but lands within `double_click_time` of the
    /// last recorded click is a triple click and selects whole lines. A double click toggles
    /// out of line mode or into word mode. A single click places the cursor, in word mode when
    /// `ctrl` is held.
    pub fn mouse_click(&mut self, at: Coordinates, time: f64, double_click: bool, ctrl: bool) {
        let triple_click = !double_click
            && self
                .last_click
                .is_some_and(|last| time - last < self.double_click_time);

        if triple_click {
            if !ctrl {
                self.place_interactive(at);
                self.selection_mode = SelectionMode::Line;
                self.apply_interactive(self.selection_mode);
            }
            self.last_click = None;
        } else if double_click {
            if !ctrl {
                self.place_interactive(at);
                self.selection_mode = if self.selection_mode == SelectionMode::Line {
                    SelectionMode::Normal
                } else {
                    SelectionMode::Word
                };
                self.apply_interactive(self.selection_mode);
            }
            self.last_click = Some(time);
        } else {
            self.place_interactive(at);
            self.selection_mode = if ctrl {
                SelectionMode::Word
            } else {
                SelectionMode::Normal
            };
            self.apply_interactive(self.selection_mode);
            self.last_click = Some(time);
        }
    }

    /// Extend the selection while the primary button is dragged to `at`.
    pub fn mouse_drag(&mut self, at: Coordinates) {
        self.set_cursor_position(at);
        self.interactive_end = at;
        self.apply_interactive(self.selection_mode);
    }

    fn place_interactive(&mut self, at: Coordinates) {
        self.set_cursor_position(at);
        self.interactive_start = at;
        self.interactive_end = at;
    }
}
