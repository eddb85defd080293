//! Glyph storage.
//!
//! [`TextBuffer`] owns every line of the document and the line-keyed side tables. All structural
//! mutations go through it so the tables are renumbered together with the lines.

use crate::coords::{self, Coordinates, TextPosition};
use crate::markers::SideTables;
use textedit_lang::ColorClass;

/// Default tab size.
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Largest accepted tab size.
pub const MAX_TAB_SIZE: usize = 32;

/// One stored code unit plus its highlighting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// UTF-8 code unit.
    pub ch: u8,
    /// Token class assigned by the last tokenization pass.
    pub class: ColorClass,
    /// Inside a single-line comment.
    pub comment: bool,
    /// Inside a block comment.
    pub multi_line_comment: bool,
    /// On a preprocessor line.
    pub preprocessor: bool,
}

impl Glyph {
    /// An uncolored glyph.
    pub fn new(ch: u8) -> Self {
        Self {
            ch,
            class: ColorClass::Default,
            comment: false,
            multi_line_comment: false,
            preprocessor: false,
        }
    }

    /// Returns `true` for ASCII whitespace, including `\n`, vertical tab and form feed.
    pub fn is_space(&self) -> bool {
        is_space(self.ch)
    }
}

/// One row of text. No terminator is stored.
pub type Line = Vec<Glyph>;

pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

pub(crate) fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Returns `true` for a `10xxxxxx` continuation byte.
pub fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Sequence length announced by a lead byte.
fn lead_len(b: u8) -> usize {
    match b {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Length of the character starting at `at` in a raw byte slice.
///
/// A lead byte only counts as a multi-byte sequence when all of its continuation bytes follow;
/// anything else is one character per byte.
pub fn byte_sequence_len(bytes: &[u8], at: usize) -> usize {
    let len = lead_len(bytes[at]);
    if len > 1
        && at + len <= bytes.len()
        && bytes[at + 1..at + len].iter().all(|&b| is_continuation(b))
    {
        len
    } else {
        1
    }
}

/// Length of the character starting at `index` in a line.
pub fn sequence_len(line: &[Glyph], index: usize) -> usize {
    let len = lead_len(line[index].ch);
    if len > 1
        && index + len <= line.len()
        && line[index + 1..index + len]
            .iter()
            .all(|g| is_continuation(g.ch))
    {
        len
    } else {
        1
    }
}

/// Start index of the character that ends just before `index`.
pub fn prev_char_start(line: &[Glyph], index: usize) -> usize {
    let mut i = 0;
    let mut prev = 0;
    while i < index && i < line.len() {
        prev = i;
        i += sequence_len(line, i);
    }
    prev
}

pub(crate) fn glyphs(bytes: &[u8]) -> Line {
    bytes.iter().map(|&b| Glyph::new(b)).collect()
}

fn line_bytes(line: &[Glyph]) -> impl Iterator<Item = u8> + '_ {
    line.iter().map(|g| g.ch)
}

/// Ordered lines of glyphs, the tab size they are measured with, and the side tables keyed on
/// their line numbers.
///
/// Invariant: there is always at least one line.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<Line>,
    tab_size: usize,
    markers: SideTables,
    changed: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// A buffer with a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            tab_size: DEFAULT_TAB_SIZE,
            markers: SideTables::new(),
            changed: false,
        }
    }

    /// Replace the contents with `bytes`, split on `\n`, with `\r` dropped.
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        self.lines = bytes
            .split(|&b| b == b'\n')
            .map(|line| line.iter().filter(|&&b| b != b'\r').map(|&b| Glyph::new(b)).collect())
            .collect();
        self.changed = true;
    }

    /// Replace the contents with one line per entry. An empty list yields one empty line.
    pub fn set_lines<S: AsRef<[u8]>>(&mut self, lines: &[S]) {
        self.lines = lines.iter().map(|l| glyphs(l.as_ref())).collect();
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        self.changed = true;
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// All lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> &mut Line {
        self.changed = true;
        &mut self.lines[index]
    }

    /// Tab size used for visual columns.
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Set the tab size, clamped to `1..=32`.
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size.clamp(1, MAX_TAB_SIZE);
    }

    /// Side tables.
    pub fn markers(&self) -> &SideTables {
        &self.markers
    }

    /// Mutable side tables.
    pub fn markers_mut(&mut self) -> &mut SideTables {
        &mut self.markers
    }

    /// Whether the text changed since the flag was last cleared.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Read and clear the change flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Raw index of `coords` within its line. Lines past the end map to `0`.
    pub fn column_to_index(&self, coords: Coordinates) -> usize {
        self.lines
            .get(coords.line)
            .map_or(0, |line| coords::column_to_index(line, coords.column, self.tab_size))
    }

    /// Visual column of raw `index` within `line`.
    pub fn index_to_column(&self, line: usize, index: usize) -> usize {
        self.lines
            .get(line)
            .map_or(0, |l| coords::index_to_column(l, index, self.tab_size))
    }

    /// Column just past the end of `line`.
    pub fn line_max_column(&self, line: usize) -> usize {
        self.lines
            .get(line)
            .map_or(0, |l| coords::max_column(l, self.tab_size))
    }

    /// Number of characters on `line`.
    pub fn line_character_count(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| coords::character_count(l))
    }

    /// Clamp `coords` into the buffer. Lines past the end map to the end of the last line.
    pub fn sanitize(&self, coords: Coordinates) -> Coordinates {
        if coords.line >= self.lines.len() {
            let line = self.lines.len() - 1;
            Coordinates::new(line, self.line_max_column(line))
        } else {
            Coordinates::new(
                coords.line,
                coords.column.min(self.line_max_column(coords.line)),
            )
        }
    }

    /// Storage position of `coords`.
    pub fn position(&self, coords: Coordinates) -> TextPosition {
        TextPosition::new(coords.line, self.column_to_index(coords))
    }

    /// Visual coordinates of a storage position.
    pub fn coordinates(&self, pos: TextPosition) -> Coordinates {
        Coordinates::new(pos.line, self.index_to_column(pos.line, pos.index))
    }

    /// Bytes between `start` and `end`, with `\n` between lines.
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> Vec<u8> {
        self.bytes_between(self.position(start), self.position(end))
    }

    /// Bytes between two storage positions, with `\n` between lines.
    pub fn bytes_between(&self, start: TextPosition, end: TextPosition) -> Vec<u8> {
        let mut out = Vec::new();
        let mut line = start.line;
        let mut index = start.index;

        while line < self.lines.len() && (line < end.line || index < end.index) {
            let row = &self.lines[line];
            if line == end.line {
                let stop = end.index.min(row.len());
                out.extend(line_bytes(&row[index.min(stop)..stop]));
                break;
            }
            out.extend(line_bytes(&row[index.min(row.len())..]));
            out.push(b'\n');
            line += 1;
            index = 0;
        }
        out
    }

    /// The whole document, lines joined by `\n`, no trailing separator.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend(line_bytes(line));
        }
        out
    }

    /// Raw bytes of one line.
    pub fn line_text(&self, line: usize) -> Vec<u8> {
        self.lines
            .get(line)
            .map(|l| line_bytes(l).collect())
            .unwrap_or_default()
    }

    /// Insert an empty line at `index`, renumbering the side tables.
    pub fn insert_line(&mut self, index: usize) -> &mut Line {
        self.lines.insert(index, Line::new());
        self.markers.line_inserted(index);
        self.changed = true;
        &mut self.lines[index]
    }

    /// Remove lines `[start, end)`, renumbering the side tables.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or would remove every line.
    pub fn remove_lines(&mut self, start: usize, end: usize) {
        assert!(start <= end, "inverted line range {start}..{end}");
        assert!(
            end - start < self.lines.len(),
            "cannot remove every line of the buffer"
        );
        self.markers.lines_removed(start, end);
        self.lines.drain(start..end);
        self.changed = true;
    }

    /// Append line `index` to line `index - 1` and remove it.
    pub fn join_with_previous(&mut self, index: usize) {
        assert!(index > 0 && index < self.lines.len());
        let tail = std::mem::take(&mut self.lines[index]);
        self.lines[index - 1].extend(tail);
        self.markers.line_joined(index);
        self.remove_lines(index, index + 1);
    }

    /// Insert `text` at `at`, splitting lines on `\n` and dropping `\r`.
    ///
    /// Returns the coordinates just past the inserted text and the number of lines created.
    pub fn insert_text_at(&mut self, at: Coordinates, text: &[u8]) -> (Coordinates, usize) {
        let (end, created) = self.insert_bytes_at(self.position(at), text);
        (self.coordinates(end), created)
    }

    /// Insert `text` at a storage position. Returns the position just past the inserted bytes
    /// and the number of lines created.
    pub fn insert_bytes_at(&mut self, at: TextPosition, text: &[u8]) -> (TextPosition, usize) {
        let mut line = at.line;
        let mut index = at.index.min(self.lines[line].len());
        let mut created = 0;

        let mut p = 0;
        while p < text.len() {
            match text[p] {
                b'\r' => p += 1,
                b'\n' => {
                    let tail = self.lines[line].split_off(index);
                    self.insert_line(line + 1).extend(tail);
                    line += 1;
                    index = 0;
                    created += 1;
                    p += 1;
                }
                _ => {
                    let len = byte_sequence_len(text, p);
                    let target = &mut self.lines[line];
                    target.splice(index..index, glyphs(&text[p..p + len]));
                    index += len;
                    p += len;
                }
            }
        }

        if !text.is_empty() {
            self.changed = true;
        }
        (TextPosition::new(line, index), created)
    }

    /// Delete `[start, end)`. Cross-line deletes splice the end line's tail onto the start line
    /// and remove the lines in between.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    pub fn delete_range(&mut self, start: Coordinates, end: Coordinates) {
        assert!(start <= end, "inverted range {start:?}..{end:?}");
        self.delete_between(self.position(start), self.position(end));
    }

    /// Delete the glyphs between two storage positions.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    pub fn delete_between(&mut self, start: TextPosition, end: TextPosition) {
        assert!(start <= end, "inverted range {start:?}..{end:?}");
        if start == end {
            return;
        }

        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let stop = end.index.min(line.len());
            line.drain(start.index.min(stop)..stop);
        } else {
            let last = end.line.min(self.lines.len() - 1);
            let tail = {
                let end_line = &mut self.lines[last];
                let at = end.index.min(end_line.len());
                end_line.split_off(at)
            };
            let first = &mut self.lines[start.line];
            first.truncate(start.index);
            first.extend(tail);
            if start.line < last {
                self.remove_lines(start.line + 1, last + 1);
            }
        }
        self.changed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        buffer.set_bytes(text.as_bytes());
        buffer
    }

    #[test]
    fn test_set_bytes_drops_carriage_returns() {
        let b = buffer("one\r\ntwo\r\n");
        assert_eq!(b.line_count(), 3);
        assert_eq!(b.line_text(0), b"one");
        assert_eq!(b.bytes(), b"one\ntwo\n");
    }

    #[test]
    fn test_insert_text_splits_lines() {
        let mut b = buffer("abcd");
        let (end, created) = b.insert_text_at(Coordinates::new(0, 2), b"X\nY\nZ");
        assert_eq!(created, 2);
        assert_eq!(end, Coordinates::new(2, 1));
        assert_eq!(b.bytes(), b"abX\nY\nZcd");
    }

    #[test]
    fn test_insert_reports_storage_end() {
        // A continuation byte appended to a lone lead byte merges into one character.
        let mut b = TextBuffer::new();
        b.set_bytes(&[0xC3]);
        let (end, created) = b.insert_bytes_at(TextPosition::new(0, 1), &[0xA9]);
        assert_eq!((end, created), (TextPosition::new(0, 2), 0));
        assert_eq!(b.coordinates(end), Coordinates::new(0, 1));

        b.delete_between(TextPosition::new(0, 1), end);
        assert_eq!(b.bytes(), vec![0xC3]);
    }

    #[test]
    fn test_delete_cross_line() {
        let mut b = buffer("abc\ndef");
        b.delete_range(Coordinates::new(0, 1), Coordinates::new(1, 1));
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.bytes(), b"aef");
    }

    #[test]
    fn test_text_range_spans_lines() {
        let b = buffer("abc\ndef\nghi");
        assert_eq!(
            b.text_range(Coordinates::new(0, 1), Coordinates::new(2, 2)),
            b"bc\ndef\ngh"
        );
        assert_eq!(
            b.text_range(Coordinates::new(1, 0), Coordinates::new(2, 0)),
            b"def\n"
        );
    }

    #[test]
    fn test_sequence_len_validates_continuations() {
        let line = glyphs("é".as_bytes());
        assert_eq!(sequence_len(&line, 0), 2);
        let broken = glyphs(&[0xC3, b'a']);
        assert_eq!(sequence_len(&broken, 0), 1);
        let stray = glyphs(&[0x80, b'a']);
        assert_eq!(sequence_len(&stray, 0), 1);
        assert_eq!(prev_char_start(&line, 2), 0);
    }

    #[test]
    fn test_tab_size_is_clamped() {
        let mut b = TextBuffer::new();
        b.set_tab_size(0);
        assert_eq!(b.tab_size(), 1);
        b.set_tab_size(100);
        assert_eq!(b.tab_size(), MAX_TAB_SIZE);
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        let mut b = buffer("abc");
        b.delete_range(Coordinates::new(0, 2), Coordinates::new(0, 1));
    }
}
