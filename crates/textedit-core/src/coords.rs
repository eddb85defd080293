//! Visual coordinates and the column/index mapping.
//!
//! A line stores one UTF-8 code unit per [`Glyph`]. A *visual column* counts one per code point,
//! except that a tab advances to the next multiple of the tab size. An *index* is a raw glyph
//! offset. Both walks are O(line length).

use crate::buffer::{Glyph, sequence_len};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A `(line, visual column)` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based tab-expanded column.
    pub column: usize,
}

impl Coordinates {
    /// Create coordinates.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Coordinates {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Coordinates {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A `(line, raw glyph index)` position.
///
/// Unlike visual columns, indices stay put when an edit joins a lead byte to its continuation
/// bytes or separates them, so undo replays address storage with these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextPosition {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based glyph offset within the line.
    pub index: usize,
}

impl TextPosition {
    /// Create a position.
    pub fn new(line: usize, index: usize) -> Self {
        Self { line, index }
    }
}

/// Cursor plus selection, snapshotted by undo records.
///
/// Invariant: `selection_start <= selection_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorState {
    /// Cursor position.
    pub cursor: Coordinates,
    /// Selection start (inclusive).
    pub selection_start: Coordinates,
    /// Selection end (exclusive).
    pub selection_end: Coordinates,
}

impl EditorState {
    /// Returns `true` if the selection is non-empty.
    pub fn has_selection(&self) -> bool {
        self.selection_end > self.selection_start
    }
}

/// Column reached by a tab that starts at `column`.
pub fn next_tab_stop(column: usize, tab_size: usize) -> usize {
    (column / tab_size) * tab_size + tab_size
}

fn advance(glyph: &Glyph, column: usize, tab_size: usize) -> usize {
    if glyph.ch == b'\t' {
        next_tab_stop(column, tab_size)
    } else {
        column + 1
    }
}

/// Raw index of the first glyph at or after visual `column`.
///
/// Columns past the end of the line map to the line length.
pub fn column_to_index(line: &[Glyph], column: usize, tab_size: usize) -> usize {
    let mut col = 0;
    let mut i = 0;
    while i < line.len() && col < column {
        col = advance(&line[i], col, tab_size);
        i += sequence_len(line, i);
    }
    i
}

/// Visual column of raw `index`. Indices past the end map to the line's max column.
pub fn index_to_column(line: &[Glyph], index: usize, tab_size: usize) -> usize {
    let mut col = 0;
    let mut i = 0;
    while i < index && i < line.len() {
        col = advance(&line[i], col, tab_size);
        i += sequence_len(line, i);
    }
    col
}

/// Visual column just past the last character of the line.
pub fn max_column(line: &[Glyph], tab_size: usize) -> usize {
    index_to_column(line, line.len(), tab_size)
}

/// Number of characters (code points, or single bytes where the encoding is malformed).
pub fn character_count(line: &[Glyph]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < line.len() {
        i += sequence_len(line, i);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::glyphs;

    #[test]
    fn test_tab_rounds_to_next_stop() {
        let line = glyphs(b"a\tb");
        assert_eq!(index_to_column(&line, 1, 4), 1);
        assert_eq!(index_to_column(&line, 2, 4), 4);
        assert_eq!(max_column(&line, 4), 5);
        assert_eq!(column_to_index(&line, 2, 4), 2);
        assert_eq!(column_to_index(&line, 4, 4), 2);
    }

    #[test]
    fn test_multibyte_is_one_column() {
        let line = glyphs("añb".as_bytes());
        assert_eq!(line.len(), 4);
        assert_eq!(column_to_index(&line, 2, 4), 3);
        assert_eq!(index_to_column(&line, 3, 4), 2);
        assert_eq!(character_count(&line), 3);
    }

    #[test]
    fn test_truncated_sequence_counts_bytes() {
        // A lead byte for a 3-byte sequence followed by ASCII.
        let line = glyphs(&[0xE2, b'x', b'y']);
        assert_eq!(character_count(&line), 3);
        assert_eq!(max_column(&line, 4), 3);
    }

    #[test]
    fn test_text_position_orders_by_line_then_index() {
        assert!(TextPosition::new(0, 9) < TextPosition::new(1, 0));
        assert!(TextPosition::new(3, 1) < TextPosition::new(3, 2));
    }

    #[test]
    fn test_coordinates_order_by_line_then_column() {
        assert!(Coordinates::new(0, 9) < Coordinates::new(1, 0));
        assert!(Coordinates::new(2, 1) < Coordinates::new(2, 3));
    }
}
