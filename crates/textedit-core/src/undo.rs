//! Linear undo log.
//!
//! Every logical edit appends exactly one [`UndoRecord`]. Records store absolute storage positions
//! that were valid when they were created and are replayed directly against the buffer.

use crate::buffer::TextBuffer;
use crate::coords::{EditorState, TextPosition};

/// One reversible edit.
///
/// `removed` is the text that occupied `[removed_start, removed_end)` before the edit, and
/// `added` is the text occupying `[added_start, added_end)` after it. Spans are raw glyph
/// positions; only the cursor snapshots are visual coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UndoRecord {
    /// Inserted bytes.
    pub added: Vec<u8>,
    /// Start of the inserted span.
    pub added_start: TextPosition,
    /// End of the inserted span.
    pub added_end: TextPosition,
    /// Removed bytes.
    pub removed: Vec<u8>,
    /// Start of the removed span.
    pub removed_start: TextPosition,
    /// End of the removed span.
    pub removed_end: TextPosition,
    /// Cursor and selection before the edit.
    pub before: EditorState,
    /// Cursor and selection after the edit.
    pub after: EditorState,
}

/// Inclusive-exclusive line span touched by a replay, for re-colorization.
pub(crate) type LineSpan = (usize, usize);

fn span(start: TextPosition, end: TextPosition) -> LineSpan {
    (start.line.saturating_sub(1), end.line + 2)
}

impl UndoRecord {
    /// An empty record starting from `before`.
    pub fn new(before: EditorState) -> Self {
        Self {
            before,
            ..Self::default()
        }
    }

    /// Record the removal of `text` from `[start, end)`.
    pub(crate) fn set_removed(&mut self, text: Vec<u8>, start: TextPosition, end: TextPosition) {
        debug_assert!(start <= end);
        self.removed = text;
        self.removed_start = start;
        self.removed_end = end;
    }

    /// Record the insertion of `text` at `[start, end)`.
    pub(crate) fn set_added(&mut self, text: Vec<u8>, start: TextPosition, end: TextPosition) {
        debug_assert!(start <= end);
        self.added = text;
        self.added_start = start;
        self.added_end = end;
    }

    /// Revert the edit: drop the added span, then put the removed text back.
    pub(crate) fn undo(&self, buffer: &mut TextBuffer) -> Vec<LineSpan> {
        let mut dirty = Vec::with_capacity(2);
        if !self.added.is_empty() {
            buffer.delete_between(self.added_start, self.added_end);
            dirty.push(span(self.added_start, self.added_end));
        }
        if !self.removed.is_empty() {
            buffer.insert_bytes_at(self.removed_start, &self.removed);
            dirty.push(span(self.removed_start, self.removed_end));
        }
        dirty
    }

    /// Re-apply the edit: drop the removed span, then insert the added text.
    pub(crate) fn redo(&self, buffer: &mut TextBuffer) -> Vec<LineSpan> {
        let mut dirty = Vec::with_capacity(2);
        if !self.removed.is_empty() {
            buffer.delete_between(self.removed_start, self.removed_end);
            dirty.push(span(self.removed_start, self.removed_end));
        }
        if !self.added.is_empty() {
            buffer.insert_bytes_at(self.added_start, &self.added);
            dirty.push(span(self.added_start, self.added_end));
        }
        dirty
    }
}

/// Records plus the current position. Entries at or past `index` form the redo tail.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
    index: usize,
}

impl UndoLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, discarding the redo tail.
    pub fn push(&mut self, record: UndoRecord) {
        debug_assert!(record.added_start <= record.added_end);
        debug_assert!(record.removed_start <= record.removed_end);
        tracing::trace!(
            index = self.index,
            added = record.added.len(),
            removed = record.removed.len(),
            discarded = self.records.len() - self.index,
            "push undo record"
        );
        self.records.truncate(self.index);
        self.records.push(record);
        self.index += 1;
    }

    /// Returns `true` if a record can be undone.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Returns `true` if a record can be redone.
    pub fn can_redo(&self) -> bool {
        self.index < self.records.len()
    }

    /// Step back and return the record to undo.
    pub fn step_back(&mut self) -> Option<&UndoRecord> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.records.get(self.index)
    }

    /// Step forward and return the record to redo.
    pub fn step_forward(&mut self) -> Option<&UndoRecord> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.records.get(self.index - 1)
    }

    /// Current position, in `0..=len()`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Coordinates;

    fn record(tag: u8) -> UndoRecord {
        let mut r = UndoRecord::new(EditorState::default());
        r.set_added(vec![tag], TextPosition::new(0, 0), TextPosition::new(0, 1));
        r
    }

    #[test]
    fn test_push_discards_redo_tail() {
        let mut log = UndoLog::new();
        log.push(record(b'a'));
        log.push(record(b'b'));
        assert!(log.step_back().is_some());
        assert!(log.can_redo());

        log.push(record(b'c'));
        assert_eq!(log.len(), 2);
        assert_eq!(log.index(), 2);
        assert!(!log.can_redo());
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut log = UndoLog::new();
        assert!(log.step_back().is_none());
        log.push(record(b'a'));
        assert!(log.step_forward().is_none());
        assert_eq!(log.step_back().map(|r| r.added.clone()), Some(vec![b'a']));
        assert!(log.step_back().is_none());
        assert_eq!(log.index(), 0);
    }

    #[test]
    fn test_replay_is_inverse() {
        let mut buffer = TextBuffer::new();
        buffer.set_bytes(b"hello world");

        // "world" replaced by "there".
        let mut r = UndoRecord::new(EditorState::default());
        r.set_removed(b"world".to_vec(), TextPosition::new(0, 6), TextPosition::new(0, 11));
        r.set_added(b"there".to_vec(), TextPosition::new(0, 6), TextPosition::new(0, 11));
        r.redo(&mut buffer);
        assert_eq!(buffer.bytes(), b"hello there");
        r.undo(&mut buffer);
        assert_eq!(buffer.bytes(), b"hello world");
    }

    #[test]
    fn test_replay_survives_sequence_merge() {
        // Removing the 'x' from [C3, 'x', A9] merges the remaining bytes into one character,
        // so the removed span must not be re-derived from columns.
        let mut buffer = TextBuffer::new();
        buffer.set_bytes(&[0xC3, b'x', 0xA9]);

        let mut r = UndoRecord::new(EditorState::default());
        r.set_removed(vec![b'x'], TextPosition::new(0, 1), TextPosition::new(0, 2));
        r.redo(&mut buffer);
        assert_eq!(buffer.bytes(), vec![0xC3, 0xA9]);
        assert_eq!(buffer.line_max_column(0), 1);
        assert_eq!(buffer.coordinates(TextPosition::new(0, 2)), Coordinates::new(0, 1));

        r.undo(&mut buffer);
        assert_eq!(buffer.bytes(), vec![0xC3, b'x', 0xA9]);
    }
}
