//! The editing session.
//!
//! [`TextEditor`] exclusively owns the buffer, cursor and selection state, undo log, colorizer
//! and palette. Editing, selection and input handling live in their own modules as further
//! `impl TextEditor` blocks.

use crate::buffer::{Glyph, Line, TextBuffer};
use crate::colorizer::Colorizer;
use crate::coords::{Coordinates, EditorState};
use crate::markers::SideTables;
use crate::options::{ConfigError, EditorOptions};
use crate::palette::{Palette, PaletteIndex, blend_half};
use crate::selection::SelectionMode;
use crate::undo::UndoLog;
use textedit_lang::{CompiledLanguage, LanguageDefinition, LanguageError};

/// An editing session.
///
/// ```rust
/// use textedit_core::{Coordinates, TextEditor};
///
/// let mut editor = TextEditor::new();
/// editor.set_text("fn main() {}\n");
/// editor.set_cursor_position(Coordinates::new(0, 12));
/// editor.insert_text(" // entry");
/// assert_eq!(editor.get_text(), "fn main() {} // entry\n");
///
/// editor.undo(1);
/// assert_eq!(editor.get_text(), "fn main() {}\n");
/// ```
#[derive(Debug, Clone)]
pub struct TextEditor {
    pub(crate) buffer: TextBuffer,
    pub(crate) state: EditorState,
    pub(crate) undo_log: UndoLog,
    pub(crate) colorizer: Colorizer,
    pub(crate) language: Option<CompiledLanguage>,
    palette: Palette,

    pub(crate) read_only: bool,
    pub(crate) overwrite: bool,
    colorizer_enabled: bool,
    show_whitespaces: bool,
    pub(crate) double_click_time: f64,
    colorize_batch_lines: Option<usize>,

    pub(crate) selection_mode: SelectionMode,
    pub(crate) interactive_start: Coordinates,
    pub(crate) interactive_end: Coordinates,
    pub(crate) last_click: Option<f64>,
    pub(crate) cursor_position_changed: bool,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEditor {
    /// An empty session: one empty line, no language, dark palette.
    pub fn new() -> Self {
        let defaults = EditorOptions::default();
        Self {
            buffer: TextBuffer::new(),
            state: EditorState::default(),
            undo_log: UndoLog::new(),
            colorizer: Colorizer::new(),
            language: None,
            palette: Palette::dark(),
            read_only: defaults.read_only,
            overwrite: defaults.overwrite,
            colorizer_enabled: defaults.colorizer_enabled,
            show_whitespaces: defaults.show_whitespaces,
            double_click_time: defaults.double_click_time,
            colorize_batch_lines: defaults.colorize_batch_lines,
            selection_mode: SelectionMode::Normal,
            interactive_start: Coordinates::default(),
            interactive_end: Coordinates::default(),
            last_click: None,
            cursor_position_changed: false,
        }
    }

    /// A session configured from `options`.
    pub fn with_options(options: &EditorOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let mut editor = Self::new();
        editor.apply_options(options)?;
        Ok(editor)
    }

    /// Apply `options` to this session. The language is only replaced when one is named.
    pub fn apply_options(&mut self, options: &EditorOptions) -> Result<(), ConfigError> {
        options.validate()?;
        if let Some(definition) = options.language_definition()? {
            self.set_language_definition(&definition)?;
        }
        self.set_tab_size(options.tab_size);
        self.read_only = options.read_only;
        self.overwrite = options.overwrite;
        self.colorizer_enabled = options.colorizer_enabled;
        self.show_whitespaces = options.show_whitespaces;
        self.double_click_time = options.double_click_time;
        self.colorize_batch_lines = options.colorize_batch_lines;
        Ok(())
    }

    /// Compile and install a language definition, then schedule a full recolor.
    ///
    /// Invalid rules are reported here; the current language is kept on error.
    pub fn set_language_definition(
        &mut self,
        definition: &LanguageDefinition,
    ) -> Result<(), LanguageError> {
        let compiled = definition.compile()?;
        tracing::debug!(language = %compiled.name(), "install language");
        self.language = Some(compiled);
        self.colorizer.invalidate_all();
        Ok(())
    }

    /// The installed language.
    pub fn language(&self) -> Option<&CompiledLanguage> {
        self.language.as_ref()
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Current palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Set the tab size (clamped to `1..=32`).
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.buffer.set_tab_size(tab_size);
    }

    /// Current tab size.
    pub fn tab_size(&self) -> usize {
        self.buffer.tab_size()
    }

    /// Enable or disable mutations.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Returns `true` if mutations are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Enable or disable overwrite mode.
    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Returns `true` in overwrite mode.
    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Enable or disable the colorizer.
    pub fn set_colorizer_enabled(&mut self, enabled: bool) {
        self.colorizer_enabled = enabled;
    }

    /// Returns `true` if the colorizer runs.
    pub fn is_colorizer_enabled(&self) -> bool {
        self.colorizer_enabled
    }

    /// Renderer hint: draw whitespace markers.
    pub fn set_show_whitespaces(&mut self, show: bool) {
        self.show_whitespaces = show;
    }

    /// Renderer hint: draw whitespace markers.
    pub fn is_showing_whitespaces(&self) -> bool {
        self.show_whitespaces
    }

    /// Replace the whole text. Clears undo history and resets the cursor.
    pub fn set_text(&mut self, text: &str) {
        self.set_text_bytes(text.as_bytes());
    }

    /// Replace the whole text from raw bytes. Malformed UTF-8 is kept one byte per character.
    pub fn set_text_bytes(&mut self, bytes: &[u8]) {
        self.buffer.set_bytes(bytes);
        self.reset_after_load();
    }

    /// Replace the whole text, one entry per line.
    pub fn set_text_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        let lines: Vec<&[u8]> = lines.iter().map(|l| l.as_ref().as_bytes()).collect();
        self.buffer.set_lines(&lines);
        self.reset_after_load();
    }

    fn reset_after_load(&mut self) {
        tracing::debug!(lines = self.buffer.line_count(), "set text");
        self.undo_log.clear();
        self.state = EditorState::default();
        self.interactive_start = Coordinates::default();
        self.interactive_end = Coordinates::default();
        self.colorizer.invalidate_all();
    }

    /// The whole text, lines joined by `\n`.
    pub fn get_text(&self) -> String {
        String::from_utf8_lossy(&self.buffer.bytes()).into_owned()
    }

    /// The whole text as raw bytes.
    pub fn text_bytes(&self) -> Vec<u8> {
        self.buffer.bytes()
    }

    /// One string per line.
    pub fn text_lines(&self) -> Vec<String> {
        (0..self.buffer.line_count())
            .map(|i| String::from_utf8_lossy(&self.buffer.line_text(i)).into_owned())
            .collect()
    }

    /// Text between two coordinates.
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> String {
        String::from_utf8_lossy(&self.buffer.text_range(start, end)).into_owned()
    }

    /// Selected text.
    pub fn selected_text(&self) -> String {
        self.text_range(self.state.selection_start, self.state.selection_end)
    }

    /// Text of the cursor's line.
    pub fn current_line_text(&self) -> String {
        let line = self.cursor_position().line;
        self.text_range(
            Coordinates::new(line, 0),
            Coordinates::new(line, self.buffer.line_max_column(line)),
        )
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Glyphs of one line.
    pub fn line(&self, index: usize) -> &Line {
        self.buffer.line(index)
    }

    /// Column just past the end of `line`.
    pub fn line_max_column(&self, line: usize) -> usize {
        self.buffer.line_max_column(line)
    }

    /// Number of characters on `line`.
    pub fn line_character_count(&self, line: usize) -> usize {
        self.buffer.line_character_count(line)
    }

    /// Returns `true` if the text changed since the flag was last cleared.
    pub fn is_text_changed(&self) -> bool {
        self.buffer.is_changed()
    }

    /// Read and clear the text-changed flag.
    pub fn take_text_changed(&mut self) -> bool {
        self.buffer.take_changed()
    }

    /// Read and clear the cursor-moved flag.
    pub fn take_cursor_position_changed(&mut self) -> bool {
        std::mem::take(&mut self.cursor_position_changed)
    }

    /// Cursor and selection snapshot.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Cursor position clamped into the buffer.
    pub fn cursor_position(&self) -> Coordinates {
        self.buffer.sanitize(self.state.cursor)
    }

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Breakpoints and error markers.
    pub fn markers(&self) -> &SideTables {
        self.buffer.markers()
    }

    /// Mutable breakpoints and error markers.
    pub fn markers_mut(&mut self) -> &mut SideTables {
        self.buffer.markers_mut()
    }

    /// Display color of a glyph under the current palette.
    ///
    /// Comment flags override the token class. Glyphs on preprocessor lines blend their color
    /// half and half with the preprocessor color.
    pub fn glyph_color(&self, glyph: &Glyph) -> u32 {
        if !self.colorizer_enabled {
            return self.palette[PaletteIndex::Default];
        }
        if glyph.comment {
            return self.palette[PaletteIndex::Comment];
        }
        if glyph.multi_line_comment {
            return self.palette[PaletteIndex::MultiLineComment];
        }
        let color = self.palette[PaletteIndex::from(glyph.class)];
        if glyph.preprocessor {
            blend_half(color, self.palette[PaletteIndex::Preprocessor])
        } else {
            color
        }
    }

    /// Run one colorizer pass. Returns `true` while work remains.
    ///
    /// Hosts call this once per frame; large dirty ranges complete over several calls.
    pub fn colorize(&mut self) -> bool {
        if !self.colorizer_enabled {
            return self.colorizer.pending().is_some();
        }
        let Some(language) = self.language.as_ref() else {
            self.colorizer.reset();
            return false;
        };
        let batch = self
            .colorize_batch_lines
            .unwrap_or_else(|| language.batch_lines());
        self.colorizer
            .step(self.buffer.lines_mut(), language, batch)
    }

    /// Run colorizer passes until nothing is pending.
    pub fn colorize_all(&mut self) {
        while self.colorize() {}
    }

    /// Pending colorizer state.
    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    /// Mark lines `first..=last` dirty, with one line of context on either side.
    pub(crate) fn invalidate_lines(&mut self, first: usize, last: usize) {
        self.colorizer
            .invalidate(first.saturating_sub(1), last.saturating_add(2));
    }

    /// Returns `true` if an undo step is available and the buffer is writable.
    pub fn can_undo(&self) -> bool {
        !self.read_only && self.undo_log.can_undo()
    }

    /// Returns `true` if a redo step is available and the buffer is writable.
    pub fn can_redo(&self) -> bool {
        !self.read_only && self.undo_log.can_redo()
    }

    /// Undo up to `steps` records.
    pub fn undo(&mut self, steps: usize) {
        for _ in 0..steps {
            if !self.can_undo() {
                break;
            }
            let Some(record) = self.undo_log.step_back().cloned() else {
                break;
            };
            tracing::debug!(index = self.undo_log.index(), "undo");
            for (from, to) in record.undo(&mut self.buffer) {
                self.colorizer.invalidate(from, to);
            }
            self.state = record.before;
        }
    }

    /// Redo up to `steps` records.
    pub fn redo(&mut self, steps: usize) {
        for _ in 0..steps {
            if !self.can_redo() {
                break;
            }
            let Some(record) = self.undo_log.step_forward().cloned() else {
                break;
            };
            tracing::debug!(index = self.undo_log.index(), "redo");
            for (from, to) in record.redo(&mut self.buffer) {
                self.colorizer.invalidate(from, to);
            }
            self.state = record.after;
        }
    }

    /// The undo log.
    pub fn undo_log(&self) -> &UndoLog {
        &self.undo_log
    }
}
