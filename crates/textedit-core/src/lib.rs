#![warn(missing_docs)]
//! textedit-core - an embeddable plain-text editing engine
//!
//! # Overview
//!
//! `textedit-core` holds the state of one editing session: the text, the cursor and selection,
//! an undo log, and per-glyph syntax coloring. It never draws. A host renders the lines it
//! exposes and feeds back input, a clipboard and text metrics through the traits in [`host`].
//!
//! # Core Features
//!
//! - **Glyph storage**: one UTF-8 code unit per glyph, malformed input kept byte by byte
//! - **Tab-aware coordinates**: `(line, visual column)` positions with a configurable tab size
//! - **Single-record edits**: every typed character, paste, indent or comment toggle is one undo step
//! - **Incremental colorization**: dirty ranges are tokenized in bounded batches per call
//! - **Side tables**: breakpoints and error markers follow their lines through edits
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  TextEditor (session) + input dispatch      │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Edit engine / Selection / Undo log         │  ← Mutations
//! ├─────────────────────────────────────────────┤
//! │  Colorizer (structure scan + tokenizing)    │  ← Highlighting
//! ├─────────────────────────────────────────────┤
//! │  TextBuffer + coordinates + side tables     │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use textedit_core::{Coordinates, LanguageDefinition, TextEditor};
//!
//! let mut editor = TextEditor::new();
//! editor.set_language_definition(&LanguageDefinition::c()).unwrap();
//! editor.set_text("int main() {\n\treturn 0;\n}");
//!
//! editor.set_cursor_position(Coordinates::new(1, 14));
//! editor.enter_character('\n', false);
//! editor.insert_text("/* done */");
//! assert_eq!(editor.text_lines()[2], "\t/* done */");
//!
//! editor.colorize_all();
//! assert!(editor.line(2)[1].multi_line_comment);
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - glyph storage and structural line operations
//! - [`coords`] - coordinates and the column/index mapping
//! - [`markers`] - breakpoints and error markers keyed by line
//! - [`undo`] - undo records and the linear undo log
//! - [`colorizer`] - structural scan and batched tokenization
//! - [`palette`] - color palettes
//! - [`options`] - session configuration
//! - [`editor`] - the session object
//! - [`selection`] - selection modes, word boundaries and cursor movement
//! - [`host`] - text metrics, clipboard, screen mapping and readiness polling
//! - [`input`] - per-frame keyboard and mouse dispatch

pub mod buffer;
pub mod colorizer;
pub mod coords;
mod edit;
pub mod editor;
pub mod host;
pub mod input;
pub mod markers;
pub mod options;
pub mod palette;
pub mod selection;
pub mod undo;

pub use buffer::{DEFAULT_TAB_SIZE, Glyph, Line, MAX_TAB_SIZE, TextBuffer};
pub use colorizer::Colorizer;
pub use coords::{Coordinates, EditorState, TextPosition};
pub use editor::TextEditor;
pub use host::{
    Clipboard, MemoryClipboard, MonospaceMetrics, ProbeStatus, ReadinessProbe, RetryPolicy,
    TextMetrics, ViewGeometry,
};
pub use input::{InputSnapshot, Key, Modifiers, MouseState};
pub use markers::SideTables;
pub use options::{ConfigError, EditorOptions};
pub use palette::{PALETTE_SIZE, Palette, PaletteIndex};
pub use selection::SelectionMode;
pub use undo::{UndoLog, UndoRecord};

pub use textedit_lang::{ColorClass, CompiledLanguage, LanguageDefinition, LanguageError};
