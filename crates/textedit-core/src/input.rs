//! Per-frame input dispatch.
//!
//! Hosts translate their windowing toolkit's events into an [`InputSnapshot`] once per frame
//! and hand it to [`TextEditor::handle_input`], which runs the keyboard shortcut table, feeds
//! typed characters through [`TextEditor::enter_character`] and drives mouse selection.

use crate::editor::TextEditor;
use crate::host::{Clipboard, TextMetrics, ViewGeometry};

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Enter,
    Tab,
    /// A character key, used for shortcuts such as Ctrl+Z. Letters are lowercase.
    Char(char),
}

/// Modifier keys held during the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control (Command on macOS hosts).
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
    /// Alt (Option).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };
    /// Control only.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
    /// Shift only.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };
    /// Control and shift.
    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        alt: false,
    };
}

/// Primary mouse button state over the text area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseState {
    /// Pointer position in screen pixels.
    pub position: (f32, f32),
    /// The button went down this frame.
    pub clicked: bool,
    /// The toolkit reported this press as a double click.
    pub double_clicked: bool,
    /// The button is held and the pointer moved.
    pub dragging: bool,
    /// Frame time in seconds.
    pub time: f64,
}

/// Everything the editor needs from one frame of host input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Keys pressed this frame, in order.
    pub keys: Vec<Key>,
    /// Characters typed this frame, in order.
    pub typed: Vec<char>,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Mouse state when the pointer is over the text area.
    pub mouse: Option<MouseState>,
    /// Number of fully visible lines, for Page Up and Page Down.
    pub visible_lines: usize,
}

impl InputSnapshot {
    /// A snapshot with a single key press.
    pub fn key(key: Key, modifiers: Modifiers) -> Self {
        Self {
            keys: vec![key],
            modifiers,
            ..Self::default()
        }
    }

    /// A snapshot with typed text.
    pub fn typed(text: &str) -> Self {
        Self {
            typed: text.chars().collect(),
            ..Self::default()
        }
    }
}

impl TextEditor {
    /// Apply one frame of input. Returns `true` if anything was handled.
    ///
    /// Keys that would modify the text are ignored while the session is read-only.
    pub fn handle_input(
        &mut self,
        input: &InputSnapshot,
        metrics: &dyn TextMetrics,
        geometry: &ViewGeometry,
        clipboard: &mut dyn Clipboard,
    ) -> bool {
        let mut handled = false;
        for &key in &input.keys {
            handled |= self.handle_key(key, input.modifiers, input.visible_lines, clipboard);
        }

        if !self.read_only {
            for &ch in &input.typed {
                if ch == '\n' || (ch as u32 >= 32 && ch != '\u{7f}') {
                    self.enter_character(ch, input.modifiers.shift);
                    handled = true;
                }
            }
        }

        if let Some(mouse) = &input.mouse {
            handled |= self.handle_mouse(mouse, input.modifiers, metrics, geometry);
        }
        handled
    }

    fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        visible_lines: usize,
        clipboard: &mut dyn Clipboard,
    ) -> bool {
        let Modifiers { ctrl, shift, alt } = modifiers;
        let writable = !self.read_only;
        let page = visible_lines.saturating_sub(4);

        match key {
            Key::Char('z') if writable && ctrl && !shift && !alt => self.undo(1),
            Key::Char('y') if ctrl && !shift && !alt => self.redo(1),
            Key::Char('z') if ctrl && shift && !alt => self.redo(1),
            Key::Up if !ctrl && !alt => self.move_up(1, shift),
            Key::Down if !ctrl && !alt => self.move_down(1, shift),
            Key::Left if !alt => self.move_left(1, shift, ctrl),
            Key::Right if !alt => self.move_right(1, shift, ctrl),
            Key::PageUp if !alt => self.move_up(page, shift),
            Key::PageDown if !alt => self.move_down(page, shift),
            Key::Home if ctrl && !alt => self.move_top(shift),
            Key::End if ctrl && !alt => self.move_bottom(shift),
            Key::Home if !alt => self.move_home(shift),
            Key::End if !alt => self.move_end(shift),
            Key::Delete if writable && !ctrl && !shift && !alt => self.delete(),
            Key::Backspace if writable => self.backspace(),
            Key::Insert if !ctrl && !shift && !alt => self.overwrite = !self.overwrite,
            Key::Insert | Key::Char('c') if ctrl && !shift && !alt => self.copy(clipboard),
            Key::Insert if writable && !ctrl && shift && !alt => self.paste(clipboard),
            Key::Char('v') if writable && ctrl && !shift && !alt => self.paste(clipboard),
            Key::Char('x') if ctrl && !shift && !alt => self.cut(clipboard),
            Key::Delete if !ctrl && shift && !alt => self.cut(clipboard),
            Key::Char('a') if ctrl && !shift && !alt => self.select_all(),
            Key::Char('/') if writable && ctrl && !alt => self.toggle_comment(shift),
            Key::Enter if writable && !ctrl && !shift && !alt => self.enter_character('\n', false),
            Key::Tab if writable && !ctrl && !alt => self.enter_character('\t', shift),
            _ => return false,
        }
        true
    }

    fn handle_mouse(
        &mut self,
        mouse: &MouseState,
        modifiers: Modifiers,
        metrics: &dyn TextMetrics,
        geometry: &ViewGeometry,
    ) -> bool {
        if modifiers.shift || modifiers.alt {
            return false;
        }
        let (x, y) = mouse.position;
        if mouse.clicked || mouse.double_clicked {
            let at = self.screen_to_coordinates(x, y, metrics, geometry);
            self.mouse_click(at, mouse.time, mouse.double_clicked, modifiers.ctrl);
            true
        } else if mouse.dragging {
            let at = self.screen_to_coordinates(x, y, metrics, geometry);
            self.mouse_drag(at);
            true
        } else {
            false
        }
    }
}
