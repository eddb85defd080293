//! Collaborators supplied by the embedding host.
//!
//! The core never draws and never talks to the OS. Hosts hand it a [`TextMetrics`] provider to
//! map pixels to coordinates and a [`Clipboard`] for copy and paste. [`ReadinessProbe`] is a
//! small retry state machine for host code that has to wait on something external (a clipboard
//! service, a font atlas) before it can feed the editor.

use crate::buffer::sequence_len;
use crate::coords::Coordinates;
use crate::editor::TextEditor;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// Measures rendered text.
pub trait TextMetrics {
    /// Width of `text` in pixels at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed-advance metrics: every narrow cell is `advance * font_size` pixels wide.
///
/// Cell widths follow UAX #11, so CJK characters take two cells and combining marks none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Cell advance as a fraction of the font size.
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl MonospaceMetrics {
    /// Metrics with the given cell advance ratio.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }

    /// Number of cells `text` occupies. Control characters count as one cell.
    pub fn cells(text: &str) -> usize {
        text.chars()
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
            .sum()
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        Self::cells(text) as f32 * self.advance * font_size
    }
}

/// Clipboard access.
pub trait Clipboard {
    /// Current clipboard text, if any.
    fn get_text(&mut self) -> Option<String>;
    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str);
}

/// In-process clipboard for tests and headless hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }
}

/// Where the text area sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewGeometry {
    /// Screen position of the first line's top-left corner, gutter included.
    pub origin: (f32, f32),
    /// Horizontal offset from `origin` to the first text column.
    pub text_start: f32,
    /// Height of one line in pixels.
    pub line_height: f32,
    /// Font size passed to [`TextMetrics::text_width`].
    pub font_size: f32,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            origin: (0.0, 0.0),
            text_start: 0.0,
            line_height: 16.0,
            font_size: 14.0,
        }
    }
}

/// Pixel position reached by a tab that starts at `x`.
fn tab_stop_x(x: f32, tab_size: usize, space: f32) -> f32 {
    let stop = tab_size as f32 * space;
    if stop <= 0.0 {
        return x;
    }
    (1.0 + ((1.0 + x) / stop).floor()) * stop
}

impl TextEditor {
    fn sequence_text(&self, line: usize, index: usize) -> (String, usize) {
        let glyphs = self.buffer.line(line);
        let len = sequence_len(glyphs, index);
        let bytes: Vec<u8> = glyphs[index..index + len].iter().map(|g| g.ch).collect();
        (String::from_utf8_lossy(&bytes).into_owned(), len)
    }

    /// Map a screen position to buffer coordinates.
    ///
    /// A character is hit once the position passes its horizontal midpoint. Positions below the
    /// last line map to the end of the document.
    pub fn screen_to_coordinates(
        &self,
        x: f32,
        y: f32,
        metrics: &dyn TextMetrics,
        geometry: &ViewGeometry,
    ) -> Coordinates {
        let local_x = x - geometry.origin.0;
        let local_y = y - geometry.origin.1;
        let line = if geometry.line_height > 0.0 {
            (local_y / geometry.line_height).floor().max(0.0) as usize
        } else {
            0
        };

        let tab_size = self.buffer.tab_size();
        let mut column = 0;
        if line < self.buffer.line_count() {
            let space = metrics.text_width(" ", geometry.font_size);
            let len = self.buffer.line(line).len();
            let mut index = 0;
            let mut column_x = 0.0f32;

            while index < len {
                if self.buffer.line(line)[index].ch == b'\t' {
                    let next_x = tab_stop_x(column_x, tab_size, space);
                    let width = next_x - column_x;
                    if geometry.text_start + column_x + width * 0.5 > local_x {
                        break;
                    }
                    column_x = next_x;
                    column = crate::coords::next_tab_stop(column, tab_size);
                    index += 1;
                } else {
                    let (text, step) = self.sequence_text(line, index);
                    let width = metrics.text_width(&text, geometry.font_size);
                    if geometry.text_start + column_x + width * 0.5 > local_x {
                        break;
                    }
                    column_x += width;
                    column += 1;
                    index += step;
                }
            }
        }

        self.buffer.sanitize(Coordinates::new(line, column))
    }

    /// Horizontal distance in pixels from the start of the line to `from`.
    pub fn text_distance_to_line_start(
        &self,
        from: Coordinates,
        metrics: &dyn TextMetrics,
        geometry: &ViewGeometry,
    ) -> f32 {
        if from.line >= self.buffer.line_count() {
            return 0.0;
        }
        let space = metrics.text_width(" ", geometry.font_size);
        let stop = self.buffer.column_to_index(from);
        let tab_size = self.buffer.tab_size();

        let mut distance = 0.0f32;
        let mut index = 0;
        while index < stop {
            if self.buffer.line(from.line)[index].ch == b'\t' {
                distance = tab_stop_x(distance, tab_size, space);
                index += 1;
            } else {
                let (text, step) = self.sequence_text(from.line, index);
                distance += metrics.text_width(&text, geometry.font_size);
                index += step;
            }
        }
        distance
    }
}

/// Retry schedule for host-side readiness checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first failed check (0 = give up immediately).
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Factor applied to the delay after every retry.
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Give up on the first failed check.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 0,
            backoff_multiplier: 1.0,
        }
    }

    /// Constant delay between retries.
    pub fn fixed_retries(max_retries: u32, backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms: backoff_ms,
            backoff_multiplier: 1.0,
        }
    }

    /// Delay doubling after every retry.
    pub fn exponential_backoff(max_retries: u32, initial_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            backoff_multiplier: 2.0,
        }
    }

    /// Delay before retry number `attempt`. Attempt 0 is the first check and has no delay.
    pub fn backoff_duration(&self, attempt: u32) -> u64 {
        if attempt == 0 {
            0
        } else {
            let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
            (self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(exponent)) as u64
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Outcome of one [`ReadinessProbe::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The resource is available.
    Ready,
    /// Check again at this time (milliseconds, same clock as `now`).
    Wait(u64),
    /// Retries are exhausted.
    GaveUp,
}

/// Polls an external condition on the host's clock, backing off between failed checks.
#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    policy: RetryPolicy,
    attempt: u32,
    next_check: u64,
    gave_up: bool,
}

impl ReadinessProbe {
    /// A fresh probe. The first poll checks immediately.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: 0,
            next_check: 0,
            gave_up: false,
        }
    }

    /// Report the current condition at time `now`.
    ///
    /// Polls before the scheduled check return [`ProbeStatus::Wait`] without consuming an
    /// attempt. Once the probe gives up it stays given up until [`ReadinessProbe::reset`].
    pub fn poll(&mut self, now: u64, ready: bool) -> ProbeStatus {
        if self.gave_up {
            return ProbeStatus::GaveUp;
        }
        if ready {
            return ProbeStatus::Ready;
        }
        if now < self.next_check {
            return ProbeStatus::Wait(self.next_check);
        }
        if self.attempt >= self.policy.max_retries {
            tracing::debug!(attempts = self.attempt, "readiness probe gave up");
            self.gave_up = true;
            return ProbeStatus::GaveUp;
        }
        self.attempt += 1;
        self.next_check = now.saturating_add(self.policy.backoff_duration(self.attempt));
        tracing::trace!(attempt = self.attempt, next = self.next_check, "retry scheduled");
        ProbeStatus::Wait(self.next_check)
    }

    /// Retries consumed so far.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Start over with a full retry budget.
    pub fn reset(&mut self) {
        self.attempt = 0;
        self.next_check = 0;
        self.gave_up = false;
    }
}
