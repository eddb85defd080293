//! Incremental colorization.
//!
//! Two passes cooperate:
//!
//! 1. A structural scan over the whole buffer that tracks string, single-line comment, block
//!    comment and preprocessor state and stores the result in each glyph's flags. It runs once
//!    after any edit.
//! 2. Tokenization of an accumulated dirty line range, a bounded batch of lines per call.
//!
//! A large paste therefore recolors progressively over several calls instead of stalling the
//! caller.

use crate::buffer::{Glyph, Line, is_space, sequence_len};
use textedit_lang::{ColorClass, CompiledLanguage};

/// Dirty-range accumulator plus the structural-scan flag.
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    dirty: Option<(usize, usize)>,
    check_comments: bool,
}

impl Colorizer {
    /// Nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the dirty range to cover lines `[from, to)` and schedule a structural scan.
    pub fn invalidate(&mut self, from: usize, to: usize) {
        let to = to.max(from);
        self.dirty = Some(match self.dirty {
            Some((min, max)) => (min.min(from), max.max(to)),
            None => (from, to),
        });
        self.check_comments = true;
    }

    /// Mark every line dirty.
    pub fn invalidate_all(&mut self) {
        self.invalidate(0, usize::MAX);
    }

    /// Lines still waiting for tokenization, as a half-open range.
    pub fn pending(&self) -> Option<(usize, usize)> {
        self.dirty
    }

    /// Returns `true` if a structural scan is scheduled.
    pub fn needs_scan(&self) -> bool {
        self.check_comments
    }

    /// Drop pending work without doing it.
    pub fn reset(&mut self) {
        self.dirty = None;
        self.check_comments = false;
    }

    /// Run the structural scan if scheduled, then tokenize up to `batch` dirty lines.
    ///
    /// Returns `true` while dirty lines remain.
    pub fn step(&mut self, lines: &mut [Line], language: &CompiledLanguage, batch: usize) -> bool {
        if self.check_comments {
            scan_structure(lines, language);
            self.check_comments = false;
        }

        if let Some((min, max)) = self.dirty {
            let end = max.min(lines.len());
            let to = min.saturating_add(batch.max(1)).min(end);
            if min < to {
                tokenize_lines(&mut lines[min..to], language);
            }
            self.dirty = (to < end).then_some((to, max));
            tracing::trace!(from = min, to, remaining = ?self.dirty, "colorize pass");
        }

        self.dirty.is_some()
    }
}

fn matches_at(line: &[Glyph], at: usize, pattern: &[u8]) -> bool {
    !pattern.is_empty()
        && at + pattern.len() <= line.len()
        && line[at..at + pattern.len()]
            .iter()
            .zip(pattern)
            .all(|(g, &b)| g.ch == b)
}

/// Where the currently open block comment started.
#[derive(Debug, Clone, Copy)]
struct OpenComment {
    line: usize,
    index: usize,
}

impl OpenComment {
    fn covers(&self, line: usize, index: usize) -> bool {
        self.line < line || (self.line == line && self.index <= index)
    }
}

/// Structural scan: set `comment`, `multi_line_comment` and `preprocessor` on every glyph.
///
/// Block comments do not nest. A closer outside a comment is ignored, and an unterminated opener
/// runs to the end of the buffer. Quotes only open strings outside comments, and `\` inside a
/// string skips the following glyph. A trailing `\` carries single-line comment and preprocessor
/// state onto the next line.
pub fn scan_structure(lines: &mut [Line], language: &CompiledLanguage) {
    let start = language.comment_start();
    let end = language.comment_end();
    let single = language.single_line_comment();
    let preproc = u8::try_from(language.preproc_char()).unwrap_or(b'#');

    let mut open: Option<OpenComment> = None;
    let mut within_string = false;
    let mut within_single_line = false;
    let mut within_preproc = false;
    let mut first_char = true;
    let mut concatenate = false;

    for (line_no, line) in lines.iter_mut().enumerate() {
        if !concatenate {
            within_single_line = false;
            within_preproc = false;
            first_char = true;
        }
        concatenate = false;

        let len = line.len();
        let mut i = 0;
        while i < len {
            let c = line[i].ch;
            if c != preproc && !is_space(c) {
                first_char = false;
            }
            if i == len - 1 && c == b'\\' {
                concatenate = true;
            }

            let in_comment = open.is_some_and(|o| o.covers(line_no, i));

            if within_string {
                line[i].multi_line_comment = in_comment;
                line[i].comment = false;
                line[i].preprocessor = within_preproc;
                if c == b'"' {
                    if i + 1 < len && line[i + 1].ch == b'"' {
                        i += 1;
                        mark_skipped(&mut line[i], in_comment, within_preproc);
                    } else {
                        within_string = false;
                    }
                } else if c == b'\\' && i + 1 < len {
                    i += 1;
                    mark_skipped(&mut line[i], in_comment, within_preproc);
                }
            } else {
                if first_char && c == preproc {
                    within_preproc = true;
                }

                if c == b'"' && !in_comment && !within_single_line {
                    within_string = true;
                    line[i].multi_line_comment = false;
                    line[i].comment = false;
                } else {
                    if !in_comment && !within_single_line {
                        if matches_at(line, i, single) {
                            within_single_line = true;
                        } else if matches_at(line, i, start) {
                            open = Some(OpenComment { line: line_no, index: i });
                        }
                    }

                    let in_comment = open.is_some_and(|o| o.covers(line_no, i));
                    line[i].multi_line_comment = in_comment;
                    line[i].comment = within_single_line;

                    if let Some(o) = open
                        && !end.is_empty()
                        && i + 1 >= end.len()
                    {
                        let closer = i + 1 - end.len();
                        let after_opener = o.line < line_no || closer >= o.index + start.len();
                        if after_opener && matches_at(line, closer, end) {
                            open = None;
                        }
                    }
                }
                line[i].preprocessor = within_preproc;
            }

            let step = sequence_len(line, i);
            let (lead, rest) = line[i..i + step].split_at_mut(1);
            for glyph in rest {
                mark_skipped(glyph, lead[0].multi_line_comment, lead[0].preprocessor);
                glyph.comment = lead[0].comment;
            }
            i += step;
        }
    }
}

fn mark_skipped(glyph: &mut Glyph, in_comment: bool, preprocessor: bool) {
    glyph.multi_line_comment = in_comment;
    glyph.comment = false;
    glyph.preprocessor = preprocessor;
}

/// Tokenize `lines` from scratch, resetting every glyph's class first.
///
/// Identifier tokens are reclassified through the language's tables. Input that no token
/// matches advances one glyph and stays [`ColorClass::Default`].
pub fn tokenize_lines(lines: &mut [Line], language: &CompiledLanguage) {
    let mut text = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        text.clear();
        text.extend(line.iter().map(|g| g.ch));
        for glyph in line.iter_mut() {
            glyph.class = ColorClass::Default;
        }

        let mut first = 0;
        while first < text.len() {
            let Some(token) = language.next_token(&text[first..]) else {
                first += 1;
                continue;
            };

            let start = (first + token.start).min(text.len());
            let stop = (first + token.end).min(text.len());
            let class = if token.class == ColorClass::Identifier {
                let in_preproc = line.get(start).is_some_and(|g| g.preprocessor);
                language.classify_identifier(&text[start..stop], in_preproc)
            } else {
                token.class
            };
            for glyph in &mut line[start..stop] {
                glyph.class = class;
            }
            first = stop.max(first + 1);
        }
    }
}
