//! Line-keyed side tables: breakpoints and error markers.
//!
//! Keys are 1-based line numbers. The tables are renumbered in the same call that inserts or
//! removes the lines they refer to.

use std::collections::{BTreeMap, BTreeSet};

/// Breakpoints and error markers keyed by 1-based line number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideTables {
    breakpoints: BTreeSet<usize>,
    error_markers: BTreeMap<usize, String>,
}

impl SideTables {
    /// Empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Breakpoint line numbers in ascending order.
    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        &self.breakpoints
    }

    /// Error messages by line number.
    pub fn error_markers(&self) -> &BTreeMap<usize, String> {
        &self.error_markers
    }

    /// Replace all breakpoints.
    pub fn set_breakpoints(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.breakpoints = lines.into_iter().collect();
    }

    /// Replace all error markers.
    pub fn set_error_markers(&mut self, markers: impl IntoIterator<Item = (usize, String)>) {
        self.error_markers = markers.into_iter().collect();
    }

    /// Add a breakpoint. Returns `false` if it was already set.
    pub fn add_breakpoint(&mut self, line: usize) -> bool {
        self.breakpoints.insert(line)
    }

    /// Remove a breakpoint. Returns `true` if it was set.
    pub fn remove_breakpoint(&mut self, line: usize) -> bool {
        self.breakpoints.remove(&line)
    }

    /// Returns `true` if `line` has a breakpoint.
    pub fn has_breakpoint(&self, line: usize) -> bool {
        self.breakpoints.contains(&line)
    }

    /// Attach an error message to `line`, returning the previous one.
    pub fn add_error_marker(&mut self, line: usize, message: impl Into<String>) -> Option<String> {
        self.error_markers.insert(line, message.into())
    }

    /// Remove the error marker on `line`.
    pub fn remove_error_marker(&mut self, line: usize) -> Option<String> {
        self.error_markers.remove(&line)
    }

    /// Error message on `line`, if any.
    pub fn error_marker(&self, line: usize) -> Option<&str> {
        self.error_markers.get(&line).map(String::as_str)
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.breakpoints.clear();
        self.error_markers.clear();
    }

    /// A line was inserted at 0-based `index`: keys after it move down by one.
    pub(crate) fn line_inserted(&mut self, index: usize) {
        self.shift(|key| if key > index { Some(key + 1) } else { Some(key) });
    }

    /// 0-based lines `[start, end)` were removed.
    pub(crate) fn lines_removed(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end);
        let count = end - start;
        self.shift(|key| {
            if key <= start {
                Some(key)
            } else if key <= end {
                None
            } else {
                Some(key - count)
            }
        });
    }

    /// 0-based line `index` is about to be joined onto `index - 1`.
    ///
    /// Entries on the joined line move to the surviving line unless it already has one.
    pub(crate) fn line_joined(&mut self, index: usize) {
        debug_assert!(index > 0);
        let (removed, survivor) = (index + 1, index);
        if self.breakpoints.remove(&removed) {
            self.breakpoints.insert(survivor);
        }
        if let Some(message) = self.error_markers.remove(&removed) {
            self.error_markers.entry(survivor).or_insert(message);
        }
    }

    fn shift(&mut self, remap: impl Fn(usize) -> Option<usize>) {
        if self.breakpoints.is_empty() && self.error_markers.is_empty() {
            return;
        }
        self.breakpoints = self.breakpoints.iter().filter_map(|&k| remap(k)).collect();
        self.error_markers = std::mem::take(&mut self.error_markers)
            .into_iter()
            .filter_map(|(k, v)| remap(k).map(|k| (k, v)))
            .collect();
    }
}
