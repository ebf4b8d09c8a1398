//! Buffer text model
//!
//! Offsets are UTF-8 byte offsets into the buffer. A [`TextSnapshot`] is an
//! immutable view of a buffer at one revision; everything cached by the
//! engine is keyed by that revision.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Monotonic buffer revision
pub type Revision = u64;

/// Half-open byte range `[start, start + len)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub len: usize,
}

impl TextRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// True when both ranges share at least one byte, or when an empty
    /// range sits inside the other one.
    pub fn intersects(&self, other: &TextRange) -> bool {
        if self.is_empty() || other.is_empty() {
            let (point, range) = if self.is_empty() { (self, other) } else { (other, self) };
            return point.start >= range.start && point.start <= range.end();
        }
        self.start < other.end() && other.start < self.end()
    }

    pub fn intersection(&self, other: &TextRange) -> Option<TextRange> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        (start < end).then(|| TextRange::from_bounds(start, end))
    }

    pub fn shifted(&self, by: usize) -> TextRange {
        TextRange::new(self.start + by, self.len)
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// Immutable buffer contents at one revision
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    text: Arc<str>,
    revision: Revision,
}

impl TextSnapshot {
    pub fn new(text: impl Into<Arc<str>>, revision: Revision) -> Self {
        Self {
            text: text.into(),
            revision,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::new(0, self.text.len())
    }

    /// Text of `range`, clamped to the buffer
    pub fn slice(&self, range: TextRange) -> &str {
        let start = range.start.min(self.text.len());
        let end = range.end().min(self.text.len());
        self.text.get(start..end).unwrap_or("")
    }

    /// `offset` clamped to the buffer and moved back to a char boundary
    pub fn floor_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Start offset of the line containing `offset`
    pub fn line_start(&self, offset: usize) -> usize {
        let offset = self.floor_boundary(offset);
        self.text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// End of the line content starting at or containing `offset`,
    /// excluding the `\n` and a preceding `\r`.
    pub fn line_content_end(&self, offset: usize) -> usize {
        let offset = self.floor_boundary(offset);
        let end = self.text[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(self.text.len());
        if end > offset && self.text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    /// Content range (no terminator) of the line containing `offset`
    pub fn line_range(&self, offset: usize) -> TextRange {
        let start = self.line_start(offset);
        TextRange::from_bounds(start, self.line_content_end(start))
    }

    /// Widen `range` to whole lines (terminator of the last line excluded)
    pub fn widen_to_lines(&self, range: TextRange) -> TextRange {
        let start = self.line_start(range.start);
        let end = self.line_content_end(range.end().max(start));
        TextRange::from_bounds(start, end.max(start))
    }

    /// Content range of the line before the one starting at `line_start`
    pub fn previous_line(&self, line_start: usize) -> Option<TextRange> {
        if line_start == 0 {
            return None;
        }
        Some(self.line_range(line_start - 1))
    }

    /// Split `range` into per-line content ranges, dropping empty ones
    pub fn split_lines(&self, range: TextRange) -> Vec<TextRange> {
        let mut pieces = Vec::new();
        let mut start = self.floor_boundary(range.start);
        let end = self.floor_boundary(range.end());
        while start < end {
            let line_end = self.line_content_end(start).min(end);
            if line_end > start {
                pieces.push(TextRange::from_bounds(start, line_end));
            }
            match self.text[start..end].find('\n') {
                Some(i) => start = start + i + 1,
                None => break,
            }
        }
        pieces
    }

    /// Convert a byte offset to a zero-based (line, column) pair. Columns
    /// count characters.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let offset = self.floor_boundary(offset);
        let line = self.text[..offset].matches('\n').count();
        let start = self.line_start(offset);
        (line, self.text[start..offset].chars().count())
    }

    /// Convert a zero-based (line, column-in-characters) pair to a byte offset
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        let mut start = 0;
        for _ in 0..line {
            start += self.text[start..].find('\n')? + 1;
        }
        let end = self.line_content_end(start);
        let content = &self.text[start..end];
        if column == content.chars().count() {
            return Some(end);
        }
        content.char_indices().nth(column).map(|(i, _)| start + i)
    }
}
