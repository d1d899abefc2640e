//! Source location types for sailtree.
//!
//! Tokens and tree nodes carry byte ranges into the source buffer, never
//! owning the text. The source must outlive any slicing done through them.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// A zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// The span moved by `delta` bytes.
    pub fn shifted(&self, delta: isize) -> Self {
        Self {
            start: (self.start as isize + delta) as usize,
            end: (self.end as isize + delta) as usize,
        }
    }
}

/// A line/column location in the source, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number in bytes (0-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl Position {
    /// Locate `offset` within `source`.
    ///
    /// Offsets past the end of the source clamp to the final position.
    pub fn of(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count();
        let column = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|nl| offset - nl - 1)
            .unwrap_or(offset);
        Self {
            line,
            column,
            offset,
        }
    }
}

/// An edit to the source buffer, in byte offsets.
///
/// The bytes `[start, old_end)` of the old source were replaced by the
/// bytes `[start, new_end)` of the new source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEdit {
    /// First changed byte
    pub start: usize,
    /// End of the replaced range in the old source
    pub old_end: usize,
    /// End of the replacement range in the new source
    pub new_end: usize,
}

impl InputEdit {
    /// Create an edit record.
    pub fn new(start: usize, old_end: usize, new_end: usize) -> Self {
        debug_assert!(start <= old_end);
        debug_assert!(start <= new_end);
        Self {
            start,
            old_end,
            new_end,
        }
    }

    /// An edit inserting `len` bytes at `offset`.
    pub fn insertion(offset: usize, len: usize) -> Self {
        Self::new(offset, offset, offset + len)
    }

    /// An edit deleting the bytes `[start, old_end)`.
    pub fn deletion(start: usize, old_end: usize) -> Self {
        Self::new(start, old_end, start)
    }

    /// How far bytes after the edit moved.
    pub fn delta(&self) -> isize {
        self.new_end as isize - self.old_end as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(2, 7);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(span.contains(2));
        assert!(span.contains(6));
        assert!(!span.contains(7));

        let empty = Span::empty(3);
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_span_shifted() {
        let span = Span::new(4, 9);
        assert_eq!(span.shifted(3), Span::new(7, 12));
        assert_eq!(span.shifted(-4), Span::new(0, 5));
    }

    #[test]
    fn test_position_of() {
        let source = "ab\ncde\nf";
        assert_eq!(Position::of(source, 0), Position { line: 0, column: 0, offset: 0 });
        assert_eq!(Position::of(source, 2), Position { line: 0, column: 2, offset: 2 });
        assert_eq!(Position::of(source, 3), Position { line: 1, column: 0, offset: 3 });
        assert_eq!(Position::of(source, 5), Position { line: 1, column: 2, offset: 5 });
        assert_eq!(Position::of(source, 7), Position { line: 2, column: 0, offset: 7 });
    }

    #[test]
    fn test_position_clamps() {
        let pos = Position::of("ab", 99);
        assert_eq!(pos.offset, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_edit_delta() {
        assert_eq!(InputEdit::insertion(4, 3).delta(), 3);
        assert_eq!(InputEdit::deletion(4, 9).delta(), -5);
        assert_eq!(InputEdit::new(1, 4, 4).delta(), 0);
    }
}
