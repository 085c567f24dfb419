//! Source positions, spans and line/column mapping.
//!
//! Offsets count characters (Unicode scalar values) from the start of the
//! source, which is how the scanner indexes its input.

use std::fmt;
use std::ops::Range;

/// A character offset into the source text.
pub type TextPos = u32;

/// A span in source text, defined by a start offset and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end offsets.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self { start, length: end.saturating_sub(start) }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { start: pos, length: 0 }
    }

    /// The end offset of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A text range with start and end offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextRange {
    /// Inclusive start offset.
    pub pos: TextPos,
    /// Exclusive end offset.
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos < self.end
    }

    /// Whether `other` lies entirely inside this range.
    #[inline]
    pub fn contains_range(&self, other: TextRange) -> bool {
        other.pos >= self.pos && other.end <= self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

impl From<TextSpan> for TextRange {
    fn from(span: TextSpan) -> Self {
        TextRange::new(span.start, span.end())
    }
}

/// 0-based line and column of a source offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Offsets of every line start, used to turn offsets into line/column pairs.
///
/// The map is computed once from the immutable input, so it never needs to be
/// saved or restored when the scanner backtracks.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars())
    }

    /// Build a line map from an already-decoded character sequence.
    /// `\r\n` counts as one line break.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut line_starts = vec![0u32];
        let mut chars = chars.into_iter().peekable();
        let mut pos: TextPos = 0;
        while let Some(ch) = chars.next() {
            pos += 1;
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        pos += 1;
                    }
                    line_starts.push(pos);
                }
                '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(pos),
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// The 0-based line containing `pos`.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn { line, character: pos - line_start }
    }

    pub fn line_start(&self, line: u32) -> Option<TextPos> {
        self.line_starts.get(line as usize).copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
