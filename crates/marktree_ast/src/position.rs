//! Source position types.
//!
//! Block nodes may remember where they came from in the markdown source.
//! Lines and columns are both 1-indexed; 0 is reserved as the "unknown"
//! sentinel returned by the tree's position getters.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourcePos {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

impl SourcePos {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The range of source text a block node was parsed from.
///
/// `end` points at the last character of the block, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceRange {
    /// Start position.
    pub start: SourcePos,
    /// End position.
    pub end: SourcePos,
}

impl SourceRange {
    /// Creates a new range.
    #[inline]
    pub const fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// Returns true if the range starts and ends on the same line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Returns true if `pos` lies within this range.
    #[inline]
    pub fn contains(&self, pos: SourcePos) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl std::fmt::Display for SourceRange {
    /// Formats as `line:column-line:column`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}
