//! Line/column coordinates
//!
//! Columns count characters, matching ropey's char indexing.

use serde::{Deserialize, Serialize};

/// A position in a document (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number in characters (0-indexed)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A start/end pair of positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering `start_col..end_col` on a single line
    pub const fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start: Position::new(line, start_col),
            end: Position::new(line, end_col),
        }
    }

    /// Whether `pos` lies inside the span. Both ends count as inside.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_is_inclusive() {
        let span = Span::on_line(3, 4, 8);
        assert!(span.contains(Position::new(3, 4)));
        assert!(span.contains(Position::new(3, 6)));
        assert!(span.contains(Position::new(3, 8)));
        assert!(!span.contains(Position::new(3, 9)));
        assert!(!span.contains(Position::new(2, 6)));
    }

    #[test]
    fn test_multi_line_span_contains() {
        let span = Span::new(Position::new(1, 5), Position::new(4, 2));
        assert!(span.contains(Position::new(2, 0)));
        assert!(span.contains(Position::new(1, 99)));
        assert!(!span.contains(Position::new(4, 3)));
    }
}
