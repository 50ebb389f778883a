//! Source positions of tokens and syntax errors.

use std::fmt;

/// A position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    /// Line number, starting at 1.
    pub line: usize,
    /// Byte column within the line, starting at 0.
    pub col: usize,
    /// Byte offset from the start of the input.
    pub offset: usize,
}

impl Pos {
    /// The position of the first byte of an input.
    pub const START: Self = Self {
        line: 1,
        col: 0,
        offset: 0,
    };

    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, col: usize, offset: usize) -> Self {
        Self { line, col, offset }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        assert_eq!(Pos::new(2, 7, 30).to_string(), "line 2 column 7");
        assert_eq!(Pos::START, Pos::new(1, 0, 0));
    }
}
