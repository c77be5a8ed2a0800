use std::fmt;

/// A queen's location on the board.
///
/// Coordinates are 1-indexed: `x` is the column and `y` the row, and both lie in
/// `[1, N]` for a piece that can be placed on an N×N board. A `Piece` carries no
/// reference to a board, so breeding copies pieces by value from parent to child.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    x: usize,
    y: usize,
}

impl Piece {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The column, counted from 1.
    pub fn x(&self) -> usize {
        self.x
    }

    /// The row, counted from 1.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Returns `true` if both coordinates lie in `[1, size]`.
    pub fn is_within(&self, size: usize) -> bool {
        (1..=size).contains(&self.x) && (1..=size).contains(&self.y)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
