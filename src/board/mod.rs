//! # Board
//!
//! The `Board` struct is the individual evolved by the search: an N×N grid, the
//! ordered list of queens placed on it, and a cached fitness score.
//!
//! Fitness is the number of attacks between queens, counted once from each side
//! of every attacking pair. A board with fitness 0 is a solution to the
//! N-queens problem.
//!
//! ## Attacks
//!
//! A queen attacks along eight rays: left, right, down, up and the four
//! diagonals. Each ray stops at the board edge or at the first occupied cell,
//! and that first occupied cell is the only piece the ray captures.
//!
//! ## Example
//!
//! ```rust
//! use genqueens::board::{Board, Piece};
//!
//! let mut board = Board::new(8).unwrap();
//! board.place_piece(Piece::new(1, 1)).unwrap();
//! board.place_piece(Piece::new(4, 4)).unwrap();
//!
//! assert_eq!(board.attacks_from(Piece::new(1, 1)).unwrap(), vec![Piece::new(4, 4)]);
//! assert_eq!(board.total_conflicts(), 2);
//! ```

mod piece;

pub use piece::Piece;

use std::fmt;

use crate::{
    error::{QueensError, Result},
    rng::RandomNumberGenerator,
};

/// Ray directions as `(dx, dy)`: left, right, down, up, then the diagonals.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Queen,
}

/// An N×N board holding queens.
///
/// `cells` and `pieces` always describe the same placement: a cell holds a queen
/// if and only if a piece in `pieces` sits on it.
///
/// With the `serde` feature a board is written as its size and pieces only.
/// Reading one back replays the pieces through [`Board::from_pieces`], so a
/// malformed input is rejected and the fitness is always recomputed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BoardRepr", into = "BoardRepr"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    pieces: Vec<Piece>,
    fitness: usize,
}

impl Board {
    /// Creates an empty board with `size` columns and `size` rows.
    ///
    /// # Errors
    ///
    /// Returns [`QueensError::Configuration`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(QueensError::Configuration(
                "Board size cannot be zero".to_string(),
            ));
        }

        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
            pieces: Vec::with_capacity(size),
            fitness: 0,
        })
    }

    /// Creates a board with exactly one queen per column, each on a uniformly
    /// random row, and computes its fitness.
    pub fn random(size: usize, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let mut board = Self::new(size)?;
        for x in 1..=size {
            let y = rng.gen_coordinate(size);
            board.place_piece(Piece::new(x, y))?;
        }
        board.refresh_fitness();
        Ok(board)
    }

    /// Creates a board from a batch of pieces and computes its fitness.
    ///
    /// # Errors
    ///
    /// Fails on the first piece that is out of bounds or lands on an occupied cell.
    pub fn from_pieces<I>(size: usize, pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Self::new(size)?;
        for piece in pieces {
            board.place_piece(piece)?;
        }
        board.refresh_fitness();
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The placed queens, in placement order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The cached fitness. See [`Board::refresh_fitness`].
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    /// Recomputes the cached fitness from the current placement.
    pub fn refresh_fitness(&mut self) -> usize {
        self.fitness = self.total_conflicts();
        self.fitness
    }

    /// Returns whether `piece`'s cell holds a queen.
    pub fn is_occupied(&self, piece: Piece) -> Result<bool> {
        self.check_bounds(piece)?;
        Ok(self.cell(piece) == Cell::Queen)
    }

    /// Places a queen at `piece`.
    ///
    /// # Errors
    ///
    /// - [`QueensError::OutOfBounds`] if either coordinate lies outside `[1, N]`.
    /// - [`QueensError::Occupied`] if the cell already holds a queen.
    pub fn place_piece(&mut self, piece: Piece) -> Result<()> {
        self.check_bounds(piece)?;
        if self.cell(piece) == Cell::Queen {
            return Err(QueensError::Occupied {
                x: piece.x(),
                y: piece.y(),
            });
        }

        let index = self.index(piece);
        self.cells[index] = Cell::Queen;
        self.pieces.push(piece);
        Ok(())
    }

    /// Removes the queen at `piece`.
    ///
    /// # Errors
    ///
    /// - [`QueensError::OutOfBounds`] if either coordinate lies outside `[1, N]`.
    /// - [`QueensError::EmptyCell`] if the cell holds no queen.
    pub fn remove_piece(&mut self, piece: Piece) -> Result<()> {
        self.check_bounds(piece)?;
        if self.cell(piece) == Cell::Empty {
            return Err(QueensError::EmptyCell {
                x: piece.x(),
                y: piece.y(),
            });
        }

        let index = self.index(piece);
        self.cells[index] = Cell::Empty;
        if let Some(position) = self.pieces.iter().position(|placed| *placed == piece) {
            self.pieces.remove(position);
        }
        Ok(())
    }

    /// Returns the queens in column `x`, scanning every row from the bottom up.
    pub fn pieces_in_column(&self, x: usize) -> Vec<Piece> {
        (1..=self.size)
            .map(|y| Piece::new(x, y))
            .filter(|piece| piece.is_within(self.size) && self.cell(*piece) == Cell::Queen)
            .collect()
    }

    /// Returns the queens that a queen standing at `piece` would capture.
    ///
    /// `piece` does not have to be placed. At most one queen is returned per
    /// direction: the first occupied cell along the ray.
    ///
    /// # Errors
    ///
    /// Returns [`QueensError::OutOfBounds`] if `piece` is not on the board.
    pub fn attacks_from(&self, piece: Piece) -> Result<Vec<Piece>> {
        self.check_bounds(piece)?;
        Ok(self.ray_hits(piece).collect())
    }

    /// Sums, over every placed queen, the number of queens it attacks.
    ///
    /// Each attacking pair is counted from both sides, so one pair contributes 2.
    pub fn total_conflicts(&self) -> usize {
        self.pieces
            .iter()
            .map(|piece| self.ray_hits(*piece).count())
            .sum()
    }

    /// Writes a plain text grid: the top row is `N`, queens are `Q`, empty
    /// cells are `.`, column numbers run along the bottom.
    pub fn render<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let width = self.size.to_string().len();

        for y in (1..=self.size).rev() {
            write!(out, "{:>width$} |", y, width = width)?;
            for x in 1..=self.size {
                let mark = match self.cell(Piece::new(x, y)) {
                    Cell::Queen => 'Q',
                    Cell::Empty => '.',
                };
                write!(out, " {:>width$}", mark, width = width)?;
            }
            writeln!(out)?;
        }

        write!(out, "{:width$}  ", "", width = width)?;
        for x in 1..=self.size {
            write!(out, " {:>width$}", x, width = width)?;
        }
        writeln!(out)
    }

    fn ray_hits(&self, origin: Piece) -> impl Iterator<Item = Piece> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dx, dy)| self.first_blocker(origin, dx, dy))
    }

    fn first_blocker(&self, origin: Piece, dx: isize, dy: isize) -> Option<Piece> {
        let size = self.size as isize;
        let (mut x, mut y) = (origin.x() as isize, origin.y() as isize);

        loop {
            x += dx;
            y += dy;
            if x < 1 || y < 1 || x > size || y > size {
                return None;
            }

            let candidate = Piece::new(x as usize, y as usize);
            if self.cell(candidate) == Cell::Queen {
                return Some(candidate);
            }
        }
    }

    fn check_bounds(&self, piece: Piece) -> Result<()> {
        if piece.is_within(self.size) {
            Ok(())
        } else {
            Err(QueensError::OutOfBounds {
                x: piece.x(),
                y: piece.y(),
            })
        }
    }

    fn index(&self, piece: Piece) -> usize {
        (piece.x() - 1) * self.size + (piece.y() - 1)
    }

    fn cell(&self, piece: Piece) -> Cell {
        self.cells[self.index(piece)]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardRepr {
    size: usize,
    pieces: Vec<Piece>,
}

#[cfg(feature = "serde")]
impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            size: board.size,
            pieces: board.pieces,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<BoardRepr> for Board {
    type Error = QueensError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        Board::from_pieces(repr.size, repr.pieces)
    }
}
