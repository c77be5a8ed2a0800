//! # Error Types
//!
//! This module defines the error type shared by the board model, the breeding
//! operators and the search loop.
//!
//! Board operations report misuse as values: placing onto an occupied cell,
//! removing from an empty one, or addressing a coordinate outside the board.
//! The breeding and search layers never retry these. A crossover or mutation
//! that produces one of them means the population holds a malformed board, so
//! the error is propagated with `?` and the search is aborted.
//!
//! Running out of time is not an error. A search that hits its deadline returns
//! [`SearchOutcome::NoSolution`](crate::evolution::SearchOutcome::NoSolution).
//!
//! ## Examples
//!
//! ```rust
//! use genqueens::board::{Board, Piece};
//! use genqueens::error::QueensError;
//!
//! let mut board = Board::new(8).unwrap();
//! board.place_piece(Piece::new(1, 6)).unwrap();
//!
//! match board.place_piece(Piece::new(1, 6)) {
//!     Err(QueensError::Occupied { x: 1, y: 6 }) => {}
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while building boards or running a search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueensError {
    /// A coordinate lies outside `[1, N]` on either axis.
    #[error("location {x}, {y} is invalid")]
    OutOfBounds { x: usize, y: usize },

    /// A queen was placed onto a cell that already holds one.
    #[error("location {x}, {y} is already taken")]
    Occupied { x: usize, y: usize },

    /// A queen was removed from a cell that holds none.
    #[error("location {x}, {y} is already empty")]
    EmptyCell { x: usize, y: usize },

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a breeding operation fails.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when a control timer thread cannot be started.
    #[error("Timer error: {0}")]
    Timer(String),
}

/// A specialized Result type for board and search operations.
pub type Result<T> = std::result::Result<T, QueensError>;

/// Extension trait for Result to add breeding context to board errors.
///
/// The breeding layer uses it to turn a low-level placement error into a
/// [`QueensError::Breeding`] that names the operator which hit it.
///
/// ## Examples
///
/// ```rust
/// use genqueens::board::{Board, Piece};
/// use genqueens::error::{QueensError, ResultExt};
///
/// let mut board = Board::new(4).unwrap();
/// let err = board
///     .place_piece(Piece::new(5, 1))
///     .context("crossover")
///     .unwrap_err();
///
/// assert_eq!(
///     err,
///     QueensError::Breeding("crossover: location 5, 1 is invalid".to_string())
/// );
/// ```
pub trait ResultExt<T> {
    /// Wraps the error into [`QueensError::Breeding`] prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display,
    {
        self.map_err(|e| QueensError::Breeding(format!("{}: {}", context, e)))
    }
}
