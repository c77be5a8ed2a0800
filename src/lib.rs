//! # genqueens
//!
//! An annealed genetic algorithm search for the N-queens problem.
//!
//! ```rust
//! use std::time::Duration;
//! use genqueens::evolution::{SearchLauncher, SearchOptions};
//!
//! let options = SearchOptions::builder()
//!     .board_size(8)
//!     .population_size(100)
//!     .seed(42)
//!     .deadline(Duration::from_secs(30))
//!     .build();
//!
//! let result = SearchLauncher::new(options).unwrap().launch().unwrap();
//! if let Some(board) = result.solution() {
//!     println!("{}", board);
//! }
//! ```

pub mod board;
pub mod breeding;
pub mod error;
pub mod evolution;
pub mod rng;

// Re-export commonly used types for convenience
pub use board::{Board, Piece};
pub use error::{QueensError, Result, ResultExt};
