//! # Breeding Operators
//!
//! The operators that turn parents into the next generation:
//!
//! - [`reproduce`] crosses two boards over the vertical midline and returns two
//!   children.
//! - [`mutate`] moves the queen of one random column to a random row.
//!
//! Both expect boards with one queen per column, which is what
//! [`Board::random`](crate::board::Board::random) produces and what both
//! operators preserve. A placement error raised while breeding means a parent
//! broke that shape. It comes back as [`QueensError::Breeding`] and the search
//! does not try to recover from it.
//!
//! [`QueensError::Breeding`]: crate::error::QueensError::Breeding

pub mod crossover;
pub mod mutation;

pub use crossover::{crossover_point, reproduce};
pub use mutation::mutate;
