use crate::{
    board::{Board, Piece},
    error::{QueensError, Result, ResultExt},
};

/// Returns the last column of the left half of a board with `size` columns.
///
/// # Errors
///
/// Returns [`QueensError::Configuration`] if `size` is odd, since the halves
/// would not be the same width.
pub fn crossover_point(size: usize) -> Result<usize> {
    if size % 2 != 0 {
        return Err(QueensError::Configuration(format!(
            "Board size must be even for crossover, got {}",
            size
        )));
    }
    Ok(size / 2)
}

/// Crosses `mother` and `father` over the vertical midline.
///
/// The first child takes the mother's left half (`x <= N/2`) and the father's
/// right half (`x >= N/2 + 1`). The second child takes the remaining halves,
/// so every piece of both parents ends up in exactly one child. Both children
/// have their fitness computed before they are returned.
///
/// Passing the same board as both parents is allowed; the children are then
/// copies of it.
///
/// # Errors
///
/// - [`QueensError::Configuration`] if the parents differ in size or the size is odd.
/// - [`QueensError::Breeding`] if two contributed pieces land on the same cell,
///   which only happens with malformed parents.
///
/// # Example
///
/// ```rust
/// use genqueens::board::Board;
/// use genqueens::breeding::reproduce;
/// use genqueens::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(5);
/// let mother = Board::random(8, &mut rng).unwrap();
/// let father = Board::random(8, &mut rng).unwrap();
///
/// let (first, second) = reproduce(&mother, &father).unwrap();
/// assert_eq!(first.pieces().len(), 8);
/// assert_eq!(second.pieces().len(), 8);
/// ```
pub fn reproduce(mother: &Board, father: &Board) -> Result<(Board, Board)> {
    if mother.size() != father.size() {
        return Err(QueensError::Configuration(format!(
            "Cannot cross boards of size {} and {}",
            mother.size(),
            father.size()
        )));
    }

    let size = mother.size();
    let midline = crossover_point(size)?;
    let is_left = |piece: &&Piece| piece.x() <= midline;

    let mother_left = mother.pieces().iter().filter(is_left);
    let mother_right = mother.pieces().iter().filter(|piece| !is_left(piece));
    let father_left = father.pieces().iter().filter(is_left);
    let father_right = father.pieces().iter().filter(|piece| !is_left(piece));

    let first = Board::from_pieces(size, mother_left.chain(father_right).copied())
        .context("crossover into first child")?;
    let second = Board::from_pieces(size, mother_right.chain(father_left).copied())
        .context("crossover into second child")?;

    Ok((first, second))
}
