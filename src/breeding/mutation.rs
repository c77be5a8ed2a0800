use crate::{
    board::{Board, Piece},
    error::{Result, ResultExt},
    rng::RandomNumberGenerator,
};

/// Moves the queen of one uniformly chosen column to a uniformly chosen row.
///
/// Every queen found in the column is removed before the new one is placed, so
/// the column ends up with exactly one queen. The new row may equal the old
/// one, in which case the placement is unchanged.
///
/// Unlike a bare relocation, this recomputes the board's fitness afterwards so
/// the cached score always matches the placement.
///
/// # Errors
///
/// Returns [`QueensError::Breeding`](crate::error::QueensError::Breeding) if the
/// board rejects the removal or the placement, which means it was already
/// inconsistent.
pub fn mutate(board: &mut Board, rng: &mut RandomNumberGenerator) -> Result<()> {
    let size = board.size();
    let column = rng.gen_coordinate(size);

    for piece in board.pieces_in_column(column) {
        board.remove_piece(piece).context("mutation")?;
    }

    let row = rng.gen_coordinate(size);
    board
        .place_piece(Piece::new(column, row))
        .context("mutation")?;

    board.refresh_fitness();
    Ok(())
}
