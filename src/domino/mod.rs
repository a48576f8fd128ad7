//! Tiles, the board and hands of a double-six two-player round.

mod board;
pub mod error;
mod hand;
mod moves;
mod tile;
mod tile_set;

pub use board::Board;
pub use error::{DominoError, Result};
pub use hand::{Boneyard, Hand, HAND_SIZE};
pub use moves::{End, Move, Placement};
pub use tile::{Tile, MAX_PIP, TOTAL_TILES};
pub use tile_set::{TileSet, TileSetIter};

/// Checks that board, hand and boneyard sizes leave a non-negative opponent hand and returns its size.
pub fn opponent_tile_count(board: &Board, hand: &Hand, boneyard_size: usize) -> Result<usize> {
    let accounted = board.len() + hand.len() + boneyard_size;
    TOTAL_TILES
        .checked_sub(accounted)
        .ok_or(DominoError::StateInconsistency {
            board: board.len(),
            hand: hand.len(),
            boneyard: boneyard_size,
        })
}

/// Tiles on neither the board nor in `hand`: the opponent's hand plus the boneyard.
pub fn unseen_tiles(board: &Board, hand: &Hand) -> TileSet {
    TileSet::full().difference(board.tiles()).difference(hand.tiles())
}
