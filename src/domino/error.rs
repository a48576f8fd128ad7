use thiserror::Error;

use crate::domino::{End, Tile};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DominoError {
    #[error("tile {0} is not in the hand")]
    IllegalState(Tile),

    #[error("tile counts do not reconcile: board {board}, hand {hand}, boneyard {boneyard}")]
    StateInconsistency {
        board: usize,
        hand: usize,
        boneyard: usize,
    },

    #[error("tile {tile} cannot be placed at the {end} end")]
    IllegalPlacement { tile: Tile, end: End },

    #[error("pips out of range: {0}-{1}")]
    InvalidTile(u8, u8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DominoError>;
