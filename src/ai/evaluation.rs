use crate::domino::{Board, Hand, TOTAL_TILES};

const PIP_WEIGHT: f64 = 1.0;
const MOBILITY_WEIGHT: f64 = 2.0;
const TILE_LEAD_WEIGHT: f64 = 5.0;

/// Static score of `hand` on `board`; higher is better for the hand's owner.
///
/// Rewards a light hand, many playable placements and holding fewer tiles than the opponent,
/// whose tile count is whatever the board, the boneyard and this hand do not account for.
pub fn evaluate(board: &Board, boneyard_size: usize, hand: &Hand) -> f64 {
    let opponent_count =
        TOTAL_TILES as i64 - boneyard_size as i64 - hand.len() as i64 - board.len() as i64;
    let mobility = hand.legal_placements(board).len() as f64;
    let lead = (opponent_count - hand.len() as i64) as f64;

    -PIP_WEIGHT * hand.pip_sum() as f64 + MOBILITY_WEIGHT * mobility + TILE_LEAD_WEIGHT * lead
}
