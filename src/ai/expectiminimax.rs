//! Depth-limited expectiminimax over the unseen tiles.
//!
//! Max layers are the reasoning player's placements, chance layers average over every tile the
//! opponent might hold, and min layers let the opponent place that tile wherever it hurts most.
//! No randomness is involved, so a given position and depth always yields the same placement.

use rand::Rng;
use tracing::{debug, trace};

use crate::ai::agent::{stuck_move, Agent};
use crate::ai::config::ExpectiminimaxConfig;
use crate::ai::evaluation::evaluate;
use crate::domino::{
    opponent_tile_count, unseen_tiles, Board, DominoError, Hand, Move, Placement, Result, Tile, TileSet,
    TOTAL_TILES,
};

#[derive(Debug, Clone, Default)]
pub struct Expectiminimax {
    config: ExpectiminimaxConfig,
}

impl Expectiminimax {
    pub fn new(config: ExpectiminimaxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExpectiminimaxConfig {
        &self.config
    }

    /// Best placement for `hand`, or `None` when nothing can be placed.
    pub fn choose_placement(&self, board: &Board, hand: &Hand, boneyard_size: usize) -> Result<Option<Placement>> {
        Ok(self.search(board, hand, boneyard_size)?.1)
    }

    /// Value of the position together with the placement that achieves it.
    pub fn search(&self, board: &Board, hand: &Hand, boneyard_size: usize) -> Result<(f64, Option<Placement>)> {
        if !board.tiles().is_disjoint(hand.tiles()) {
            return Err(DominoError::StateInconsistency {
                board: board.len(),
                hand: hand.len(),
                boneyard: boneyard_size,
            });
        }

        let (value, placement) = self.max_node(board, hand, boneyard_size, self.config.depth, true)?;
        debug!(
            depth = self.config.depth,
            value,
            placement = ?placement,
            "expectiminimax search complete"
        );
        Ok((value, placement))
    }

    fn max_node(
        &self,
        board: &Board,
        hand: &Hand,
        boneyard_size: usize,
        depth: usize,
        root: bool,
    ) -> Result<(f64, Option<Placement>)> {
        // the root still picks among its placements when the round is about to end
        if depth == 0 || (!root && is_terminal(board, hand, boneyard_size)) {
            return Ok((evaluate(board, boneyard_size, hand), None));
        }

        let placements = hand.legal_placements(board);
        if placements.is_empty() {
            return Ok((evaluate(board, boneyard_size, hand), None));
        }

        let mut best_value = f64::NEG_INFINITY;
        let mut best_placement = None;

        for placement in placements {
            let (next_board, next_hand) = play(board, hand, placement)?;

            let value = self.chance_node(&next_board, &next_hand, boneyard_size, depth - 1)?;
            if root {
                trace!(%placement, value, "root placement scored");
            }

            // strict comparison keeps the first of equal placements
            if value > best_value {
                best_value = value;
                best_placement = Some(placement);
            }
        }

        Ok((best_value, best_placement))
    }

    fn chance_node(&self, board: &Board, hand: &Hand, boneyard_size: usize, depth: usize) -> Result<f64> {
        if depth == 0 || is_terminal(board, hand, boneyard_size) {
            return Ok(evaluate(board, boneyard_size, hand));
        }

        let candidates = unseen_tiles(board, hand);
        if candidates.is_empty() {
            return Ok(0.0);
        }

        let probability = 1.0 / candidates.len() as f64;
        let mut expected = 0.0;
        for tile in candidates {
            expected += probability * self.min_node(board, hand, boneyard_size, tile, depth)?;
        }
        Ok(expected)
    }

    fn min_node(&self, board: &Board, hand: &Hand, boneyard_size: usize, tile: Tile, depth: usize) -> Result<f64> {
        if depth == 0 || is_terminal(board, hand, boneyard_size) {
            return Ok(evaluate(board, boneyard_size, hand));
        }

        let placements = board.legal_placements(&TileSet::from_iter([tile]));
        if placements.is_empty() {
            // the opponent passes and the turn comes straight back
            return Ok(self.max_node(board, hand, boneyard_size, depth - 1, false)?.0);
        }

        let mut worst = f64::INFINITY;
        for placement in placements {
            let next_board = board.apply(placement)?;
            worst = worst.min(self.max_node(&next_board, hand, boneyard_size, depth - 1, false)?.0);
        }
        Ok(worst)
    }
}

/// Board and hand after the searcher plays `placement` on its own copies.
fn play(board: &Board, hand: &Hand, placement: Placement) -> Result<(Board, Hand)> {
    let mut next_hand = *hand;
    next_hand.remove(placement.tile)?;
    Ok((board.apply(placement)?, next_hand))
}

/// The round is over for the searcher once its hand is empty or no tile is left unaccounted for.
fn is_terminal(board: &Board, hand: &Hand, boneyard_size: usize) -> bool {
    hand.is_empty() || board.len() + boneyard_size + hand.len() >= TOTAL_TILES
}

impl Agent for Expectiminimax {
    fn name(&self) -> &str {
        "expectiminimax"
    }

    fn choose_move<R: Rng>(
        &mut self,
        _rng: &mut R,
        board: &Board,
        hand: &Hand,
        boneyard_size: usize,
    ) -> Result<Move> {
        opponent_tile_count(board, hand, boneyard_size)?;

        Ok(match self.choose_placement(board, hand, boneyard_size)? {
            Some(placement) => Move::Place(placement),
            None => stuck_move(boneyard_size),
        })
    }
}
