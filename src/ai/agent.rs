use rand::seq::SliceRandom;
use rand::Rng;

use crate::domino::{opponent_tile_count, Board, Hand, Move, Result};

/// A move picker that sees what a player sees: the board, its own hand and the boneyard size.
pub trait Agent {
    fn name(&self) -> &str;

    /// Never mutates the caller's board or hand; engines search on their own copies.
    fn choose_move<R: Rng>(
        &mut self,
        rng: &mut R,
        board: &Board,
        hand: &Hand,
        boneyard_size: usize,
    ) -> Result<Move>;
}

/// Decision when no tile can be placed.
pub(crate) fn stuck_move(boneyard_size: usize) -> Move {
    if boneyard_size > 0 {
        Move::Draw
    } else {
        Move::Pass
    }
}

/// Plays a uniformly random legal placement.
#[derive(Debug, Clone, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move<R: Rng>(
        &mut self,
        rng: &mut R,
        board: &Board,
        hand: &Hand,
        boneyard_size: usize,
    ) -> Result<Move> {
        opponent_tile_count(board, hand, boneyard_size)?;

        let placements = hand.legal_placements(board);
        Ok(match placements.choose(rng) {
            Some(placement) => Move::Place(*placement),
            None => stuck_move(boneyard_size),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domino::{DominoError, End, Placement, Tile};

    fn t(a: u8, b: u8) -> Tile {
        Tile::new(a, b).unwrap()
    }

    #[test]
    fn random_agent_plays_legal_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let board = Board::from_placements([Placement::new(t(4, 4), End::Left)]).unwrap();
        let hand = Hand::from_tiles([t(4, 1), t(2, 3)]);

        for _ in 0..20 {
            let mv = RandomAgent.choose_move(&mut rng, &board, &hand, 13).unwrap();
            let placement = mv.placement().unwrap();
            assert_eq!(placement.tile, t(4, 1));
        }
    }

    #[test]
    fn stuck_agent_draws_then_passes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let board = Board::from_placements([Placement::new(t(4, 4), End::Left)]).unwrap();
        let hand = Hand::from_tiles([t(2, 3)]);

        assert_eq!(RandomAgent.choose_move(&mut rng, &board, &hand, 5).unwrap(), Move::Draw);
        assert_eq!(RandomAgent.choose_move(&mut rng, &board, &hand, 0).unwrap(), Move::Pass);
    }

    #[test]
    fn oversized_boneyard_is_inconsistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let hand = Hand::from_tiles([t(2, 3)]);
        assert_eq!(
            RandomAgent.choose_move(&mut rng, &Board::new(), &hand, 28),
            Err(DominoError::StateInconsistency {
                board: 0,
                hand: 1,
                boneyard: 28
            })
        );
    }
}
