use rand::seq::SliceRandom;
use rand::Rng;

use crate::domino::{Board, Boneyard, DominoError, Hand, Move, TileSet, HAND_SIZE, TOTAL_TILES};
use crate::{Outcome, State};

/// A fully observable round seen from the reasoning player, always positioned right after the
/// opponent's reply to the reasoning player's last move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameState {
    pub me: Hand,
    pub opponent: Hand,
    pub boneyard: Boneyard,
    pub board: Board,
}

impl GameState {
    pub fn new(me: Hand, opponent: Hand, boneyard: Boneyard, board: Board) -> Self {
        Self {
            me,
            opponent,
            boneyard,
            board,
        }
    }

    /// A fresh round: both hands dealt from a full boneyard, nothing on the board.
    pub fn deal<R: Rng>(rng: &mut R) -> Result<Self, DominoError> {
        let mut boneyard = Boneyard::new();
        let me = boneyard.deal(rng, HAND_SIZE)?;
        let opponent = boneyard.deal(rng, HAND_SIZE)?;
        Ok(Self::new(me, opponent, boneyard, Board::new()))
    }

    /// Every tile sits in exactly one of the two hands, the boneyard or the board.
    pub fn is_consistent(&self) -> bool {
        let parts = [
            self.me.tiles(),
            self.opponent.tiles(),
            self.boneyard.tiles(),
            self.board.tiles(),
        ];
        let pairwise_disjoint = parts.iter().enumerate().all(|(i, a)| {
            parts[i + 1..].iter().all(|b| a.is_disjoint(*b))
        });
        let total: usize = parts.iter().map(TileSet::len).sum();

        pairwise_disjoint && total == TOTAL_TILES
    }

    pub fn is_terminal(&self) -> bool {
        if self.me.is_empty() || self.opponent.is_empty() {
            return true;
        }
        self.boneyard.is_empty()
            && !self.me.can_play(&self.board)
            && !self.opponent.can_play(&self.board)
    }

    fn opponent_turn<R: Rng>(&mut self, rng: &mut R) -> Result<(), DominoError> {
        let placements = self.opponent.legal_placements(&self.board);
        if let Some(placement) = placements.choose(rng) {
            self.opponent.remove(placement.tile)?;
            self.board = self.board.apply(*placement)?;
        } else {
            draw_until_playable(&mut self.opponent, &mut self.boneyard, &self.board, rng);
        }
        Ok(())
    }
}

/// Draws until the hand has a legal placement or the boneyard runs dry.
fn draw_until_playable<R: Rng>(hand: &mut Hand, boneyard: &mut Boneyard, board: &Board, rng: &mut R) {
    while !hand.can_play(board) {
        match boneyard.draw_random(rng) {
            Some(tile) => hand.add(tile),
            None => break,
        }
    }
}

impl State<Move> for GameState {
    type Error = DominoError;

    fn actions(&self) -> Vec<Move> {
        let placements = self.me.legal_placements(&self.board);
        if !placements.is_empty() {
            return placements.into_iter().map(Move::Place).collect();
        }
        if !self.boneyard.is_empty() {
            vec![Move::Draw]
        } else if !self.is_terminal() {
            vec![Move::Pass]
        } else {
            Vec::new()
        }
    }

    fn apply_action<R: Rng>(&self, rng: &mut R, action: &Move) -> Result<Self, Self::Error> {
        let mut next = *self;

        match action {
            Move::Place(placement) => {
                next.me.remove(placement.tile)?;
                next.board = next.board.apply(*placement)?;
            }
            Move::Draw => draw_until_playable(&mut next.me, &mut next.boneyard, &next.board, rng),
            Move::Pass => {}
        }

        // a passing opponent hands the turn straight back
        if !next.me.is_empty() {
            next.opponent_turn(rng)?;
        }

        Ok(next)
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }

        let mine = self.me.pip_sum();
        let theirs = self.opponent.pip_sum();
        Some(if mine < theirs {
            Outcome::Won(theirs)
        } else if mine > theirs {
            Outcome::Lost(mine)
        } else {
            Outcome::Tied
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domino::{End, Placement, Tile};

    fn t(a: u8, b: u8) -> Tile {
        Tile::new(a, b).unwrap()
    }

    fn rest(used: &[TileSet]) -> Boneyard {
        let used = used.iter().fold(TileSet::empty(), |acc, set| acc.union(*set));
        Boneyard::from_tiles(TileSet::full().difference(used))
    }

    #[test]
    fn dealt_round_is_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let state = GameState::deal(&mut rng).unwrap();
        assert!(state.is_consistent());
        assert_eq!(state.boneyard.len(), TOTAL_TILES - 2 * HAND_SIZE);
        assert!(state.outcome().is_none());
    }

    #[test]
    fn placing_triggers_the_opponent_reply() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let me = Hand::from_tiles([t(1, 1), t(4, 5)]);
        let opponent = Hand::from_tiles([t(1, 6), t(2, 3)]);
        let boneyard = rest(&[me.tiles(), opponent.tiles()]);
        let state = GameState::new(me, opponent, boneyard, Board::new());

        let next = state
            .apply_action(&mut rng, &Move::place(t(1, 1), End::Left))
            .unwrap();

        // 1-6 is the only reply the opponent has
        assert!(!next.me.contains(t(1, 1)));
        assert!(!next.opponent.contains(t(1, 6)));
        assert_eq!(next.board.len(), 2);
        assert!(next.is_consistent());
    }

    #[test]
    fn playing_the_last_tile_ends_the_round_before_the_reply() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let me = Hand::from_tiles([t(0, 0)]);
        let opponent = Hand::from_tiles([t(0, 6), t(6, 6)]);
        let boneyard = rest(&[me.tiles(), opponent.tiles()]);
        let state = GameState::new(me, opponent, boneyard, Board::new());

        let next = state
            .apply_action(&mut rng, &Move::place(t(0, 0), End::Left))
            .unwrap();

        assert_eq!(next.opponent.len(), 2);
        assert_eq!(next.outcome(), Some(Outcome::Won(18)));
        assert_eq!(next.outcome().map(|o| o.utility()), Some(18));
    }

    #[test]
    fn draw_is_offered_only_when_stuck() {
        let board = Board::from_placements([Placement::new(t(0, 0), End::Left)]).unwrap();
        let me = Hand::from_tiles([t(1, 2)]);
        let opponent = Hand::from_tiles([t(3, 4)]);
        let boneyard = rest(&[me.tiles(), opponent.tiles(), board.tiles()]);
        let state = GameState::new(me, opponent, boneyard, board);

        assert_eq!(state.actions(), vec![Move::Draw]);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let next = state.apply_action(&mut rng, &Move::Draw).unwrap();
        assert!(next.me.len() > 1);
        assert!(next.is_consistent());
    }

    #[test]
    fn blocked_round_is_scored_on_pips() {
        let board = Board::from_placements([Placement::new(t(0, 0), End::Left)]).unwrap();
        let me = Hand::from_tiles([t(1, 2)]);
        let opponent = Hand::from_tiles([t(5, 6)]);
        let state = GameState::new(me, opponent, Boneyard::from_tiles(TileSet::empty()), board);

        assert!(state.is_terminal());
        assert!(state.actions().is_empty());
        assert_eq!(state.outcome(), Some(Outcome::Won(11)));
    }

    #[test]
    fn pass_is_offered_when_only_the_opponent_can_move() {
        let board = Board::from_placements([Placement::new(t(0, 0), End::Left)]).unwrap();
        let me = Hand::from_tiles([t(1, 2), t(3, 3)]);
        let opponent = Hand::from_tiles([t(0, 5), t(4, 4)]);
        let state = GameState::new(me, opponent, Boneyard::from_tiles(TileSet::empty()), board);

        assert_eq!(state.actions(), vec![Move::Pass]);

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let next = state.apply_action(&mut rng, &Move::Pass).unwrap();
        assert!(!next.opponent.contains(t(0, 5)));
    }
}
