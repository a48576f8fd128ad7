//! Resolving the hidden tiles into concrete opponent hands and draw piles.

use rand::seq::index;
use rand::Rng;
use tracing::{debug, warn};

use crate::ai::config::IsmctsConfig;
use crate::ai::determinable::Determinable;
use crate::ai::game_state::GameState;
use crate::domino::{
    opponent_tile_count, unseen_tiles, Board, Boneyard, DominoError, Hand, Result, Tile, TileSet,
};

/// What the reasoning player knows: the board, its own hand, and how many tiles the boneyard holds.
#[derive(Clone, Debug, PartialEq)]
pub struct InformationSet {
    board: Board,
    hand: Hand,
    boneyard_size: usize,
    opponent_count: usize,
    excluded_pips: Vec<u8>,
}

impl InformationSet {
    pub fn new(board: Board, hand: Hand, boneyard_size: usize) -> Result<Self> {
        let inconsistent = DominoError::StateInconsistency {
            board: board.len(),
            hand: hand.len(),
            boneyard: boneyard_size,
        };
        if !board.tiles().is_disjoint(hand.tiles()) {
            return Err(inconsistent);
        }

        let opponent_count = opponent_tile_count(&board, &hand, boneyard_size)?;
        let unseen = unseen_tiles(&board, &hand);
        if opponent_count > unseen.len() {
            return Err(inconsistent);
        }

        Ok(Self {
            board,
            hand,
            boneyard_size,
            opponent_count,
            excluded_pips: Vec::new(),
        })
    }

    /// Pips the opponent is believed not to hold.
    pub fn with_excluded_pips(mut self, pips: &[u8]) -> Self {
        self.excluded_pips = pips.to_vec();
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn boneyard_size(&self) -> usize {
        self.boneyard_size
    }

    pub fn opponent_count(&self) -> usize {
        self.opponent_count
    }

    /// Tiles hidden in the opponent's hand or the boneyard.
    pub fn unseen(&self) -> TileSet {
        unseen_tiles(&self.board, &self.hand)
    }

    /// Tiles the opponent hand is drawn from. Exclusions that leave too few tiles are ignored.
    pub fn opponent_candidates(&self) -> TileSet {
        let unseen = self.unseen();
        if self.excluded_pips.is_empty() {
            return unseen;
        }

        let allowed = unseen.without_pips(&self.excluded_pips);
        if allowed.len() < self.opponent_count {
            warn!(
                excluded = ?self.excluded_pips,
                allowed = allowed.len(),
                opponent_count = self.opponent_count,
                "pip exclusions cannot be satisfied, sampling from every unseen tile"
            );
            return unseen;
        }
        allowed
    }

    /// Number of distinct opponent hands consistent with this view.
    pub fn count(&self) -> u64 {
        combinations(self.opponent_candidates().len(), self.opponent_count)
    }

    /// Every determinization in lexicographic order of opponent hands, or `None` when there are
    /// more than `limit`.
    pub fn enumerate(&self, limit: u64) -> Option<Vec<GameState>> {
        if self.count() > limit {
            return None;
        }

        let candidates: Vec<Tile> = self.opponent_candidates().iter().collect();
        let k = self.opponent_count;
        let mut states = Vec::new();
        let mut picks: Vec<usize> = (0..k).collect();

        loop {
            states.push(self.resolve(picks.iter().map(|i| candidates[*i])));

            // advance to the next k-combination of candidate indices
            let Some(pos) = (0..k).rev().find(|&i| picks[i] < candidates.len() - k + i) else {
                break;
            };
            picks[pos] += 1;
            for i in pos + 1..k {
                picks[i] = picks[i - 1] + 1;
            }
        }

        Some(states)
    }

    /// The determinizations one search episode draws from: all of them when that is affordable,
    /// otherwise `config.determinization_samples` independent uniform samples.
    pub fn determinizations<R: Rng>(&self, rng: &mut R, config: &IsmctsConfig) -> Result<Vec<GameState>> {
        if let Some(states) = self.enumerate(config.enumeration_limit) {
            debug!(count = states.len(), "enumerated determinizations");
            return Ok(states);
        }

        let states = (0..config.determinization_samples)
            .map(|_| self.determine(rng))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            count = states.len(),
            combinations = self.count(),
            "sampled determinizations"
        );
        Ok(states)
    }

    fn resolve<I: IntoIterator<Item = Tile>>(&self, opponent: I) -> GameState {
        let opponent = Hand::from_tiles(opponent);
        let boneyard = self.unseen().difference(opponent.tiles());
        GameState::new(self.hand, opponent, Boneyard::from_tiles(boneyard), self.board)
    }
}

impl Determinable<GameState, crate::domino::Move> for InformationSet {
    fn determine<R: Rng>(&self, rng: &mut R) -> Result<GameState> {
        let candidates = self.opponent_candidates();
        if self.opponent_count > candidates.len() {
            return Err(DominoError::StateInconsistency {
                board: self.board.len(),
                hand: self.hand.len(),
                boneyard: self.boneyard_size,
            });
        }

        let candidates: Vec<Tile> = candidates.iter().collect();
        let picks = index::sample(rng, candidates.len(), self.opponent_count);
        Ok(self.resolve(picks.iter().map(|i| candidates[i])))
    }
}

/// `n` choose `k`, saturating at `u64::MAX`.
pub fn combinations(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
        if result > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    result as u64
}
