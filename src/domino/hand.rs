use rand::Rng;

use crate::domino::error::{DominoError, Result};
use crate::domino::{Board, Placement, Tile, TileSet};

pub const HAND_SIZE: usize = 7;

/// Tiles held by one player.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Hand {
    tiles: TileSet,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    pub fn tiles(&self) -> TileSet {
        self.tiles
    }

    pub fn add(&mut self, tile: Tile) {
        self.tiles.insert(tile);
    }

    /// Removes a played tile. Removing a tile the hand does not hold means the caller's copy of the
    /// game has diverged from the real one.
    pub fn remove(&mut self, tile: Tile) -> Result<()> {
        if self.tiles.remove(tile) {
            Ok(())
        } else {
            Err(DominoError::IllegalState(tile))
        }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pip_sum(&self) -> u32 {
        self.tiles.pip_sum()
    }

    pub fn legal_placements(&self, board: &Board) -> Vec<Placement> {
        board.legal_placements(&self.tiles)
    }

    pub fn can_play(&self, board: &Board) -> bool {
        board.has_legal_placement(&self.tiles)
    }
}

/// The draw pile.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Boneyard {
    tiles: TileSet,
}

impl Default for Boneyard {
    fn default() -> Self {
        Self::new()
    }
}

impl Boneyard {
    /// A full double-six set.
    pub fn new() -> Self {
        Self {
            tiles: TileSet::full(),
        }
    }

    pub fn from_tiles(tiles: TileSet) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> TileSet {
        self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn draw_random<R: Rng>(&mut self, rng: &mut R) -> Option<Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        let tile = self.tiles.nth(rng.gen_range(0..self.tiles.len()))?;
        self.tiles.remove(tile);
        Some(tile)
    }

    pub fn deal<R: Rng>(&mut self, rng: &mut R, size: usize) -> Result<Hand> {
        if size > self.len() {
            return Err(DominoError::StateInconsistency {
                board: 0,
                hand: size,
                boneyard: self.len(),
            });
        }
        let mut hand = Hand::new();
        for _ in 0..size {
            if let Some(tile) = self.draw_random(rng) {
                hand.add(tile);
            }
        }
        Ok(hand)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domino::TOTAL_TILES;

    #[test]
    fn removing_a_missing_tile_is_an_illegal_state() {
        let tile = Tile::new(4, 2).unwrap();
        let mut hand = Hand::from_tiles([tile]);
        assert_eq!(hand.remove(Tile::new(2, 4).unwrap()), Ok(()));
        assert_eq!(hand.remove(tile), Err(DominoError::IllegalState(tile)));
    }

    #[test]
    fn dealing_moves_tiles_out_of_the_boneyard() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut boneyard = Boneyard::new();
        let first = boneyard.deal(&mut rng, HAND_SIZE).unwrap();
        let second = boneyard.deal(&mut rng, HAND_SIZE).unwrap();

        assert_eq!(first.len(), HAND_SIZE);
        assert_eq!(second.len(), HAND_SIZE);
        assert!(first.tiles().is_disjoint(second.tiles()));
        assert!(first.tiles().is_disjoint(boneyard.tiles()));
        assert_eq!(boneyard.len(), TOTAL_TILES - 2 * HAND_SIZE);
    }

    #[test]
    fn empty_boneyard_draws_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut boneyard = Boneyard::from_tiles(TileSet::empty());
        assert_eq!(boneyard.draw_random(&mut rng), None);
        assert!(boneyard.deal(&mut rng, 1).is_err());
    }
}
