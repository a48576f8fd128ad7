use std::fmt::{Debug, Formatter};

use crate::domino::tile::{Tile, TOTAL_TILES};

const FULL_MASK: u32 = (1 << TOTAL_TILES) - 1;

/// A set of tiles packed into a 28-bit mask. Cheap to copy, iterates in canonical tile order.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TileSet(u32);

impl TileSet {
    pub const fn empty() -> Self {
        TileSet(0)
    }

    pub const fn full() -> Self {
        TileSet(FULL_MASK)
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.0 & bit(tile) != 0
    }

    /// Returns false when the tile was already present.
    #[inline]
    pub fn insert(&mut self, tile: Tile) -> bool {
        let present = self.contains(tile);
        self.0 |= bit(tile);
        !present
    }

    /// Returns false when the tile was not present.
    #[inline]
    pub fn remove(&mut self, tile: Tile) -> bool {
        let present = self.contains(tile);
        self.0 &= !bit(tile);
        present
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: TileSet) -> TileSet {
        TileSet(self.0 | other.0)
    }

    #[inline]
    pub fn difference(self, other: TileSet) -> TileSet {
        TileSet(self.0 & !other.0)
    }

    #[inline]
    pub fn is_disjoint(self, other: TileSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Tiles that do not carry any of the given pips.
    pub fn without_pips(self, pips: &[u8]) -> TileSet {
        self.iter()
            .filter(|tile| !pips.iter().any(|pip| tile.has(*pip)))
            .collect()
    }

    pub fn pip_sum(&self) -> u32 {
        self.iter().map(Tile::pip_sum).sum()
    }

    pub fn iter(&self) -> TileSetIter {
        TileSetIter(self.0)
    }

    /// The `n`-th tile in canonical order.
    pub fn nth(&self, n: usize) -> Option<Tile> {
        self.iter().nth(n)
    }
}

fn bit(tile: Tile) -> u32 {
    1 << tile.id()
}

pub struct TileSetIter(u32);

impl Iterator for TileSetIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Tile::from_id(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for TileSetIter {}

impl IntoIterator for TileSet {
    type Item = Tile;
    type IntoIter = TileSetIter;

    fn into_iter(self) -> TileSetIter {
        self.iter()
    }
}

impl IntoIterator for &TileSet {
    type Item = Tile;
    type IntoIter = TileSetIter;

    fn into_iter(self) -> TileSetIter {
        self.iter()
    }
}

impl FromIterator<Tile> for TileSet {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut set = TileSet::empty();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

impl Debug for TileSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|tile| tile.to_string()))
            .finish()
    }
}
