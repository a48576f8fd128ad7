use std::fmt::{Display, Formatter};

use crate::domino::error::{DominoError, Result};

pub const MAX_PIP: u8 = 6;
pub const TOTAL_TILES: usize = 28;

/// A double-six domino. Stored by canonical id, so a tile and its flip compare equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Tile(u8);

impl Tile {
    pub fn new(a: u8, b: u8) -> Result<Tile> {
        if a > MAX_PIP || b > MAX_PIP {
            return Err(DominoError::InvalidTile(a, b));
        }

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Ok(Tile(pips_to_id(lo, hi)))
    }

    pub(crate) fn from_id(id: u8) -> Tile {
        debug_assert!((id as usize) < TOTAL_TILES);
        Tile(id)
    }

    /// The full double-six set in canonical order: 0-0, 0-1, .., 0-6, 1-1, .., 6-6.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..TOTAL_TILES as u8).map(Tile)
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    /// Pips as `(low, high)`.
    #[inline]
    pub fn pips(self) -> (u8, u8) {
        let id = self.0 as usize;
        (TILE_LO[id], TILE_HI[id])
    }

    #[inline]
    pub fn pip_sum(self) -> u32 {
        let (a, b) = self.pips();
        a as u32 + b as u32
    }

    #[inline]
    pub fn is_double(self) -> bool {
        let (a, b) = self.pips();
        a == b
    }

    #[inline]
    pub fn has(self, pip: u8) -> bool {
        let (a, b) = self.pips();
        a == pip || b == pip
    }

    /// The pip opposite `pip`, if the tile carries `pip` at all.
    #[inline]
    pub fn other(self, pip: u8) -> Option<u8> {
        let (a, b) = self.pips();
        if a == pip {
            Some(b)
        } else if b == pip {
            Some(a)
        } else {
            None
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.pips();
        write!(f, "{}-{}", a, b)
    }
}

const fn pips_to_id(lo: u8, hi: u8) -> u8 {
    // rows before `lo` hold 7, 6, .. tiles
    let lo = lo as u16;
    let start = lo * 7 - lo * (lo.saturating_sub(1)) / 2;
    (start + (hi as u16 - lo)) as u8
}

const TILE_LO: [u8; TOTAL_TILES] = [
    0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2,
    3, 3, 3, 3,
    4, 4, 4,
    5, 5,
    6,
];

const TILE_HI: [u8; TOTAL_TILES] = [
    0, 1, 2, 3, 4, 5, 6,
    1, 2, 3, 4, 5, 6,
    2, 3, 4, 5, 6,
    3, 4, 5, 6,
    4, 5, 6,
    5, 6,
    6,
];
