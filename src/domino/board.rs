use crate::domino::error::{DominoError, Result};
use crate::domino::{End, Placement, Tile, TileSet, TOTAL_TILES};

// the first tile sits in the middle so the line can grow 27 tiles either way
const CAPACITY: usize = 2 * TOTAL_TILES - 1;
const CENTER: usize = TOTAL_TILES - 1;

/// The line of played tiles. Fixed capacity and `Copy`, so hypothetical moves never touch the heap.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    // oriented (left pip, right pip) per cell, occupied in `start..end`
    cells: [(u8, u8); CAPACITY],
    start: usize,
    end: usize,
    tiles: TileSet,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [(0, 0); CAPACITY],
            start: CENTER,
            end: CENTER,
            tiles: TileSet::empty(),
        }
    }

    /// Builds a board by playing `placements` in order.
    pub fn from_placements<I: IntoIterator<Item = Placement>>(placements: I) -> Result<Self> {
        placements
            .into_iter()
            .try_fold(Board::new(), |board, placement| board.apply(placement))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn tiles(&self) -> TileSet {
        self.tiles
    }

    /// Open pips as `(left, right)`, `None` on an empty board.
    pub fn open_ends(&self) -> Option<(u8, u8)> {
        if self.is_empty() {
            return None;
        }
        Some((self.cells[self.start].0, self.cells[self.end - 1].1))
    }

    pub fn open_end(&self, end: End) -> Option<u8> {
        let (left, right) = self.open_ends()?;
        Some(match end {
            End::Left => left,
            End::Right => right,
        })
    }

    /// Placed tiles left to right, oriented as they lie.
    pub fn line(&self) -> &[(u8, u8)] {
        &self.cells[self.start..self.end]
    }

    pub fn accepts(&self, tile: Tile, end: End) -> bool {
        if self.tiles.contains(tile) {
            return false;
        }
        match self.open_end(end) {
            Some(pip) => tile.has(pip),
            None => true,
        }
    }

    /// Every placement of a tile from `hand`, in hand order, left end before right end.
    /// Both ends of an empty board are the same spot, so only the left one is listed.
    pub fn legal_placements(&self, hand: &TileSet) -> Vec<Placement> {
        let ends: &[End] = if self.is_empty() {
            &[End::Left]
        } else {
            &[End::Left, End::Right]
        };

        let mut placements = Vec::new();
        for tile in hand {
            for &end in ends {
                if self.accepts(tile, end) {
                    placements.push(Placement::new(tile, end));
                }
            }
        }
        placements
    }

    pub fn has_legal_placement(&self, hand: &TileSet) -> bool {
        hand.iter()
            .any(|tile| self.accepts(tile, End::Left) || self.accepts(tile, End::Right))
    }

    /// Returns the board with `placement` played; the receiver is left untouched.
    pub fn apply(&self, placement: Placement) -> Result<Board> {
        let Placement { tile, end } = placement;
        if !self.accepts(tile, end) {
            return Err(DominoError::IllegalPlacement { tile, end });
        }

        let mut board = *self;
        board.tiles.insert(tile);

        let (a, b) = tile.pips();
        match board.open_end(end) {
            None => {
                board.cells[board.start] = (a, b);
                board.end += 1;
            }
            Some(pip) => {
                // accepts() guarantees the tile carries `pip`
                let far = tile.other(pip).unwrap_or(pip);
                match end {
                    End::Left => {
                        board.start -= 1;
                        board.cells[board.start] = (far, pip);
                    }
                    End::Right => {
                        board.cells[board.end] = (pip, far);
                        board.end += 1;
                    }
                }
            }
        }

        Ok(board)
    }
}
