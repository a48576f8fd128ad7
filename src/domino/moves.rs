use std::fmt::{Display, Formatter};

use crate::domino::Tile;
use crate::Action;

/// The extremity of the line a tile is attached to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum End {
    Left,
    Right,
}

impl Display for End {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            End::Left => write!(f, "left"),
            End::Right => write!(f, "right"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Placement {
    pub tile: Tile,
    pub end: End,
}

impl Placement {
    pub fn new(tile: Tile, end: End) -> Self {
        Self { tile, end }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.tile, self.end)
    }
}

/// One decision of a player on their turn.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    Place(Placement),
    /// Take a tile from the boneyard; only when nothing can be placed and the boneyard is not empty.
    Draw,
    /// Nothing can be placed and the boneyard is exhausted.
    Pass,
}

impl Move {
    pub fn place(tile: Tile, end: End) -> Self {
        Move::Place(Placement::new(tile, end))
    }

    pub fn placement(&self) -> Option<Placement> {
        match self {
            Move::Place(placement) => Some(*placement),
            _ => None,
        }
    }
}

impl From<Placement> for Move {
    fn from(placement: Placement) -> Self {
        Move::Place(placement)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place(placement) => write!(f, "place {}", placement),
            Move::Draw => write!(f, "draw"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

impl Action for Move {}
