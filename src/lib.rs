mod ai;
pub mod domino;

use std::fmt::Debug;
use rand::Rng;

pub use ai::{
    agent::{Agent, RandomAgent},
    config::{ExpectiminimaxConfig, IsmctsConfig},
    determinable::Determinable,
    determinization::{combinations, InformationSet},
    evaluation::evaluate,
    expectiminimax::Expectiminimax,
    game_state::GameState,
    game_tree::{
        GameTree,
        RootStat,
        node::GameTreeNode,
        edge::GameTreeEdge,
    },
    inference::AbsenceTracker,
    ismcts::{ismcts, ismcts_mt, Ismcts},
    random_rollout::random_rollout,
};

pub trait Action: Clone + PartialEq {}

/// A fully observable game position that can be advanced by the searches.
pub trait State<A: Action>: Sized + Clone {
    type Error: Debug;

    fn actions(&self) -> Vec<A>;
    fn apply_action<R: Rng>(&self, rng: &mut R, action: &A) -> Result<Self, Self::Error>;
    fn outcome(&self) -> Option<Outcome>;
}

/// Result of a finished round, from the reasoning player's side.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// Fewer pips left than the opponent; carries the opponent's pip total.
    Won(u32),
    /// More pips left than the opponent; carries the player's own pip total.
    Lost(u32),
    Tied,
}

impl Outcome {
    pub fn utility(&self) -> i32 {
        match self {
            Outcome::Won(pips) => *pips as i32,
            Outcome::Lost(pips) => -(*pips as i32),
            Outcome::Tied => 0,
        }
    }
}
