pub mod agent;
pub mod config;
pub mod determinable;
pub mod determinization;
pub mod evaluation;
pub mod expectiminimax;
pub mod game_state;
pub mod game_tree;
pub mod inference;
pub mod ismcts;
pub mod random_rollout;
