use crate::Action;

/// Statistics of one root action after a search.
#[derive(Debug, Clone, PartialEq)]
pub struct RootStat<A> where A: Action {
    pub action: A,
    pub num_visits: u32,
    pub average_reward: f64,
}
