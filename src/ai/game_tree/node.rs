/// Search statistics of one tree node. The action leading here lives on the incoming edge.
#[derive(Debug, Clone, Default)]
pub struct GameTreeNode {
    pub num_visits: u32,
    pub total_reward: f64,
    /// How often this node's action was legal when its parent was visited.
    pub availability: u32,
}

impl GameTreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn average_reward(&self) -> f64 {
        if self.num_visits == 0 {
            return 0.0;
        }
        self.total_reward / self.num_visits as f64
    }
}
