pub mod node;
pub mod edge;
pub mod score;

use petgraph::graph::EdgeReference;
use petgraph::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;
use crate::{Action, State};
use crate::ai::game_tree::edge::GameTreeEdge;
use crate::ai::game_tree::node::GameTreeNode;
use crate::ai::random_rollout::random_rollout;

pub use score::RootStat;

/// A single information-set tree shared by every determinization of one search.
///
/// Nodes live in the graph arena; a child is reached through an outgoing edge carrying the
/// action, and the parent is the source of the single incoming edge.
pub struct GameTree<A> where A: Action {
    root_node_idx: NodeIndex,
    graph: Graph<GameTreeNode, GameTreeEdge<A>, Directed>,
    constant_of_exploration: f64,
}

impl<A> GameTree<A> where A: Action {
    pub fn new(constant_of_exploration: f32) -> Self {
        let mut graph: Graph<GameTreeNode, GameTreeEdge<A>, Directed> = Graph::new();
        let root_node_idx = graph.add_node(GameTreeNode::new());
        Self {
            root_node_idx,
            graph,
            constant_of_exploration: constant_of_exploration as f64,
        }
    }

    pub fn graph(&self) -> &Graph<GameTreeNode, GameTreeEdge<A>, Directed> {
        &self.graph
    }

    pub fn root(&self) -> NodeIndex {
        self.root_node_idx
    }

    /// Runs `iterations` searches, each on a determinization picked uniformly from `determinizations`.
    pub fn search_n<R: Rng, S: State<A>>(
        &mut self,
        rng: &mut R,
        determinizations: &[S],
        iterations: u32,
    ) -> Result<(), S::Error> {
        for iteration in 0..iterations {
            let Some(determinization) = determinizations.choose(rng) else {
                return Ok(());
            };
            self.search(rng, determinization.clone())?;
            trace!(iteration, nodes = self.graph.node_count(), "ismcts iteration complete");
        }
        Ok(())
    }

    /// One select, expand, simulate, back-propagate pass on a single determinization.
    pub fn search<R: Rng, S: State<A>>(&mut self, rng: &mut R, determinization: S) -> Result<(), S::Error> {
        // for every step down the tree, the children whose action was legal at that step
        let mut availability: Vec<Vec<NodeIndex>> = Vec::new();

        let (node_idx, state) = self.select(rng, determinization, &mut availability)?;
        let (node_idx, state) = self.expand(rng, node_idx, state, &mut availability)?;

        let outcome = random_rollout(&state, rng)?;
        self.back_propagate(node_idx, outcome.utility() as f64, availability);

        Ok(())
    }

    /// Descends while the current node has no untried action legal in `state`.
    fn select<R: Rng, S: State<A>>(
        &self,
        rng: &mut R,
        mut state: S,
        availability: &mut Vec<Vec<NodeIndex>>,
    ) -> Result<(NodeIndex, S), S::Error> {
        let mut current_node_idx = self.root_node_idx;

        while state.outcome().is_none() {
            let actions = state.actions();
            if !self.untried_actions(current_node_idx, &actions).is_empty() {
                break;
            }

            let compatible = self.compatible_children(current_node_idx, &actions);
            let Some(selected) = self.select_child(&compatible) else {
                break;
            };

            state = state.apply_action(rng, &self.action_to(selected))?;
            availability.push(compatible);
            current_node_idx = selected;
        }

        Ok((current_node_idx, state))
    }

    /// Adds one child for a random untried action, if `state` leaves any.
    fn expand<R: Rng, S: State<A>>(
        &mut self,
        rng: &mut R,
        node_idx: NodeIndex,
        state: S,
        availability: &mut Vec<Vec<NodeIndex>>,
    ) -> Result<(NodeIndex, S), S::Error> {
        if state.outcome().is_some() {
            return Ok((node_idx, state));
        }

        let actions = state.actions();
        let untried = self.untried_actions(node_idx, &actions);
        let Some(action) = untried.choose(rng).cloned() else {
            return Ok((node_idx, state));
        };

        let next_state = state.apply_action(rng, &action)?;

        let new_node_idx = self.graph.add_node(GameTreeNode::new());
        self.graph.add_edge(node_idx, new_node_idx, GameTreeEdge::new(action));
        availability.push(self.compatible_children(node_idx, &actions));

        Ok((new_node_idx, next_state))
    }

    /// Walks from `node_idx` up to the root adding the reward, and credits availability to every
    /// sibling that was legal at each step.
    fn back_propagate(&mut self, node_idx: NodeIndex, reward: f64, mut availability: Vec<Vec<NodeIndex>>) {
        let mut current_node_idx = node_idx;

        loop {
            let node = self.get_node_mut(current_node_idx);
            node.num_visits += 1;
            node.total_reward += reward;

            let Some(parent_idx) = self.parent_node_idx(current_node_idx) else {
                self.get_node_mut(current_node_idx).availability += 1;
                break;
            };

            for sibling_idx in availability.pop().unwrap_or_default() {
                self.get_node_mut(sibling_idx).availability += 1;
            }
            current_node_idx = parent_idx;
        }
    }

    /// First child with the highest UCB1 value.
    fn select_child(&self, children: &[NodeIndex]) -> Option<NodeIndex> {
        children
            .iter()
            .fold((None, f64::NEG_INFINITY), |acc, child_idx| {
                let ucb = self.ucb1_value(*child_idx);
                if acc.0.is_none() || ucb > acc.1 {
                    (Some(*child_idx), ucb)
                } else {
                    acc
                }
            })
            .0
    }

    /// Average reward plus an exploration bonus driven by availability rather than parent visits,
    /// since a child's action is only legal in some determinizations.
    pub fn ucb1_value(&self, node_idx: NodeIndex) -> f64 {
        let Some(node) = self.graph.node_weight(node_idx) else {
            return 0.0;
        };

        if node.num_visits == 0 {
            return f64::INFINITY;
        }

        let visits = node.num_visits as f64;
        let exploitation_component = node.total_reward / visits;
        let availability = node.availability.max(1) as f64;
        let exploration_component = self.constant_of_exploration * (availability.ln() / visits).sqrt();

        exploitation_component + exploration_component
    }

    /// Children whose action is among `actions`.
    pub fn compatible_children(&self, node_idx: NodeIndex, actions: &[A]) -> Vec<NodeIndex> {
        self.node_children(node_idx)
            .into_iter()
            .filter(|child_idx| actions.contains(&self.action_to(*child_idx)))
            .collect()
    }

    /// Actions among `actions` that have no child yet.
    pub fn untried_actions(&self, node_idx: NodeIndex, actions: &[A]) -> Vec<A> {
        let expanded: Vec<A> = self
            .node_children(node_idx)
            .into_iter()
            .map(|child_idx| self.action_to(child_idx))
            .collect();

        actions
            .iter()
            .filter(|action| !expanded.contains(action))
            .cloned()
            .collect()
    }

    fn try_get_node(&self, node_idx: NodeIndex) -> Option<&GameTreeNode> {
        self.graph.node_weight(node_idx)
    }

    pub fn get_node(&self, node_idx: NodeIndex) -> &GameTreeNode {
        &self.graph[node_idx]
    }

    fn get_node_mut(&mut self, node_idx: NodeIndex) -> &mut GameTreeNode {
        &mut self.graph[node_idx]
    }

    /// Children in insertion order.
    pub fn node_children(&self, node_idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph lists outgoing edges newest first
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(node_idx, Outgoing)
            .map(|edge| edge.target())
            .collect();
        children.reverse();
        children
    }

    pub fn parent_node_idx(&self, node_idx: NodeIndex) -> Option<NodeIndex> {
        let edge_to_parent = self.edge_to_parent(node_idx)?;
        Some(edge_to_parent.source())
    }

    fn edge_to_parent(&self, node_idx: NodeIndex) -> Option<EdgeReference<GameTreeEdge<A>>> {
        self.graph.edges_directed(node_idx, Incoming).next()
    }

    /// The action on the edge into `node_idx`. Only called for non-root nodes.
    fn action_to(&self, node_idx: NodeIndex) -> A {
        match self.edge_to_parent(node_idx) {
            Some(edge) => edge.weight().action.clone(),
            None => unreachable!("the root has no incoming action"),
        }
    }

    pub fn root_stats(&self) -> Vec<RootStat<A>> {
        self.node_children(self.root_node_idx)
            .into_iter()
            .filter_map(|child_idx| {
                let child = self.try_get_node(child_idx)?;
                Some(RootStat {
                    action: self.action_to(child_idx),
                    num_visits: child.num_visits,
                    average_reward: child.average_reward(),
                })
            })
            .collect()
    }

    /// Action of the most visited root child, the first one on ties.
    pub fn best_action(&self) -> Option<A> {
        most_visited(&self.root_stats())
    }
}

/// Action with the most visits, the first one on ties.
pub(crate) fn most_visited<A: Action>(stats: &[RootStat<A>]) -> Option<A> {
    stats
        .iter()
        .fold(None::<&RootStat<A>>, |best, stat| match best {
            Some(best) if best.num_visits >= stat.num_visits => Some(best),
            _ => Some(stat),
        })
        .map(|stat| stat.action.clone())
}
