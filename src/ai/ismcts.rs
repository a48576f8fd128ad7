//! Information-set Monte Carlo tree search.
//!
//! Every iteration draws one determinization of the hidden tiles and walks the single shared tree
//! with it, only considering children whose action is legal in that determinization. The move
//! played is the most visited root child.

use std::sync::Mutex;
use std::thread;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use crate::{Action, GameTree, State};
use crate::ai::agent::{stuck_move, Agent};
use crate::ai::config::IsmctsConfig;
use crate::ai::determinization::InformationSet;
use crate::ai::game_tree::{most_visited, RootStat};
use crate::ai::inference::AbsenceTracker;
use crate::domino::{Board, Hand, Move, Placement, Result};

/// Grows one tree over `determinizations` for `num_iterations` iterations.
pub fn ismcts<
    R: Rng,
    S: State<A>,
    A: Action,
>(determinizations: &[S], rng: &mut R, num_iterations: u32, exploration: f32) -> std::result::Result<GameTree<A>, S::Error> {
    let mut decision_tree = GameTree::new(exploration);
    decision_tree.search_n(rng, determinizations, num_iterations)?;
    Ok(decision_tree)
}

/// Root-parallel variant: `num_threads` independent trees, each with its own seeded generator and a
/// share of the iterations. Root visit counts are summed per action; no node is shared.
pub fn ismcts_mt<
    R: Rng,
    S: State<A> + Sync,
    A: Action + Send,
>(
    determinizations: &[S],
    rng: &mut R,
    num_iterations: u32,
    exploration: f32,
    num_threads: usize,
) -> std::result::Result<Vec<RootStat<A>>, S::Error>
where
    S::Error: Send,
{
    let num_threads = num_threads.max(1);
    let seeds: Vec<u64> = (0..num_threads).map(|_| rng.gen()).collect();
    let results: Mutex<Vec<(usize, std::result::Result<Vec<RootStat<A>>, S::Error>)>> = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for (worker_idx, seed) in seeds.into_iter().enumerate() {
            let iterations = share(num_iterations, num_threads, worker_idx);
            let results = &results;

            scope.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let stats = ismcts(determinizations, &mut rng, iterations, exploration)
                    .map(|tree| tree.root_stats());

                if let Ok(mut results) = results.lock() {
                    results.push((worker_idx, stats));
                }
            });
        }
    });

    let mut results = results.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    // merge in worker order so a fixed seed gives a fixed answer
    results.sort_by_key(|(worker_idx, _)| *worker_idx);

    let stats = results
        .into_iter()
        .map(|(_, stats)| stats)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(merge_root_stats(stats))
}

/// Sums visits per action across workers and weights each worker's average reward by its visits.
/// Actions keep the order in which they first appear.
fn merge_root_stats<A: Action>(per_worker: Vec<Vec<RootStat<A>>>) -> Vec<RootStat<A>> {
    let mut merged: Vec<RootStat<A>> = Vec::new();
    for stat in per_worker.into_iter().flatten() {
        match merged.iter_mut().find(|m| m.action == stat.action) {
            Some(existing) => {
                let total = existing.num_visits + stat.num_visits;
                if total > 0 {
                    existing.average_reward = (existing.average_reward * existing.num_visits as f64
                        + stat.average_reward * stat.num_visits as f64)
                        / total as f64;
                }
                existing.num_visits = total;
            }
            None => merged.push(stat),
        }
    }
    merged
}

/// Iterations given to one worker; the remainder goes to the first workers.
fn share(total: u32, workers: usize, worker_idx: usize) -> u32 {
    let workers = workers as u32;
    let base = total / workers;
    let extra = u32::from((worker_idx as u32) < total % workers);
    base + extra
}

/// ISMCTS move picker.
#[derive(Debug, Clone, Default)]
pub struct Ismcts {
    config: IsmctsConfig,
    tracker: AbsenceTracker,
}

impl Ismcts {
    pub fn new(config: IsmctsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tracker: AbsenceTracker::default(),
        })
    }

    pub fn config(&self) -> &IsmctsConfig {
        &self.config
    }

    pub fn tracker(&self) -> &AbsenceTracker {
        &self.tracker
    }

    /// Best placement for the position, or `None` when nothing can be placed.
    pub fn choose_placement<R: Rng>(&self, rng: &mut R, info: &InformationSet) -> Result<Option<Placement>> {
        let placements = info.hand().legal_placements(info.board());
        match placements.len() {
            0 => return Ok(None),
            1 => return Ok(Some(placements[0])),
            _ => {}
        }

        let stats = self.search(rng, info)?;
        // every determinization may already be over (the opponent holds no tiles), leaving the
        // root without children
        let placement = most_visited(&stats)
            .and_then(|action| action.placement())
            .or(Some(placements[0]));

        debug!(
            iterations = self.config.iterations,
            candidates = placements.len(),
            placement = ?placement,
            visits = ?stats.iter().map(|s| s.num_visits).collect::<Vec<_>>(),
            "ismcts search complete"
        );

        Ok(placement)
    }

    /// Root statistics after a full search of the position.
    pub fn search<R: Rng>(&self, rng: &mut R, info: &InformationSet) -> Result<Vec<RootStat<Move>>> {
        let determinizations = info.determinizations(rng, &self.config)?;

        if self.config.threads > 1 {
            ismcts_mt(
                &determinizations,
                rng,
                self.config.iterations,
                self.config.exploration,
                self.config.threads,
            )
        } else {
            let tree = ismcts(&determinizations, rng, self.config.iterations, self.config.exploration)?;
            Ok(tree.root_stats())
        }
    }
}

impl Agent for Ismcts {
    fn name(&self) -> &str {
        "ismcts"
    }

    fn choose_move<R: Rng>(
        &mut self,
        rng: &mut R,
        board: &Board,
        hand: &Hand,
        boneyard_size: usize,
    ) -> Result<Move> {
        // counts are checked before the tracker learns anything from this position
        let info = InformationSet::new(*board, *hand, boneyard_size)?;
        let info = if self.config.use_inference {
            self.tracker.observe(board, boneyard_size);
            info.with_excluded_pips(&self.tracker.absent_pips())
        } else {
            info
        };

        let mv = match self.choose_placement(rng, &info)? {
            Some(placement) => Move::Place(placement),
            None => stuck_move(boneyard_size),
        };

        if self.config.use_inference {
            match mv {
                Move::Place(placement) => {
                    self.tracker.record_decision(&board.apply(placement)?, boneyard_size, false)
                }
                Move::Draw => self.tracker.record_decision(board, boneyard_size - 1, true),
                Move::Pass => self.tracker.record_decision(board, boneyard_size, false),
            }
        }

        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domino::{End, Tile};

    fn t(a: u8, b: u8) -> Tile {
        Tile::new(a, b).unwrap()
    }

    #[test]
    fn iterations_are_shared_out_completely() {
        assert_eq!((0..4).map(|w| share(1000, 4, w)).sum::<u32>(), 1000);
        assert_eq!((0..3).map(|w| share(10, 3, w)).collect::<Vec<_>>(), vec![4, 3, 3]);
        assert_eq!(share(2, 4, 3), 0);
    }

    fn stat(action: Move, num_visits: u32, average_reward: f64) -> RootStat<Move> {
        RootStat { action, num_visits, average_reward }
    }

    #[test]
    fn worker_stats_merge_by_visit_weighted_reward() {
        let a = Move::place(t(0, 3), End::Left);
        let b = Move::place(t(0, 3), End::Right);
        let c = Move::place(t(2, 5), End::Right);

        let merged = merge_root_stats(vec![
            vec![stat(a, 30, 10.0), stat(b, 10, -4.0)],
            vec![stat(b, 30, 8.0), stat(a, 10, -2.0), stat(c, 0, 0.0)],
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!((merged[0].action, merged[0].num_visits), (a, 40));
        assert!((merged[0].average_reward - 7.0).abs() < 1e-12);
        assert_eq!((merged[1].action, merged[1].num_visits), (b, 40));
        assert!((merged[1].average_reward - 5.0).abs() < 1e-12);
        assert_eq!(merged[2], stat(c, 0, 0.0));
    }

    #[test]
    fn unvisited_duplicates_leave_the_average_alone() {
        let a = Move::Draw;
        let merged = merge_root_stats(vec![vec![stat(a, 0, 0.0)], vec![stat(a, 0, 0.0)]]);
        assert_eq!(merged, vec![stat(a, 0, 0.0)]);
    }

    #[test]
    fn rejected_positions_do_not_feed_the_tracker() {
        let config = IsmctsConfig {
            iterations: 20,
            use_inference: true,
            ..Default::default()
        };
        let mut engine = Ismcts::new(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let board = Board::from_placements([Placement::new(t(2, 4), End::Left)]).unwrap();
        let hand = Hand::from_tiles([t(1, 1), t(5, 6)]);

        // 1 + 2 + 26 tiles is one more than the set holds
        assert!(engine.choose_move(&mut rng, &board, &hand, 26).is_err());
        assert_eq!(engine.tracker(), &AbsenceTracker::default());

        // an accepted position with nothing to place is observed as usual
        assert_eq!(engine.choose_move(&mut rng, &board, &hand, 0).unwrap(), Move::Pass);
        assert_ne!(engine.tracker(), &AbsenceTracker::default());
    }
}
