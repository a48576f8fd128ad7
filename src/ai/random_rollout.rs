use rand::Rng;
use tracing::warn;
use crate::{Action, Outcome, State};

/// Plays uniformly random actions from `game` until the round ends.
pub fn random_rollout<
    R: Rng + Sized,
    S: State<A>,
    A: Action,
>(game: &S, rng: &mut R) -> Result<Outcome, S::Error> {
    let mut game = game.clone();

    loop {
        if let Some(outcome) = game.outcome() {
            return Ok(outcome);
        }

        let actions = &game.actions()[..];
        let random_action = rand::seq::SliceRandom::choose(actions, rng);

        if let Some(action) = random_action {
            game = game.apply_action(rng, action)?;
        } else {
            warn!("rollout reached a non-terminal state without actions");
            return Ok(Outcome::Tied);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::GameState;

    #[test]
    fn rollouts_from_a_dealt_round_terminate() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..50 {
            let state = GameState::deal(&mut rng).unwrap();
            let outcome = random_rollout(&state, &mut rng).unwrap();
            // nobody can be left holding more than the whole set
            assert!(outcome.utility().abs() <= 168);
        }
    }

    #[test]
    fn same_seed_same_rollout() {
        let state = GameState::deal(&mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        let a = random_rollout(&state, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = random_rollout(&state, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}
