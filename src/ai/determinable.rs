use rand::Rng;
use crate::{Action, State};

/// A partially observed position that can be resolved into one fully observable state.
pub trait Determinable<S: State<A>, A: Action> {
    fn determine<R: Rng>(&self, rng: &mut R) -> Result<S, S::Error>;
}
