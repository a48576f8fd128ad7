use crate::Action;

pub struct GameTreeEdge<A> where A: Action {
    pub action: A,
}

impl<A> GameTreeEdge<A> where A: Action {
    pub fn new(action: A) -> Self {
        Self { action }
    }
}
