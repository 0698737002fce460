//! Environment port - the reset/step protocol an episode is driven through

use crate::{
    Result,
    blackjack::{Action, State, Transition},
};

/// Episodic environment with a binary action space
///
/// # Event Sequence
///
/// 1. `reset()` starts a round and returns the initial observation
/// 2. `step(action)` is called until a transition reports `terminal`
/// 3. Stepping again before the next `reset()` is an error
pub trait Environment {
    /// Start a new round.
    ///
    /// # Errors
    ///
    /// Only on a contract violation (an observation outside the state
    /// bounds); a correct environment never fails here.
    fn reset(&mut self) -> Result<State>;

    /// Apply `action` to the current round.
    ///
    /// # Errors
    ///
    /// Returns an error when the round has already finished.
    fn step(&mut self, action: Action) -> Result<Transition>;
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn reset(&mut self) -> Result<State> {
        (**self).reset()
    }

    fn step(&mut self, action: Action) -> Result<Transition> {
        (**self).step(action)
    }
}
