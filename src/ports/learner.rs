//! Learner port - abstraction over action selection and value updates
//!
//! The training pipeline drives anything implementing [`Learner`], such as
//! the epsilon-greedy Q-learning agent.

use crate::{
    Result,
    blackjack::{Action, State, Transition},
};

/// Value estimates around a single update, for display and tracing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueUpdate {
    pub old_value: f64,
    pub new_value: f64,
}

/// Learner trait - Unified interface for acting and learning
///
/// # Examples
///
/// ```no_run
/// use blackjack_rl::{
///     blackjack::{Action, State},
///     ports::Learner,
/// };
///
/// fn first_move<L: Learner>(learner: &mut L, state: &State) -> Action {
///     learner.select_action(state)
/// }
/// ```
pub trait Learner {
    /// Choose an action for `state`.
    fn select_action(&mut self, state: &State) -> Action;

    /// Update after observing one transition.
    ///
    /// Called exactly once per environment step, strictly after the step.
    fn learn(
        &mut self,
        state: &State,
        action: Action,
        transition: &Transition,
    ) -> Result<ValueUpdate>;

    /// Learner's display name.
    fn name(&self) -> &str;
}
