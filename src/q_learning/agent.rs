//! Q-learning agent
//!
//! Wraps a [`QTable`] with an epsilon-greedy behaviour policy and applies
//! one-step TD updates as transitions arrive.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    blackjack::{Action, State, Transition, deck::build_rng},
    ports::{Learner, learner::ValueUpdate},
    q_learning::q_table::{QTable, TerminalBootstrap},
};

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal action-value function by always updating toward the
/// maximum next-state value, regardless of the action actually taken next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent with a zeroed table
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter
    /// * `discount_factor` - γ parameter
    /// * `epsilon` - Exploration rate
    /// * `terminal_bootstrap` - Next-state handling on terminal transitions
    ///
    /// Parameters are not range-checked here; `TrainingConfig::validate`
    /// guards the public training entry point.
    pub fn new(
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        terminal_bootstrap: TerminalBootstrap,
    ) -> Self {
        Self {
            q_table: QTable::new(learning_rate, discount_factor, terminal_bootstrap),
            epsilon,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    /// ε-greedy action selection
    fn select_action_epsilon_greedy(&mut self, state: &State) -> Action {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: uniform over both actions
            Action::ALL[self.rng.random_range(0..Action::ALL.len())]
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(state)
        }
    }
}

impl Learner for QLearningAgent {
    fn select_action(&mut self, state: &State) -> Action {
        self.select_action_epsilon_greedy(state)
    }

    fn learn(
        &mut self,
        state: &State,
        action: Action,
        transition: &Transition,
    ) -> Result<ValueUpdate> {
        let update = self.q_table.q_learning_update(
            state,
            action,
            transition.reward,
            &transition.next_state,
            transition.terminal,
        );
        Ok(update)
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }
}
