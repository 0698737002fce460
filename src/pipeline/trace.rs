//! Per-step and per-episode records kept for display

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blackjack::{Action, GameOutcome, State};

/// One transition together with the value update it caused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step number within the episode (0-based)
    pub step: usize,
    pub state: State,
    pub action: Action,
    pub reward: f64,
    /// Q(s,a) before the update
    pub old_value: f64,
    /// Q(s,a) after the update
    pub new_value: f64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State: {} | Action: {} | Reward: {} | Q-value updated: {:.3} → {:.3}",
            self.state, self.action, self.reward, self.old_value, self.new_value
        )
    }
}

/// All steps of a training episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeTrace {
    /// Episode index (0-based)
    pub episode: usize,
    pub steps: Vec<StepRecord>,
    pub total_reward: f64,
    pub outcome: GameOutcome,
}

impl EpisodeTrace {
    pub fn new(episode: usize) -> Self {
        Self {
            episode,
            steps: Vec::new(),
            total_reward: 0.0,
            outcome: GameOutcome::Draw,
        }
    }
}
