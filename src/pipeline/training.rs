//! Training pipeline for the Q-learning agent

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::trace::{EpisodeTrace, StepRecord};
use crate::{
    Error, Result,
    analysis::running_average,
    blackjack::{BlackjackEnv, GameOutcome},
    ports::{Environment, Learner, Observer},
    q_learning::{QLearningAgent, QTable, TerminalBootstrap},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,

    /// Discount factor γ, in (0, 1]
    pub discount_factor: f64,

    /// Exploration rate ε, in [0, 1]
    pub epsilon: f64,

    /// Random seed; the deck uses `seed`, the agent `seed + 1`
    pub seed: Option<u64>,

    /// Keep a full step trace of every episode
    pub record_traces: bool,

    /// Next-state handling on terminal transitions
    pub terminal_bootstrap: TerminalBootstrap,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 2000,
            learning_rate: 0.1,
            discount_factor: 0.95,
            epsilon: 0.1,
            seed: None,
            record_traces: false,
            terminal_bootstrap: TerminalBootstrap::Literal,
        }
    }
}

impl TrainingConfig {
    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::invalid_config("episodes must be at least 1"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::invalid_config(format!(
                "learning rate {} must be in (0, 1]",
                self.learning_rate
            )));
        }
        if !(self.discount_factor > 0.0 && self.discount_factor <= 1.0) {
            return Err(Error::invalid_config(format!(
                "discount factor {} must be in (0, 1]",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::invalid_config(format!(
                "exploration rate {} must be in [0, 1]",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// Build the agent this configuration describes, seeded with `seed + 1`.
    pub fn build_agent(&self) -> QLearningAgent {
        let agent = QLearningAgent::new(
            self.learning_rate,
            self.discount_factor,
            self.epsilon,
            self.terminal_bootstrap,
        );
        match self.seed {
            Some(seed) => agent.with_seed(seed.wrapping_add(1)),
            None => agent,
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open config {}", path.as_ref().display()),
            source,
        })?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Outcome tallies over the training episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub total_episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    /// Average reward over the whole run
    pub mean_reward: f64,
    /// Mean reward over the last tenth of the run
    pub recent_mean_reward: f64,
}

impl TrainingSummary {
    pub fn new(rewards_history: &[f64]) -> Self {
        let total = rewards_history.len();
        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;
        for reward in rewards_history {
            match GameOutcome::from_reward(*reward) {
                GameOutcome::Win => wins += 1,
                GameOutcome::Draw => draws += 1,
                GameOutcome::Loss => losses += 1,
            }
        }
        let rate = |count: usize| {
            if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            }
        };
        let mean_reward = running_average(rewards_history)
            .last()
            .copied()
            .unwrap_or(0.0);
        let tail = &rewards_history[total - (total / 10).max(1).min(total)..];
        let recent_mean_reward = if tail.is_empty() {
            0.0
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        };

        Self {
            total_episodes: total,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            mean_reward,
            recent_mean_reward,
        }
    }
}

/// Everything a training run hands back to its caller
#[derive(Debug, Clone)]
pub struct TrainingRun {
    /// Learned action values
    pub q_table: QTable,
    /// Cumulative reward of each episode, in order
    pub rewards_history: Vec<f64>,
    /// Step traces when `record_traces` was set
    pub traces: Option<Vec<EpisodeTrace>>,
    pub summary: TrainingSummary,
}

/// Learner-independent part of a run's results
#[derive(Debug, Clone)]
pub struct EpisodeLog {
    pub rewards_history: Vec<f64>,
    pub traces: Option<Vec<EpisodeTrace>>,
}

/// Episodic training loop with pluggable observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] before any episode runs if a
    /// parameter is out of range.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train a fresh agent on a fresh infinite-deck environment.
    pub fn run(&mut self) -> Result<TrainingRun> {
        let mut env = BlackjackEnv::new(self.config.seed);
        let mut agent = self.config.build_agent();
        let log = self.run_with(&mut env, &mut agent)?;
        let summary = TrainingSummary::new(&log.rewards_history);
        Ok(TrainingRun {
            q_table: agent.into_q_table(),
            rewards_history: log.rewards_history,
            traces: log.traces,
            summary,
        })
    }

    /// Drive `learner` through `config.episodes` episodes of `env`.
    ///
    /// The learner is used as given: the configuration contributes the
    /// episode count and trace recording, not the learner's parameters.
    pub fn run_with<E: Environment>(
        &mut self,
        env: &mut E,
        learner: &mut dyn Learner,
    ) -> Result<EpisodeLog> {
        let total = self.config.episodes;
        let progress_interval = (total / 100).max(1);
        let mut rewards_history = Vec::with_capacity(total);
        let mut traces = self.config.record_traces.then(|| Vec::with_capacity(total));

        log::info!(
            "training {} for {} episodes (α={}, γ={}, ε={}, bootstrap={})",
            learner.name(),
            total,
            self.config.learning_rate,
            self.config.discount_factor,
            self.config.epsilon,
            self.config.terminal_bootstrap
        );

        for observer in &mut self.observers {
            observer.on_training_start(total)?;
        }

        for episode in 0..total {
            let trace = self.play_episode(episode, env, learner)?;
            rewards_history.push(trace.total_reward);

            for observer in &mut self.observers {
                observer.on_episode_end(episode, trace.total_reward, trace.outcome)?;
            }

            let completed = episode + 1;
            if completed.is_multiple_of(progress_interval) || completed == total {
                log::debug!("completed {completed}/{total} episodes");
                for observer in &mut self.observers {
                    observer.on_progress(completed, total)?;
                }
            }

            if let Some(traces) = traces.as_mut() {
                traces.push(trace);
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        log::info!(
            "training finished: mean reward {:.4}",
            running_average(&rewards_history)
                .last()
                .copied()
                .unwrap_or(0.0)
        );

        Ok(EpisodeLog {
            rewards_history,
            traces,
        })
    }

    fn play_episode<E: Environment>(
        &mut self,
        episode: usize,
        env: &mut E,
        learner: &mut dyn Learner,
    ) -> Result<EpisodeTrace> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut trace = EpisodeTrace::new(episode);
        let mut state = env.reset()?;
        let mut step = 0;

        loop {
            let action = learner.select_action(&state);
            let transition = env.step(action)?;
            let update = learner.learn(&state, action, &transition)?;
            trace.total_reward += transition.reward;

            let record = StepRecord {
                step,
                state,
                action,
                reward: transition.reward,
                old_value: update.old_value,
                new_value: update.new_value,
            };
            for observer in &mut self.observers {
                observer.on_step(episode, &record)?;
            }
            trace.steps.push(record);

            if transition.terminal {
                trace.outcome = GameOutcome::from_reward(transition.reward);
                return Ok(trace);
            }
            state = transition.next_state;
            step += 1;
        }
    }
}

/// Train with `config` on a fresh environment and agent.
///
/// # Errors
///
/// [`Error::InvalidConfiguration`] when a parameter is out of range.
pub fn train(config: &TrainingConfig) -> Result<TrainingRun> {
    TrainingPipeline::new(config.clone())?.run()
}
