//! Tabular Q-learning for a simplified game of Blackjack
//!
//! This crate provides:
//! - An infinite-deck Blackjack environment with seedable dealing
//! - A dense Q-table and epsilon-greedy Q-learning agent
//! - An episodic training pipeline with pluggable observers
//! - Greedy evaluation, single-round simulation and policy analysis
//! - CSV/JSON export and a command-line front end
//!
//! ```
//! use blackjack_rl::{TrainingConfig, evaluate, train};
//!
//! let config = TrainingConfig {
//!     episodes: 200,
//!     seed: Some(7),
//!     ..TrainingConfig::default()
//! };
//! let run = train(&config).unwrap();
//! let result = evaluate(&run.q_table, 100, Some(8)).unwrap();
//! assert_eq!(result.wins + result.draws + result.losses, 100);
//! ```

pub mod analysis;
pub mod blackjack;
pub mod cli;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use blackjack::{Action, BlackjackEnv, GameOutcome, State, Transition};
pub use error::{Error, Result};
pub use pipeline::{
    EvaluationResult, TrainingConfig, TrainingPipeline, TrainingRun, evaluate, train,
};
pub use q_learning::{QLearningAgent, QTable, TerminalBootstrap};
