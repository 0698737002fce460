//! Training and evaluation pipeline
//!
//! This module provides:
//! - The episodic Q-learning training loop
//! - Greedy evaluation and single-round simulation
//! - Observers for progress, metrics and trace export

pub mod evaluation;
pub mod observers;
pub mod trace;
pub mod training;

pub use evaluation::{
    EvaluationResult, FrozenLearner, GreedyRound, evaluate, evaluate_in, play_greedy_round,
};
pub use observers::{JsonlObserver, MetricsHandle, MetricsObserver, MetricsSummary, ProgressObserver};
pub use trace::{EpisodeTrace, StepRecord};
pub use training::{
    EpisodeLog, TrainingConfig, TrainingPipeline, TrainingRun, TrainingSummary, train,
};

pub use crate::ports::{Environment, Learner, Observer};
