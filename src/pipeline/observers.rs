//! Observer adapters for training pipelines
//!
//! Observers allow composable data collection during training without
//! coupling the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::trace::{EpisodeTrace, StepRecord};
use crate::{
    Result,
    blackjack::{Action, GameOutcome},
    ports::Observer,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("W:{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        _total_reward: f64,
        outcome: GameOutcome,
    ) -> Result<()> {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Loss => self.losses += 1,
        }
        Ok(())
    }

    fn on_progress(&mut self, completed: usize, _total: usize) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(completed as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub total_steps: usize,
    pub hits: usize,
    pub sticks: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub avg_episode_length: f64,
    /// Fraction of all chosen actions that were Hit
    pub hit_fraction: f64,
}

#[derive(Debug, Default)]
struct MetricsState {
    total_episodes: usize,
    hits: usize,
    sticks: usize,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl MetricsState {
    fn summary(&self) -> MetricsSummary {
        let total_steps = self.hits + self.sticks;
        MetricsSummary {
            total_episodes: self.total_episodes,
            total_steps,
            hits: self.hits,
            sticks: self.sticks,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            avg_episode_length: if self.total_episodes == 0 {
                0.0
            } else {
                total_steps as f64 / self.total_episodes as f64
            },
            hit_fraction: if total_steps == 0 {
                0.0
            } else {
                self.hits as f64 / total_steps as f64
            },
        }
    }
}

/// Metrics observer - Tracks outcome counts and the action mix
///
/// The observer is moved into the pipeline, so results are read through a
/// [`MetricsHandle`] obtained before handing it over.
pub struct MetricsObserver {
    state: Arc<Mutex<MetricsState>>,
}

/// Shared read access to a [`MetricsObserver`]'s counters
#[derive(Clone)]
pub struct MetricsHandle {
    state: Arc<Mutex<MetricsState>>,
}

impl MetricsHandle {
    pub fn summary(&self) -> MetricsSummary {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .summary()
    }
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MetricsState::default())),
        }
    }

    pub fn handle(&self) -> MetricsHandle {
        MetricsHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn with_state(&self, f: impl FnOnce(&mut MetricsState)) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state);
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, _episode: usize, record: &StepRecord) -> Result<()> {
        self.with_state(|state| match record.action {
            Action::Hit => state.hits += 1,
            Action::Stick => state.sticks += 1,
        });
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        _total_reward: f64,
        outcome: GameOutcome,
    ) -> Result<()> {
        self.with_state(|state| {
            state.total_episodes += 1;
            match outcome {
                GameOutcome::Win => state.wins += 1,
                GameOutcome::Draw => state.draws += 1,
                GameOutcome::Loss => state.losses += 1,
            }
        });
        Ok(())
    }
}

/// JSONL observer - Exports one episode trace per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current: Option<EpisodeTrace>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            current: None,
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        self.current = Some(EpisodeTrace::new(episode));
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, record: &StepRecord) -> Result<()> {
        if let Some(trace) = self.current.as_mut() {
            trace.total_reward += record.reward;
            trace.steps.push(record.clone());
        }
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        _total_reward: f64,
        outcome: GameOutcome,
    ) -> Result<()> {
        if let Some(mut trace) = self.current.take() {
            trace.outcome = outcome;
            serde_json::to_writer(&mut self.writer, &trace)?;
            writeln!(&mut self.writer)?;
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
