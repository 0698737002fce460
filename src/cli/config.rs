//! Shared argument groups for CLI commands

use std::path::PathBuf;

use clap::{ArgAction, Args};

use crate::{Result, pipeline::TrainingConfig, q_learning::TerminalBootstrap};

/// Training hyperparameters shared by every command that trains
///
/// A `--config` JSON file supplies the base values; explicit flags override
/// it, and anything left unset falls back to [`TrainingConfig::default`].
#[derive(Args, Debug, Clone, Default)]
pub struct TrainingArgs {
    /// JSON training configuration used as the base for the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of training episodes [default: 2000]
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Learning rate α in (0, 1] [default: 0.1]
    #[arg(long, alias = "alpha")]
    pub learning_rate: Option<f64>,

    /// Discount factor γ in (0, 1] [default: 0.95]
    #[arg(long, alias = "gamma")]
    pub discount: Option<f64>,

    /// Exploration rate ε in [0, 1] [default: 0.1]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Next-state handling on terminal transitions (literal or zero)
    #[arg(long)]
    pub terminal_bootstrap: Option<TerminalBootstrap>,
}

impl TrainingArgs {
    /// Merge the config file (if any) with the flags and validate the result.
    pub fn resolve(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::load(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(discount) = self.discount {
            config.discount_factor = discount;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(bootstrap) = self.terminal_bootstrap {
            config.terminal_bootstrap = bootstrap;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Display options common to all commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Hide the training progress bar
    #[arg(long = "no-progress", action = ArgAction::SetFalse)]
    pub progress: bool,

    /// Log at debug level
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            progress: true,
            verbose: false,
        }
    }
}
