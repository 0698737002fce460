//! Blackjack CLI - Tabular Q-learning on a simplified Blackjack game
//!
//! This CLI provides a unified interface for:
//! - Training an epsilon-greedy Q-learning agent and evaluating it greedily
//! - Inspecting the learned Q-values and policy
//! - Watching the trained agent play individual rounds

use anyhow::Result;
use blackjack_rl::cli::commands::{play, train};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackjack")]
#[command(version, about = "Q-learning Blackjack trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent, report convergence and evaluate it
    Train(Box<train::TrainArgs>),

    /// Train an agent, then play greedy rounds step by step
    Play(play::PlayArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Train(args) => args.common.verbose,
            Commands::Play(args) => args.common.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());

    match cli.command {
        Commands::Train(args) => train::execute(*args),
        Commands::Play(args) => play::execute(args),
    }
}
