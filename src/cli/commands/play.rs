//! Play command - Train an agent, then watch it play greedy rounds

use anyhow::{Context, Result};
use clap::Parser;

use super::evaluation_seed;
use crate::{
    blackjack::{BlackjackEnv, GameOutcome},
    cli::{
        config::{CommonArgs, TrainingArgs},
        output::{print_kv, print_section, print_subsection, print_training_summary},
    },
    pipeline::{GreedyRound, ProgressObserver, TrainingPipeline, play_greedy_round},
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent and play greedy rounds", allow_negative_numbers = true)]
pub struct PlayArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of rounds to play after training
    #[arg(long, short = 'n', default_value_t = 1)]
    pub rounds: usize,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args
        .training
        .resolve()
        .context("invalid training configuration")?;

    let mut pipeline = TrainingPipeline::new(config.clone())?;
    if args.common.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let run = pipeline.run()?;

    print_section("Training Results");
    print_training_summary(&run.summary);

    print_section("Simulated Rounds");
    let mut env = BlackjackEnv::new(evaluation_seed(config.seed));
    let mut total_reward = 0.0;
    for round in 1..=args.rounds {
        let result = play_greedy_round(&mut env, &run.q_table)?;
        print_subsection(&format!("Round {round}"));
        print_round(&result);
        print_kv("Player hand", &env.player_hand().to_string());
        print_kv("Dealer hand", &env.dealer_hand().to_string());
        total_reward += result.final_reward;
    }

    if args.rounds > 1 {
        print_subsection("Total");
        print_kv("Net reward", &total_reward.to_string());
    }

    Ok(())
}

fn print_round(round: &GreedyRound) {
    for (idx, (state, action)) in round.steps.iter().enumerate() {
        println!("  Step {}: {state}, Action: {action}", idx + 1);
    }
    let verdict = match round.outcome {
        GameOutcome::Win => "Agent wins!",
        GameOutcome::Draw => "It's a draw!",
        GameOutcome::Loss => "Agent loses!",
    };
    println!("  {verdict}");
    print_kv("Final reward", &round.final_reward.to_string());
}
