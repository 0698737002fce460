//! Greedy evaluation of a trained table

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    blackjack::{Action, BlackjackEnv, GameOutcome, State},
    ports::Environment,
    q_learning::QTable,
};

/// Read-only greedy view of a trained table
///
/// Always exploits (no exploration) with the same tie-break as training and
/// never writes to the table.
#[derive(Debug, Clone, Copy)]
pub struct FrozenLearner<'a> {
    table: &'a QTable,
}

impl<'a> FrozenLearner<'a> {
    pub fn new(table: &'a QTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a QTable {
        self.table
    }

    /// Greedy action for `state`.
    pub fn select_action(&self, state: &State) -> Action {
        self.table.greedy_action(state)
    }
}

/// Win/draw/loss counts over a fixed number of greedy rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_rounds: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl EvaluationResult {
    pub fn new(wins: usize, draws: usize, losses: usize) -> Self {
        let total_rounds = wins + draws + losses;
        let rate = |count: usize| {
            if total_rounds > 0 {
                count as f64 / total_rounds as f64
            } else {
                0.0
            }
        };
        Self {
            total_rounds,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// A single greedy round, step by step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyRound {
    /// Each observed state and the action taken from it
    pub steps: Vec<(State, Action)>,
    pub final_reward: f64,
    pub outcome: GameOutcome,
}

/// Play one round greedily against `env`.
pub fn play_greedy_round<E: Environment>(env: &mut E, table: &QTable) -> Result<GreedyRound> {
    let learner = FrozenLearner::new(table);
    let mut state = env.reset()?;
    let mut steps = Vec::new();
    loop {
        let action = learner.select_action(&state);
        steps.push((state, action));
        let transition = env.step(action)?;
        if transition.terminal {
            return Ok(GreedyRound {
                steps,
                final_reward: transition.reward,
                outcome: GameOutcome::from_reward(transition.reward),
            });
        }
        state = transition.next_state;
    }
}

/// Run `rounds` greedy rounds against `env` and tally outcomes.
pub fn evaluate_in<E: Environment>(
    env: &mut E,
    table: &QTable,
    rounds: usize,
) -> Result<EvaluationResult> {
    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;
    for _ in 0..rounds {
        match play_greedy_round(env, table)?.outcome {
            GameOutcome::Win => wins += 1,
            GameOutcome::Draw => draws += 1,
            GameOutcome::Loss => losses += 1,
        }
    }
    let result = EvaluationResult::new(wins, draws, losses);
    log::info!(
        "evaluated {} rounds: {} wins, {} draws, {} losses",
        result.total_rounds,
        result.wins,
        result.draws,
        result.losses
    );
    Ok(result)
}

/// Evaluate on a fresh infinite-deck environment. A seed makes the result
/// fully deterministic.
pub fn evaluate(table: &QTable, rounds: usize, seed: Option<u64>) -> Result<EvaluationResult> {
    let mut env = BlackjackEnv::new(seed);
    evaluate_in(&mut env, table, rounds)
}
