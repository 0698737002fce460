//! Dense Q-table for the Blackjack state space

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    blackjack::{
        Action, State,
        rules::{MAX_DEALER_CARD, MAX_PLAYER_SUM, MIN_DEALER_CARD, MIN_PLAYER_SUM},
    },
    ports::learner::ValueUpdate,
};

const SUM_SLOTS: usize = (MAX_PLAYER_SUM - MIN_PLAYER_SUM) as usize + 1;
const DEALER_SLOTS: usize = (MAX_DEALER_CARD - MIN_DEALER_CARD) as usize + 1;
const ACE_SLOTS: usize = 2;
const ACTION_SLOTS: usize = Action::ALL.len();

/// Number of (state, action) slots in the table.
pub const TABLE_LEN: usize = SUM_SLOTS * DEALER_SLOTS * ACE_SLOTS * ACTION_SLOTS;

/// How the TD target treats the next-state value on terminal transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalBootstrap {
    /// Always add `γ · max Q(s', ·)`, even when `s'` is terminal. After a
    /// stick `s'` is the unchanged player state, so the entry being updated
    /// bootstraps from its own row.
    #[default]
    Literal,
    /// Treat the next-state value as 0 on terminal transitions.
    Zero,
}

impl FromStr for TerminalBootstrap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(TerminalBootstrap::Literal),
            "zero" => Ok(TerminalBootstrap::Zero),
            other => Err(Error::invalid_config(format!(
                "unknown terminal bootstrap '{other}' (expected 'literal' or 'zero')"
            ))),
        }
    }
}

impl fmt::Display for TerminalBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalBootstrap::Literal => f.write_str("literal"),
            TerminalBootstrap::Zero => f.write_str("zero"),
        }
    }
}

/// Q-table mapping (state, action) pairs to value estimates
///
/// Storage is a flat array addressed by an injective encoding of
/// (player sum, dealer card, usable ace, action). [`State`] values are
/// bounds-checked at construction, so lookups here index directly.
/// Deserialization rejects a `values` array of any other length than
/// [`TABLE_LEN`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQTable")]
pub struct QTable {
    values: Vec<f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    terminal_bootstrap: TerminalBootstrap,
}

#[derive(Deserialize)]
struct RawQTable {
    values: Vec<f64>,
    learning_rate: f64,
    discount_factor: f64,
    terminal_bootstrap: TerminalBootstrap,
}

impl TryFrom<RawQTable> for QTable {
    type Error = Error;

    fn try_from(raw: RawQTable) -> Result<Self> {
        if raw.values.len() != TABLE_LEN {
            return Err(Error::TableShape {
                expected: TABLE_LEN,
                actual: raw.values.len(),
            });
        }
        Ok(QTable {
            values: raw.values,
            learning_rate: raw.learning_rate,
            discount_factor: raw.discount_factor,
            terminal_bootstrap: raw.terminal_bootstrap,
        })
    }
}

fn index(state: &State, action: Action) -> usize {
    let sum = (state.player_sum() - MIN_PLAYER_SUM) as usize;
    let dealer = (state.dealer_card() - MIN_DEALER_CARD) as usize;
    let ace = usize::from(state.usable_ace());
    ((sum * DEALER_SLOTS + dealer) * ACE_SLOTS + ace) * ACTION_SLOTS + action.index()
}

impl QTable {
    /// Create a zero-initialized table
    pub fn new(
        learning_rate: f64,
        discount_factor: f64,
        terminal_bootstrap: TerminalBootstrap,
    ) -> Self {
        Self {
            values: vec![0.0; TABLE_LEN],
            learning_rate,
            discount_factor,
            terminal_bootstrap,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn terminal_bootstrap(&self) -> TerminalBootstrap {
        self.terminal_bootstrap
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &State, action: Action) -> f64 {
        self.values[index(state, action)]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: &State, action: Action, value: f64) {
        self.values[index(state, action)] = value;
    }

    /// Values for every action, in [`Action::ALL`] order
    pub fn action_values(&self, state: &State) -> [f64; 2] {
        Action::ALL.map(|action| self.get(state, action))
    }

    /// Maximum Q-value over both actions
    pub fn max_q(&self, state: &State) -> f64 {
        self.action_values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action; ties go to the earliest action in [`Action::ALL`]
    /// (Stick before Hit).
    pub fn greedy_action(&self, state: &State) -> Action {
        let mut best = Action::ALL[0];
        let mut best_value = self.get(state, best);
        for action in Action::ALL.into_iter().skip(1) {
            let value = self.get(state, action);
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// With [`TerminalBootstrap::Zero`] the max term is dropped when `done`.
    pub fn q_learning_update(
        &mut self,
        state: &State,
        action: Action,
        reward: f64,
        next_state: &State,
        done: bool,
    ) -> ValueUpdate {
        let current_q = self.get(state, action);
        let max_next_q = match (done, self.terminal_bootstrap) {
            (true, TerminalBootstrap::Zero) => 0.0,
            _ => self.max_q(next_state),
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        ValueUpdate {
            old_value: current_q,
            new_value: new_q,
        }
    }

    /// Every representable state with its action values
    pub fn rows(&self) -> impl Iterator<Item = (State, [f64; 2])> + '_ {
        all_states().map(|state| (state, self.action_values(&state)))
    }

    /// Rows for the decision region usually displayed: player sums 12-21
    /// against every dealer card, both ace flags.
    pub fn display_rows(&self) -> impl Iterator<Item = (State, [f64; 2])> + '_ {
        self.rows()
            .filter(|(state, _)| (12..=21).contains(&state.player_sum()))
    }

    /// Number of entries that differ from zero
    pub fn nonzero_entries(&self) -> usize {
        self.values.iter().filter(|value| **value != 0.0).count()
    }

    /// Total number of slots
    pub fn size(&self) -> usize {
        self.values.len()
    }
}

/// All states that pass the bounds check, ordered by sum, dealer card, ace.
pub fn all_states() -> impl Iterator<Item = State> {
    (MIN_PLAYER_SUM..=MAX_PLAYER_SUM).flat_map(|sum| {
        (MIN_DEALER_CARD..=MAX_DEALER_CARD).flat_map(move |dealer| {
            [false, true]
                .into_iter()
                .filter_map(move |ace| State::new(sum, dealer, ace).ok())
        })
    })
}
