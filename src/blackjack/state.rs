//! Observation, action and outcome value types

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::rules::{
    BUST_THRESHOLD, MAX_DEALER_CARD, MAX_PLAYER_SUM, MIN_DEALER_CARD, MIN_PLAYER_SUM,
    MIN_SOFT_SUM,
};
use crate::{Error, Result};

/// What the player observes: their total, the dealer's up-card and whether
/// they hold a usable ace.
///
/// Fields are private so every `State` in circulation has passed the bounds
/// check in [`State::new`]; the Q-table relies on this to index without
/// re-validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawState", into = "RawState")]
pub struct State {
    player_sum: u8,
    dealer_card: u8,
    usable_ace: bool,
}

impl State {
    /// Create a state, validating every field against the game bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateOutOfBounds`] when the player sum is outside
    /// `[4, 31]`, the dealer card outside `[1, 10]`, or a usable ace is
    /// claimed for a sum outside `[12, 21]`.
    pub fn new(player_sum: u8, dealer_card: u8, usable_ace: bool) -> Result<Self> {
        let sum_ok = (MIN_PLAYER_SUM..=MAX_PLAYER_SUM).contains(&player_sum);
        let dealer_ok = (MIN_DEALER_CARD..=MAX_DEALER_CARD).contains(&dealer_card);
        let ace_ok = !usable_ace || (MIN_SOFT_SUM..=BUST_THRESHOLD).contains(&player_sum);
        if sum_ok && dealer_ok && ace_ok {
            Ok(Self {
                player_sum,
                dealer_card,
                usable_ace,
            })
        } else {
            Err(Error::StateOutOfBounds {
                player_sum,
                dealer_card,
                usable_ace,
            })
        }
    }

    pub fn player_sum(&self) -> u8 {
        self.player_sum
    }

    pub fn dealer_card(&self) -> u8 {
        self.dealer_card
    }

    pub fn usable_ace(&self) -> bool {
        self.usable_ace
    }

    pub fn is_bust(&self) -> bool {
        self.player_sum > BUST_THRESHOLD
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player sum={}, Dealer card={}, Usable Ace={}",
            self.player_sum, self.dealer_card, self.usable_ace
        )
    }
}

#[derive(Serialize, Deserialize)]
struct RawState {
    player_sum: u8,
    dealer_card: u8,
    usable_ace: bool,
}

impl TryFrom<RawState> for State {
    type Error = Error;

    fn try_from(raw: RawState) -> Result<Self> {
        State::new(raw.player_sum, raw.dealer_card, raw.usable_ace)
    }
}

impl From<State> for RawState {
    fn from(state: State) -> Self {
        RawState {
            player_sum: state.player_sum,
            dealer_card: state.dealer_card,
            usable_ace: state.usable_ace,
        }
    }
}

/// The two moves available to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Stick,
    Hit,
}

impl Action {
    /// Enumeration order. Greedy selection breaks ties toward the first entry.
    pub const ALL: [Action; 2] = [Action::Stick, Action::Hit];

    pub fn index(self) -> usize {
        match self {
            Action::Stick => 0,
            Action::Hit => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Stick => "Stick",
            Action::Hit => "Hit",
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or_else(|| Error::InvalidAction {
                input: index.to_string(),
            })
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stick" | "stand" | "s" | "0" => Ok(Action::Stick),
            "hit" | "h" | "1" => Ok(Action::Hit),
            _ => Err(Error::InvalidAction {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one environment step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub next_state: State,
    pub reward: f64,
    pub terminal: bool,
}

/// Final classification of a round from the player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Draw,
    Loss,
}

impl GameOutcome {
    /// Classify a terminal reward: positive wins, zero draws, negative loses.
    pub fn from_reward(reward: f64) -> Self {
        if reward > 0.0 {
            GameOutcome::Win
        } else if reward < 0.0 {
            GameOutcome::Loss
        } else {
            GameOutcome::Draw
        }
    }

    pub fn reward(self) -> f64 {
        match self {
            GameOutcome::Win => 1.0,
            GameOutcome::Draw => 0.0,
            GameOutcome::Loss => -1.0,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOutcome::Win => "win",
            GameOutcome::Draw => "draw",
            GameOutcome::Loss => "loss",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_bounds() {
        assert!(State::new(4, 1, false).is_ok());
        assert!(State::new(31, 10, false).is_ok());
        assert!(State::new(3, 5, false).is_err());
        assert!(State::new(32, 5, false).is_err());
        assert!(State::new(15, 0, false).is_err());
        assert!(State::new(15, 11, false).is_err());
    }

    #[test]
    fn test_usable_ace_only_for_soft_totals() {
        assert!(State::new(12, 4, true).is_ok());
        assert!(State::new(21, 4, true).is_ok());
        assert!(matches!(
            State::new(22, 4, true),
            Err(Error::StateOutOfBounds { .. })
        ));
        assert!(State::new(8, 4, true).is_err());
    }

    #[test]
    fn test_action_parsing_fails_fast() {
        assert_eq!("hit".parse::<Action>().unwrap(), Action::Hit);
        assert_eq!("Stick".parse::<Action>().unwrap(), Action::Stick);
        assert!(matches!(
            "double".parse::<Action>(),
            Err(Error::InvalidAction { .. })
        ));
        assert_eq!(Action::try_from(1usize).unwrap(), Action::Hit);
        assert!(matches!(
            Action::try_from(2usize),
            Err(Error::InvalidAction { .. })
        ));
    }

    #[test]
    fn test_outcome_from_reward() {
        assert_eq!(GameOutcome::from_reward(1.0), GameOutcome::Win);
        assert_eq!(GameOutcome::from_reward(0.0), GameOutcome::Draw);
        assert_eq!(GameOutcome::from_reward(-1.0), GameOutcome::Loss);
    }

    #[test]
    fn test_state_deserialization_rejects_out_of_bounds() {
        let ok: State =
            serde_json::from_str(r#"{"player_sum":20,"dealer_card":6,"usable_ace":false}"#)
                .unwrap();
        assert_eq!(ok.player_sum(), 20);
        let bad = serde_json::from_str::<State>(
            r#"{"player_sum":40,"dealer_card":6,"usable_ace":false}"#,
        );
        assert!(bad.is_err());
    }
}
