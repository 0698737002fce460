//! Greedy policy grids
//!
//! The usual way to read a Blackjack policy: one row per player sum
//! (12-21), one column per dealer up-card (ace-10), separately for hands
//! with and without a usable ace. Sums below 12 are omitted because hitting
//! them can never bust.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    blackjack::{
        Action, State,
        rules::{BUST_THRESHOLD, MAX_DEALER_CARD, MIN_DEALER_CARD, MIN_SOFT_SUM},
    },
    q_learning::QTable,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyGridRow {
    pub player_sum: u8,
    /// Greedy action for dealer cards 1..=10
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyGrid {
    pub usable_ace: bool,
    /// Highest sum first, matching the conventional chart layout
    pub rows: Vec<PolicyGridRow>,
}

impl PolicyGrid {
    pub fn from_table(table: &QTable, usable_ace: bool) -> Self {
        let rows = (MIN_SOFT_SUM..=BUST_THRESHOLD)
            .rev()
            .map(|player_sum| PolicyGridRow {
                player_sum,
                actions: (MIN_DEALER_CARD..=MAX_DEALER_CARD)
                    .filter_map(|dealer| State::new(player_sum, dealer, usable_ace).ok())
                    .map(|state| table.greedy_action(&state))
                    .collect(),
            })
            .collect();
        Self { usable_ace, rows }
    }

    /// Greedy action at a given cell, if it is on the grid
    pub fn action(&self, player_sum: u8, dealer_card: u8) -> Option<Action> {
        let row = self.rows.iter().find(|row| row.player_sum == player_sum)?;
        let column = dealer_card.checked_sub(MIN_DEALER_CARD)? as usize;
        row.actions.get(column).copied()
    }

    /// Number of cells where the greedy action is Hit
    pub fn hit_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.actions.iter())
            .filter(|action| **action == Action::Hit)
            .count()
    }
}

impl fmt::Display for PolicyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.usable_ace {
            "usable ace"
        } else {
            "no usable ace"
        };
        writeln!(f, "Greedy policy ({title}); H = hit, S = stick")?;
        write!(f, "{:>4} |", "sum")?;
        for dealer in MIN_DEALER_CARD..=MAX_DEALER_CARD {
            let label = if dealer == 1 {
                "A".to_string()
            } else {
                dealer.to_string()
            };
            write!(f, "{label:>3}")?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:>4} |", row.player_sum)?;
            for action in &row.actions {
                let symbol = match action {
                    Action::Hit => "H",
                    Action::Stick => "S",
                };
                write!(f, "{symbol:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
