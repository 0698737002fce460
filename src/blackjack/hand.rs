//! Hand totals, usable aces and naturals

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    card::Card,
    rules::{ACE_BONUS, BUST_THRESHOLD, is_bust},
};

/// Cards held by one participant during a round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum with every ace counted as 1, saturating at `u8::MAX`.
    pub fn hard_total(&self) -> u8 {
        self.cards
            .iter()
            .fold(0u8, |total, card| total.saturating_add(card.value()))
    }

    /// An ace can count as 11 without busting the hand.
    ///
    /// At most one ace is ever usable: two aces at 11 would already be 22.
    pub fn usable_ace(&self) -> bool {
        self.cards.iter().any(|card| card.is_ace())
            && self.hard_total().saturating_add(ACE_BONUS) <= BUST_THRESHOLD
    }

    /// Best total: the hard total plus the ace bonus when an ace is usable.
    pub fn total(&self) -> u8 {
        if self.usable_ace() {
            self.hard_total() + ACE_BONUS
        } else {
            self.hard_total()
        }
    }

    pub fn is_bust(&self) -> bool {
        is_bust(self.total())
    }

    /// Two-card 21 (an ace and a ten-valued card).
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.total() == BUST_THRESHOLD
    }

    /// Comparison score: the total, or 0 once bust.
    pub fn score(&self) -> u8 {
        if self.is_bust() { 0 } else { self.total() }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        write!(f, "[{}] = {}", cards.join(" "), self.total())
    }
}
