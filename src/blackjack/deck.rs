//! Card sources for the environment
//!
//! The game assumes an infinite deck: each draw is an independent uniform
//! sample over ranks and depletion is never tracked. [`StackedDeck`] lets
//! callers script the first cards of a run, which makes single episodes
//! reproducible card-for-card.

use std::collections::VecDeque;

use rand::{SeedableRng, rngs::StdRng};

use super::card::Card;

/// Anything that can hand out cards
pub trait Deck {
    fn draw(&mut self) -> Card;
}

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Sampling-with-replacement deck
#[derive(Debug, Clone)]
pub struct InfiniteDeck {
    rng: StdRng,
}

impl InfiniteDeck {
    /// Seeded decks replay the same card sequence; `None` uses OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
        }
    }
}

impl Deck for InfiniteDeck {
    fn draw(&mut self) -> Card {
        Card::draw(&mut self.rng)
    }
}

/// Deals a scripted sequence first, then falls back to random draws
#[derive(Debug, Clone)]
pub struct StackedDeck {
    stacked: VecDeque<Card>,
    fallback: InfiniteDeck,
}

impl StackedDeck {
    pub fn new(cards: impl IntoIterator<Item = Card>, fallback_seed: Option<u64>) -> Self {
        Self {
            stacked: cards.into_iter().collect(),
            fallback: InfiniteDeck::new(fallback_seed),
        }
    }

    /// Cards still waiting to be dealt from the script.
    pub fn remaining(&self) -> usize {
        self.stacked.len()
    }
}

impl Deck for StackedDeck {
    fn draw(&mut self) -> Card {
        self.stacked
            .pop_front()
            .unwrap_or_else(|| self.fallback.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_decks_repeat() {
        let mut a = InfiniteDeck::new(Some(9));
        let mut b = InfiniteDeck::new(Some(9));
        let first: Vec<Card> = (0..50).map(|_| a.draw()).collect();
        let second: Vec<Card> = (0..50).map(|_| b.draw()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stacked_deck_deals_script_first() {
        let mut deck = StackedDeck::new([Card::Ace, Card::King], Some(1));
        assert_eq!(deck.remaining(), 2);
        assert_eq!(deck.draw(), Card::Ace);
        assert_eq!(deck.draw(), Card::King);
        assert_eq!(deck.remaining(), 0);
        // Falls back to random cards without panicking
        let _ = deck.draw();
    }
}
