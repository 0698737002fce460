//! One round of Blackjack behind the reset/step protocol

use super::{
    card::Card,
    deck::{Deck, InfiniteDeck},
    hand::Hand,
    rules::dealer_must_draw,
    state::{Action, State, Transition},
};
use crate::{Error, Result, ports::Environment};

/// Blackjack environment over an arbitrary card source
///
/// Holds the current round only: the player's hand, the dealer's hand (whose
/// hole card never appears in the observed [`State`]) and whether the round
/// has reached a terminal transition.
#[derive(Debug, Clone)]
pub struct BlackjackEnv<D: Deck = InfiniteDeck> {
    deck: D,
    player: Hand,
    dealer: Hand,
    finished: bool,
}

impl BlackjackEnv<InfiniteDeck> {
    /// Environment over an infinite deck; seeded runs deal identical cards.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_deck(InfiniteDeck::new(seed))
    }
}

impl<D: Deck> BlackjackEnv<D> {
    pub fn with_deck(deck: D) -> Self {
        Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            finished: true,
        }
    }

    /// Start a round from a fixed opening: the given player cards and dealer
    /// up-card. The dealer's hole card still comes from the deck.
    pub fn reset_with(&mut self, player: [Card; 2], dealer_up: Card) -> Result<State> {
        self.player = Hand::from_cards(&player);
        self.dealer = Hand::from_cards(&[dealer_up]);
        self.dealer.push(self.deck.draw());
        self.finished = false;
        self.observe()
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn deck(&self) -> &D {
        &self.deck
    }

    /// Current observation of the round.
    ///
    /// # Errors
    ///
    /// [`Error::StateOutOfBounds`] if the hands ever leave the game bounds,
    /// which would mean the dealing logic is broken.
    pub fn observe(&self) -> Result<State> {
        let dealer_card = self
            .dealer
            .cards()
            .first()
            .map(|card| card.value())
            .unwrap_or(0);
        State::new(self.player.total(), dealer_card, self.player.usable_ace())
    }

    fn hit(&mut self) -> Result<Transition> {
        self.player.push(self.deck.draw());
        let next_state = self.observe()?;
        if self.player.is_bust() {
            self.finished = true;
            Ok(Transition {
                next_state,
                reward: -1.0,
                terminal: true,
            })
        } else {
            Ok(Transition {
                next_state,
                reward: 0.0,
                terminal: false,
            })
        }
    }

    fn stick(&mut self) -> Result<Transition> {
        self.finished = true;
        while dealer_must_draw(self.dealer.total()) {
            self.dealer.push(self.deck.draw());
        }

        let player_score = self.player.score();
        let dealer_score = self.dealer.score();
        let mut reward = match player_score.cmp(&dealer_score) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => -1.0,
        };
        // A natural beats any dealer total except another natural
        if self.player.is_natural() && !self.dealer.is_natural() {
            reward = 1.0;
        }

        Ok(Transition {
            next_state: self.observe()?,
            reward,
            terminal: true,
        })
    }
}

impl<D: Deck> Environment for BlackjackEnv<D> {
    /// Deal a fresh round: dealer up-card, dealer hole card, then two player
    /// cards.
    fn reset(&mut self) -> Result<State> {
        self.dealer = Hand::new();
        self.player = Hand::new();
        self.dealer.push(self.deck.draw());
        self.dealer.push(self.deck.draw());
        self.player.push(self.deck.draw());
        self.player.push(self.deck.draw());
        self.finished = false;
        self.observe()
    }

    /// Apply an action to the current round.
    ///
    /// A non-bust hit returns reward 0 and keeps the round alive; a bust
    /// returns -1. Sticking always ends the round after the dealer plays out
    /// their hand.
    fn step(&mut self, action: Action) -> Result<Transition> {
        if self.finished {
            return Err(Error::RoundFinished);
        }
        match action {
            Action::Hit => self.hit(),
            Action::Stick => self.stick(),
        }
    }
}
