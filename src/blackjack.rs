//! Infinite-deck Blackjack environment

pub mod card;
pub mod deck;
pub mod env;
pub mod hand;
pub mod rules;
pub mod state;

pub use card::Card;
pub use deck::{Deck, InfiniteDeck, StackedDeck};
pub use env::BlackjackEnv;
pub use hand::Hand;
pub use state::{Action, GameOutcome, State, Transition};
