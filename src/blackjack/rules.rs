//! Rule constants for the simulated game
//!
//! These mirror the Sutton & Barto formulation of Blackjack: a single player
//! against a dealer who follows a fixed house policy, cards drawn with
//! replacement from an infinite deck.

/// Hand totals above this value are bust.
pub const BUST_THRESHOLD: u8 = 21;

/// The dealer keeps drawing while their total is below this value.
pub const DEALER_STAND_THRESHOLD: u8 = 17;

/// Extra value an ace contributes when counted as 11 instead of 1.
pub const ACE_BONUS: u8 = 10;

/// Smallest player sum an opening hand can show (2 + 2).
pub const MIN_PLAYER_SUM: u8 = 4;

/// Largest player sum an observation can carry (hard 21 hit by a ten).
pub const MAX_PLAYER_SUM: u8 = BUST_THRESHOLD + 10;

/// Dealer up-card values run from ace (1) to ten-valued cards (10).
pub const MIN_DEALER_CARD: u8 = 1;
pub const MAX_DEALER_CARD: u8 = 10;

/// A usable ace implies at least ace-as-11 plus one more point.
pub const MIN_SOFT_SUM: u8 = 1 + ACE_BONUS + 1;

/// Whether a total is bust.
pub fn is_bust(total: u8) -> bool {
    total > BUST_THRESHOLD
}

/// Whether the dealer must draw another card at this total.
pub fn dealer_must_draw(total: u8) -> bool {
    total < DEALER_STAND_THRESHOLD
}
