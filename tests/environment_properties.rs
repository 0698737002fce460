//! Property checks for the Blackjack environment over many seeded rounds

use blackjack_rl::{
    Action, BlackjackEnv, Error, State,
    blackjack::{Card, StackedDeck},
    ports::Environment,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const ROUNDS: usize = 2_000;

/// Play `ROUNDS` rounds choosing actions at random, handing every transition
/// to `check`.
fn random_play(seed: u64, mut check: impl FnMut(&State, Action, &blackjack_rl::Transition)) {
    let mut env = BlackjackEnv::new(Some(seed));
    let mut rng = StdRng::seed_from_u64(seed ^ 0xB1AC);
    for _ in 0..ROUNDS {
        let mut state = env.reset().unwrap();
        loop {
            let action = if rng.random_bool(0.7) {
                Action::Hit
            } else {
                Action::Stick
            };
            let transition = env.step(action).unwrap();
            check(&state, action, &transition);
            if transition.terminal {
                break;
            }
            state = transition.next_state;
        }
    }
}

#[test]
fn test_non_terminal_hit_has_zero_reward() {
    random_play(1, |state, action, transition| {
        if action == Action::Hit && !transition.terminal {
            assert_eq!(transition.reward, 0.0, "{state}");
            assert!(!transition.next_state.is_bust());
        }
    });
}

#[test]
fn test_hard_hand_hit_increases_sum() {
    // A soft hand can drop when the ace reverts to 1, so only hard hands
    // are guaranteed to grow.
    random_play(2, |state, action, transition| {
        if action == Action::Hit && !state.usable_ace() {
            assert!(
                transition.next_state.player_sum() > state.player_sum(),
                "{state} -> {}",
                transition.next_state
            );
        }
    });
}

#[test]
fn test_bust_terminates_with_negative_reward() {
    let mut busts = 0;
    random_play(3, |state, action, transition| {
        if action == Action::Hit && transition.next_state.player_sum() > 21 {
            busts += 1;
            assert!(transition.terminal, "{state}");
            assert_eq!(transition.reward, -1.0);
        }
    });
    assert!(busts > 0);
}

#[test]
fn test_stick_always_terminates() {
    random_play(4, |state, action, transition| {
        if action == Action::Stick {
            assert!(transition.terminal);
            assert_eq!(transition.next_state, *state);
            assert!([-1.0, 0.0, 1.0].contains(&transition.reward));
        }
    });
}

#[test]
fn test_observations_stay_in_bounds() {
    random_play(5, |state, _action, transition| {
        for s in [state, &transition.next_state] {
            assert!((4..=31).contains(&s.player_sum()));
            assert!((1..=10).contains(&s.dealer_card()));
            if s.usable_ace() {
                assert!((12..=21).contains(&s.player_sum()));
            }
        }
    });
}

#[test]
fn test_step_after_terminal_fails() {
    let mut env = BlackjackEnv::new(Some(6));
    env.reset().unwrap();
    env.step(Action::Stick).unwrap();
    assert!(matches!(env.step(Action::Hit), Err(Error::RoundFinished)));
    assert!(env.reset().is_ok());
}

#[test]
fn test_unknown_action_rejected() {
    assert!(matches!(
        "double".parse::<Action>(),
        Err(Error::InvalidAction { .. })
    ));
    assert!(matches!(
        Action::try_from(2usize),
        Err(Error::InvalidAction { .. })
    ));
    assert_eq!("hit".parse::<Action>().unwrap(), Action::Hit);
}

#[test]
fn test_dealer_bust_pays_player() {
    // Dealer 16 draws a ten and busts; player stands on 12.
    let deck = StackedDeck::new(
        [Card::Ten, Card::Six, Card::Ten, Card::Two, Card::King],
        Some(0),
    );
    let mut env = BlackjackEnv::with_deck(deck);
    let state = env.reset().unwrap();
    assert_eq!(state, State::new(12, 10, false).unwrap());

    let transition = env.step(Action::Stick).unwrap();
    assert!(transition.terminal);
    assert_eq!(transition.reward, 1.0);
    assert!(env.dealer_hand().is_bust());
}
