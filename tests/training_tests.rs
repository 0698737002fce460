//! Tests for the episodic training loop

use std::sync::{Arc, Mutex};

use blackjack_rl::{
    Action, BlackjackEnv, Error, Result, State, TerminalBootstrap,
    blackjack::{Card, Deck, Hand, InfiniteDeck, StackedDeck},
    pipeline::{
        EpisodeTrace, JsonlObserver, MetricsObserver, Observer, TrainingConfig, TrainingPipeline,
        train,
    },
    q_learning::{QLearningAgent, QTable, all_states},
};
use tempfile::tempdir;

fn deterministic_config(episodes: usize) -> TrainingConfig {
    TrainingConfig {
        episodes,
        learning_rate: 1.0,
        discount_factor: 1.0,
        epsilon: 0.0,
        seed: Some(2024),
        record_traces: true,
        terminal_bootstrap: TerminalBootstrap::Literal,
    }
}

/// Records every progress callback
struct ProgressRecorder {
    calls: Arc<Mutex<Vec<(usize, usize)>>>,
    started: Arc<Mutex<Option<usize>>>,
}

impl Observer for ProgressRecorder {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        *self.started.lock().unwrap() = Some(total_episodes);
        Ok(())
    }

    fn on_progress(&mut self, completed: usize, total: usize) -> Result<()> {
        self.calls.lock().unwrap().push((completed, total));
        Ok(())
    }
}

#[test]
fn test_table_starts_at_zero() {
    let table = QTable::new(0.1, 0.95, TerminalBootstrap::Literal);
    for state in all_states() {
        for action in Action::ALL {
            assert_eq!(table.get(&state, action), 0.0);
        }
    }
    assert_eq!(table.nonzero_entries(), 0);
}

#[test]
fn test_zero_learning_rate_leaves_table_unchanged() {
    let config = TrainingConfig {
        episodes: 500,
        seed: Some(3),
        ..TrainingConfig::default()
    };
    // α = 0 is outside the validated range, so drive the loop directly.
    let mut agent = QLearningAgent::new(0.0, 0.95, 0.1, TerminalBootstrap::Literal).with_seed(4);
    let mut env = BlackjackEnv::new(Some(3));
    let mut pipeline = TrainingPipeline::new(config).unwrap();

    let log = pipeline.run_with(&mut env, &mut agent).unwrap();

    assert_eq!(log.rewards_history.len(), 500);
    assert_eq!(agent.q_table().nonzero_entries(), 0);
}

#[test]
fn test_zero_learning_rate_rejected_by_config() {
    let config = TrainingConfig {
        learning_rate: 0.0,
        ..TrainingConfig::default()
    };
    assert!(matches!(
        TrainingPipeline::new(config),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_full_exploration_picks_actions_uniformly() {
    let config = TrainingConfig {
        episodes: 5_000,
        epsilon: 1.0,
        seed: Some(17),
        ..TrainingConfig::default()
    };
    let metrics = MetricsObserver::new();
    let handle = metrics.handle();
    let mut pipeline = TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(metrics));
    pipeline.run().unwrap();

    let summary = handle.summary();
    assert_eq!(summary.total_episodes, 5_000);
    assert!(
        (summary.hit_fraction - 0.5).abs() < 0.03,
        "hit fraction {}",
        summary.hit_fraction
    );
}

#[test]
fn test_same_seed_same_run() {
    let config = TrainingConfig {
        episodes: 300,
        seed: Some(99),
        record_traces: true,
        ..TrainingConfig::default()
    };
    let first = train(&config).unwrap();
    let second = train(&config).unwrap();

    assert_eq!(first.rewards_history, second.rewards_history);
    assert_eq!(first.traces, second.traces);
    assert_eq!(first.q_table, second.q_table);
}

#[test]
fn test_single_episode_matches_seeded_cards() {
    let run = train(&deterministic_config(1)).unwrap();

    // Replay the deck the environment was seeded with.
    let mut deck = InfiniteDeck::new(Some(2024));
    let mut dealer = Hand::from_cards(&[deck.draw(), deck.draw()]);
    let player = Hand::from_cards(&[deck.draw(), deck.draw()]);
    let state = State::new(
        player.total(),
        dealer.cards()[0].value(),
        player.usable_ace(),
    )
    .unwrap();
    while dealer.total() < 17 {
        dealer.push(deck.draw());
    }
    let expected_reward = if player.is_natural() && !dealer.is_natural() {
        1.0
    } else {
        match player.score().cmp(&dealer.score()) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => -1.0,
        }
    };

    let traces = run.traces.unwrap();
    assert_eq!(traces.len(), 1);
    let trace = &traces[0];
    // Zero table and ε = 0: the greedy tie-break sticks immediately.
    assert_eq!(trace.steps.len(), 1);
    let step = &trace.steps[0];
    assert_eq!(step.state, state);
    assert_eq!(step.action, Action::Stick);
    assert_eq!(step.reward, expected_reward);
    assert_eq!(step.old_value, 0.0);
    assert_eq!(step.new_value, expected_reward);
    assert_eq!(run.rewards_history, vec![expected_reward]);
    assert_eq!(run.q_table.get(&state, Action::Stick), expected_reward);
}

fn stacked_rounds(rounds: usize) -> BlackjackEnv<StackedDeck> {
    // Dealer Ten + Seven stands on 17; player Ten + Nine sticks on 19.
    let script = [Card::Ten, Card::Seven, Card::Ten, Card::Nine];
    let cards = std::iter::repeat_n(script, rounds).flatten();
    BlackjackEnv::with_deck(StackedDeck::new(cards, Some(0)))
}

fn stacked_traces(bootstrap: TerminalBootstrap) -> Vec<EpisodeTrace> {
    let config = TrainingConfig {
        terminal_bootstrap: bootstrap,
        ..deterministic_config(2)
    };
    let mut agent = config.build_agent();
    let mut env = stacked_rounds(2);
    let mut pipeline = TrainingPipeline::new(config).unwrap();
    pipeline
        .run_with(&mut env, &mut agent)
        .unwrap()
        .traces
        .unwrap()
}

#[test]
fn test_stick_bootstraps_from_own_row() {
    let traces = stacked_traces(TerminalBootstrap::Literal);
    let state = State::new(19, 10, false).unwrap();

    let first = &traces[0].steps[0];
    assert_eq!((first.state, first.action, first.reward), (state, Action::Stick, 1.0));
    assert_eq!((first.old_value, first.new_value), (0.0, 1.0));

    // The terminal observation after a stick is the same state, so its own
    // value feeds back into the target: 1 + 1 * max(1, 0).
    let second = &traces[1].steps[0];
    assert_eq!((second.old_value, second.new_value), (1.0, 2.0));
    assert_eq!(
        second.to_string(),
        "State: Player sum=19, Dealer card=10, Usable Ace=false | Action: Stick | \
         Reward: 1 | Q-value updated: 1.000 → 2.000"
    );
}

#[test]
fn test_zero_bootstrap_ignores_terminal_state() {
    let traces = stacked_traces(TerminalBootstrap::Zero);
    let second = &traces[1].steps[0];
    assert_eq!((second.old_value, second.new_value), (1.0, 1.0));
}

#[test]
fn test_progress_callbacks() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let started = Arc::new(Mutex::new(None));
    let recorder = ProgressRecorder {
        calls: Arc::clone(&calls),
        started: Arc::clone(&started),
    };
    let config = TrainingConfig {
        episodes: 250,
        seed: Some(5),
        ..TrainingConfig::default()
    };
    let mut pipeline = TrainingPipeline::new(config.clone())
        .unwrap()
        .with_observer(Box::new(recorder));
    let observed = pipeline.run().unwrap();

    assert_eq!(*started.lock().unwrap(), Some(250));
    let calls = calls.lock().unwrap();
    // Every 2 episodes (250 / 100), the last of which is the final episode.
    assert_eq!(calls.len(), 125);
    assert_eq!(calls.first(), Some(&(2, 250)));
    assert_eq!(calls.last(), Some(&(250, 250)));

    // Observers do not change what is learned.
    let plain = train(&config).unwrap();
    assert_eq!(observed.rewards_history, plain.rewards_history);
    assert_eq!(observed.q_table, plain.q_table);
}

#[test]
fn test_progress_for_short_runs() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = ProgressRecorder {
        calls: Arc::clone(&calls),
        started: Arc::new(Mutex::new(None)),
    };
    let config = TrainingConfig {
        episodes: 7,
        seed: Some(5),
        ..TrainingConfig::default()
    };
    TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(recorder))
        .run()
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 7);
    assert_eq!(calls.last(), Some(&(7, 7)));
}

#[test]
fn test_jsonl_observer_writes_one_line_per_episode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("episodes.jsonl");
    let config = TrainingConfig {
        episodes: 12,
        seed: Some(8),
        ..TrainingConfig::default()
    };
    let mut pipeline = TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(JsonlObserver::new(&path).unwrap()));
    let run = pipeline.run().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let traces: Vec<EpisodeTrace> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(traces.len(), 12);
    for (trace, reward) in traces.iter().zip(&run.rewards_history) {
        assert_eq!(trace.total_reward, *reward);
        assert!(!trace.steps.is_empty());
        assert!(trace.steps.iter().all(|step| step.step < trace.steps.len()));
    }
    assert_eq!(traces[3].episode, 3);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = TrainingConfig {
        episodes: 42,
        epsilon: 0.25,
        seed: Some(1),
        terminal_bootstrap: TerminalBootstrap::Zero,
        ..TrainingConfig::default()
    };
    config.save(&path).unwrap();
    assert_eq!(TrainingConfig::load(&path).unwrap(), config);

    std::fs::write(&path, r#"{"episodes": 10}"#).unwrap();
    let partial = TrainingConfig::load(&path).unwrap();
    assert_eq!(partial.episodes, 10);
    assert_eq!(partial.learning_rate, 0.1);
}
