//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events, allowing
//! composable data collection (progress bars, metrics, JSONL traces) without
//! coupling the training loop to any output format. Observers only see
//! copies of what happened; they cannot alter the update order or the table.

use crate::{Result, blackjack::GameOutcome, pipeline::trace::StepRecord};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(episode, record)` - After each transition and its update
///    - `on_episode_end(episode, total_reward, outcome)`
///    - `on_progress(completed, total)` - Every `max(total / 100, 1)` episodes
///      and after the final one
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use blackjack_rl::{blackjack::GameOutcome, ports::Observer};
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _total_reward: f64,
///         outcome: GameOutcome,
///     ) -> blackjack_rl::Result<()> {
///         if outcome == GameOutcome::Win {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (0-based index).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each transition once the value update has been applied.
    fn on_step(&mut self, _episode: usize, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches its terminal transition.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _total_reward: f64,
        _outcome: GameOutcome,
    ) -> Result<()> {
        Ok(())
    }

    /// Periodic progress checkpoint.
    ///
    /// # Parameters
    ///
    /// * `completed` - Episodes finished so far
    /// * `total` - Episodes in the run
    fn on_progress(&mut self, _completed: usize, _total: usize) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
