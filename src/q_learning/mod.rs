//! Tabular Q-learning
//!
//! Q-learning is off-policy temporal difference control: after every
//! transition the visited entry moves toward the observed reward plus the
//! discounted best value of the next state.
//!
//! ## Usage Example
//!
//! ```no_run
//! use blackjack_rl::q_learning::{QLearningAgent, TerminalBootstrap};
//!
//! let agent = QLearningAgent::new(
//!     0.1,  // learning_rate
//!     0.95, // discount_factor
//!     0.1,  // epsilon (exploration)
//!     TerminalBootstrap::Literal,
//! )
//! .with_seed(42);
//! ```

pub mod agent;
pub mod q_table;

pub use agent::QLearningAgent;
pub use q_table::{QTable, TABLE_LEN, TerminalBootstrap, all_states};
