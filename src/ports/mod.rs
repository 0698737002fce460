//! Ports (trait boundaries) between the learning core and its collaborators.
//!
//! The training pipeline only talks to environments, learners and observers
//! through these traits, so the Blackjack simulator, the Q-learning agent
//! and the progress/metrics adapters can each be swapped independently.

pub mod environment;
pub mod learner;
pub mod observer;

pub use environment::Environment;
pub use learner::Learner;
pub use observer::Observer;
