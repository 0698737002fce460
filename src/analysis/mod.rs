//! Analysis of training runs and learned policies
//!
//! - Convergence curves over the per-episode reward history
//! - Greedy policy grids read off a trained Q-table

pub mod convergence;
pub mod policy;

pub use convergence::{moving_average, running_average};
pub use policy::{PolicyGrid, PolicyGridRow};
