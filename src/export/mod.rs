//! Export functionality for training results
//!
//! CSV export of the reward curve and of the Q-table display region, for
//! plotting and inspection outside the tool.

mod csv_export;

pub use csv_export::{QTableRecord, RewardCurveRecord, write_q_table, write_reward_curve};
