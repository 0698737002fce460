//! CSV writers for reward curves and Q-tables

use std::path::Path;

use serde::Serialize;

use crate::{Result, analysis::running_average, blackjack::Action, q_learning::QTable};

/// One row of the reward curve export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardCurveRecord {
    /// 1-based episode number
    pub episode: usize,
    pub reward: f64,
    pub running_average: f64,
}

/// One row of the Q-table export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QTableRecord {
    pub player_sum: u8,
    pub dealer_card: u8,
    pub usable_ace: bool,
    pub stick: f64,
    pub hit: f64,
    pub greedy: Action,
}

/// Write `episode,reward,running_average` rows. Returns the row count.
pub fn write_reward_curve<P: AsRef<Path>>(path: P, rewards: &[f64]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    let averages = running_average(rewards);
    for (i, (reward, average)) in rewards.iter().zip(averages).enumerate() {
        writer.serialize(RewardCurveRecord {
            episode: i + 1,
            reward: *reward,
            running_average: average,
        })?;
    }
    writer.flush()?;
    Ok(rewards.len())
}

/// Write the display region of `table` (sums 12-21). Returns the row count.
pub fn write_q_table<P: AsRef<Path>>(path: P, table: &QTable) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut count = 0;
    for (state, [stick, hit]) in table.display_rows() {
        writer.serialize(QTableRecord {
            player_sum: state.player_sum(),
            dealer_card: state.dealer_card(),
            usable_ace: state.usable_ace(),
            stick,
            hit,
            greedy: table.greedy_action(&state),
        })?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::q_learning::TerminalBootstrap;

    #[test]
    fn test_reward_curve_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewards.csv");
        let rows = write_reward_curve(&path, &[1.0, -1.0, 0.0]).unwrap();
        assert_eq!(rows, 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("episode,reward,running_average"));
        assert_eq!(lines.next(), Some("1,1.0,1.0"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_q_table_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.csv");
        let table = QTable::new(0.1, 0.95, TerminalBootstrap::Literal);
        let rows = write_q_table(&path, &table).unwrap();
        assert_eq!(rows, 200);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("player_sum,dealer_card,usable_ace,stick,hit,greedy"));
        assert!(contents.contains("12,1,false,0.0,0.0,stick"));
    }
}
