//! Output formatting for CLI reports

use crate::{
    analysis::PolicyGrid,
    pipeline::{EvaluationResult, TrainingSummary},
    q_learning::QTable,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a count together with its share of the total
pub fn format_count(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

pub fn print_training_summary(summary: &TrainingSummary) {
    print_stats_table(&[
        ("Episodes", format_number(summary.total_episodes)),
        ("Wins", format_count(summary.wins, summary.win_rate)),
        ("Draws", format_count(summary.draws, summary.draw_rate)),
        ("Losses", format_count(summary.losses, summary.loss_rate)),
        ("Average reward", format!("{:.4}", summary.mean_reward)),
        ("Recent avg reward", format!("{:.4}", summary.recent_mean_reward)),
    ]);
}

pub fn print_evaluation(result: &EvaluationResult) {
    print_stats_table(&[
        ("Rounds", format_number(result.total_rounds)),
        ("Wins", format_count(result.wins, result.win_rate)),
        ("Draws", format_count(result.draws, result.draw_rate)),
        ("Losses", format_count(result.losses, result.loss_rate)),
    ]);
}

/// Print action values for player sums 12-21, one block per ace flag
pub fn print_q_table(table: &QTable) {
    for usable_ace in [false, true] {
        print_subsection(if usable_ace {
            "Q-values (usable ace)"
        } else {
            "Q-values (no usable ace)"
        });
        println!("  {:>3} {:>6} {:>9} {:>9}  greedy", "sum", "dealer", "stick", "hit");
        for (state, [stick, hit]) in table
            .display_rows()
            .filter(|(state, _)| state.usable_ace() == usable_ace)
        {
            println!(
                "  {:>3} {:>6} {:>9.4} {:>9.4}  {}",
                state.player_sum(),
                state.dealer_card(),
                stick,
                hit,
                table.greedy_action(&state)
            );
        }
    }
}

/// Print the greedy Hit/Stick chart for both ace flags
pub fn print_policy(table: &QTable) {
    for usable_ace in [false, true] {
        let grid = PolicyGrid::from_table(table, usable_ace);
        println!();
        print!("{grid}");
        let cells: usize = grid.rows.iter().map(|row| row.actions.len()).sum();
        println!("  hit in {} of {cells} cells", grid.hit_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(2500, 0.4321), "2,500 (43.2%)");
    }
}
