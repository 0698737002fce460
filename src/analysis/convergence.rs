//! Reward curves for convergence reporting

/// Cumulative mean reward after each episode.
///
/// Entry `i` is the average of `rewards[0..=i]`, the curve the training
/// progress chart plots.
pub fn running_average(rewards: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    rewards
        .iter()
        .enumerate()
        .map(|(i, reward)| {
            total += reward;
            total / (i + 1) as f64
        })
        .collect()
}

/// Mean over a trailing window; early entries average what is available.
///
/// A window of 0 is treated as 1.
pub fn moving_average(rewards: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut total = 0.0;
    rewards
        .iter()
        .enumerate()
        .map(|(i, reward)| {
            total += reward;
            if i >= window {
                total -= rewards[i - window];
            }
            total / (i + 1).min(window) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_average() {
        let curve = running_average(&[1.0, -1.0, 0.0, 1.0]);
        assert_eq!(curve, vec![1.0, 0.0, 0.0, 0.25]);
        assert!(running_average(&[]).is_empty());
    }

    #[test]
    fn test_moving_average_window() {
        let curve = moving_average(&[1.0, 1.0, -1.0, -1.0], 2);
        assert_eq!(curve, vec![1.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_moving_average_zero_window() {
        let curve = moving_average(&[1.0, -1.0], 0);
        assert_eq!(curve, vec![1.0, -1.0]);
    }
}
