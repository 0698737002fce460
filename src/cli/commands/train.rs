//! Train command - Train a Q-learning agent and evaluate its greedy policy

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::evaluation_seed;
use crate::{
    analysis::moving_average,
    cli::{
        config::{CommonArgs, TrainingArgs},
        output::{
            format_number, print_evaluation, print_kv, print_policy, print_q_table,
            print_section, print_subsection, print_training_summary,
        },
    },
    export::{write_q_table, write_reward_curve},
    pipeline::{
        EpisodeTrace, EvaluationResult, JsonlObserver, MetricsObserver, MetricsSummary,
        ProgressObserver, TrainingConfig, TrainingPipeline, TrainingSummary, evaluate,
    },
};

/// Default number of greedy evaluation rounds
pub const DEFAULT_EVAL_ROUNDS: usize = 1000;

/// Window for the trailing reward average in the convergence report
const RECENT_WINDOW: usize = 100;

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    config: TrainingConfig,
    training: TrainingSummary,
    evaluation: EvaluationResult,
    metrics: MetricsSummary,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of greedy evaluation rounds after training
    #[arg(long, default_value_t = DEFAULT_EVAL_ROUNDS)]
    pub eval_rounds: usize,

    /// Print Q-values for player sums 12-21 and the greedy policy chart
    #[arg(long)]
    pub show_table: bool,

    /// Print the step-by-step updates of the first N episodes
    #[arg(long, default_value_t = 0)]
    pub show_episodes: usize,

    /// Optional file for JSONL episode traces
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional CSV file for the per-episode reward curve
    #[arg(long)]
    pub rewards_csv: Option<PathBuf>,

    /// Optional CSV file for the Q-values of player sums 12-21
    #[arg(long)]
    pub table_csv: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut config = args
        .training
        .resolve()
        .context("invalid training configuration")?;
    config.record_traces = args.show_episodes > 0;

    let summary_path = args.summary.as_deref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        if sanitized != raw {
            println!("Summary path normalized to {}", sanitized.display());
        }
        sanitized
    });

    let metrics = MetricsObserver::new();
    let metrics_handle = metrics.handle();
    let mut pipeline = TrainingPipeline::new(config.clone())?.with_observer(Box::new(metrics));
    if args.common.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        ensure_parent(path)?;
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let run = pipeline.run()?;

    print_section("Training Results");
    print_kv("Learning rate", &config.learning_rate.to_string());
    print_kv("Discount factor", &config.discount_factor.to_string());
    print_kv("Exploration rate", &config.epsilon.to_string());
    print_kv("Terminal bootstrap", &config.terminal_bootstrap.to_string());
    print_training_summary(&run.summary);

    let metrics_summary = metrics_handle.summary();
    print_subsection("Convergence");
    print_kv(
        "Final avg reward",
        &format!("{:.4}", run.summary.mean_reward),
    );
    if let Some(recent) = moving_average(&run.rewards_history, RECENT_WINDOW).last() {
        print_kv(
            &format!("Last {RECENT_WINDOW} avg"),
            &format!("{recent:.4}"),
        );
    }
    print_kv("Steps", &format_number(metrics_summary.total_steps));
    print_kv(
        "Avg episode length",
        &format!("{:.2}", metrics_summary.avg_episode_length),
    );
    print_kv(
        "Hit fraction",
        &format!("{:.1}%", metrics_summary.hit_fraction * 100.0),
    );
    print_kv("Visited entries", &format_number(run.q_table.nonzero_entries()));

    let evaluation = evaluate(&run.q_table, args.eval_rounds, evaluation_seed(config.seed))?;
    print_section(&format!(
        "Final Evaluation Results ({} rounds)",
        format_number(args.eval_rounds)
    ));
    print_evaluation(&evaluation);

    if args.show_table {
        print_section("Q-table");
        print_q_table(&run.q_table);
        print_policy(&run.q_table);
    }

    if let Some(traces) = &run.traces {
        print_episode_traces(traces, args.show_episodes);
    }

    if let Some(path) = &args.rewards_csv {
        ensure_parent(path)?;
        let rows = write_reward_curve(path, &run.rewards_history)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nReward curve ({rows} rows) written to {}", path.display());
    }

    if let Some(path) = &args.table_csv {
        ensure_parent(path)?;
        let rows = write_q_table(path, &run.q_table)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Q-table ({rows} rows) written to {}", path.display());
    }

    if let Some(path) = summary_path {
        ensure_parent(&path)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        to_writer_pretty(
            file,
            &TrainingSummaryFile {
                config,
                training: run.summary.clone(),
                evaluation,
                metrics: metrics_summary,
            },
        )?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_episode_traces(traces: &[EpisodeTrace], limit: usize) {
    for trace in traces.iter().take(limit) {
        print_subsection(&format!(
            "Episode {} (reward {}, {})",
            trace.episode + 1,
            trace.total_reward,
            trace.outcome
        ));
        for record in &trace.steps {
            println!("  {record}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.txt")),
            PathBuf::from("out/run.json")
        );
    }

    #[test]
    fn test_default_arguments() {
        let args = TrainArgs::parse_from(["blackjack-train"]);
        assert_eq!(args.eval_rounds, DEFAULT_EVAL_ROUNDS);
        assert_eq!(args.show_episodes, 0);
        assert!(args.common.progress);
        assert!(!args.common.verbose);
        assert!(args.training.episodes.is_none());
    }

    #[test]
    fn test_flag_parsing() {
        let args = TrainArgs::parse_from([
            "blackjack-train",
            "--episodes",
            "10",
            "--alpha",
            "0.5",
            "--terminal-bootstrap",
            "zero",
            "--no-progress",
        ]);
        assert_eq!(args.training.episodes, Some(10));
        assert_eq!(args.training.learning_rate, Some(0.5));
        assert_eq!(
            args.training.terminal_bootstrap,
            Some(crate::q_learning::TerminalBootstrap::Zero)
        );
        assert!(!args.common.progress);
    }
}
