//! Stats command - summarizes the feedback log.

use std::path::Path;

use anyhow::{Context, Result};
use feedback_store::{FeedbackLog, FeedbackStats};
use tracing::info;

use crate::{charts, report};

/// Reads the whole log and computes its statistics.
///
/// # Errors
///
/// Returns an error if the log cannot be read.
pub fn summarize(log: &FeedbackLog) -> Result<FeedbackStats> {
    let records = log
        .read_all()
        .with_context(|| format!("Failed to read feedback log {}", log.path().display()))?;
    let stats = FeedbackStats::compute(&records);

    info!(
        path = %log.path().display(),
        count = stats.count,
        "Loaded feedback"
    );

    Ok(stats)
}

/// Prints the statistics and, when `plots_dir` is given, writes the charts.
///
/// # Errors
///
/// Returns an error if a chart cannot be written.
pub fn show(stats: &FeedbackStats, plots_dir: Option<&Path>) -> Result<()> {
    println!("{}", report::render_stats(stats));

    if let Some(dir) = plots_dir {
        for path in charts::write_charts(stats, dir)? {
            println!("Gráfico guardado en {}", path.display());
        }
    }

    Ok(())
}

/// Runs the stats command.
///
/// # Errors
///
/// Returns an error if the log cannot be read or a chart cannot be written.
pub fn run(log: &FeedbackLog, plots_dir: Option<&Path>) -> Result<()> {
    let stats = summarize(log)?;
    show(&stats, plots_dir)
}
