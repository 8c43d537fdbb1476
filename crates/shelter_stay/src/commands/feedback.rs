//! Feedback command - predicts, records the user's verdict, and summarizes.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use feature_extractor::IntakeForm;
use feedback_store::{FeedbackLog, FeedbackRecord, FeedbackStats};
use intake_structs::FeedbackLabel;
use tracing::info;

use super::predict::{self, Estimator};
use super::stats;
use crate::report;

/// Predicts for `form`, appends the verdict to the log and returns the
/// refreshed statistics. Returns `Ok(None)` when the form was rejected.
///
/// # Errors
///
/// Returns an error if prediction fails or the log cannot be written or read.
pub fn record(
    model: &impl Estimator,
    log: &FeedbackLog,
    form: &IntakeForm,
    label: FeedbackLabel,
    real_days: Option<f64>,
    timestamp: NaiveDateTime,
) -> Result<Option<FeedbackStats>> {
    let Some(estimate) = predict::estimate(model, form)? else {
        return Ok(None);
    };

    println!(
        "{}",
        report::render_prediction(model.name(), &estimate.prediction, &estimate.record)
    );

    let entry = FeedbackRecord {
        timestamp,
        features: estimate.record,
        predicted_days: estimate.prediction.days,
        label,
        real_days,
    };
    log.append(&entry)
        .with_context(|| format!("Failed to append to {}", log.path().display()))?;

    info!(label = %label, real_days, "Feedback recorded");

    stats::summarize(log).map(Some)
}

/// Runs the feedback command.
///
/// # Errors
///
/// Returns an error if prediction, the log or a chart fails.
pub fn run(
    model: &impl Estimator,
    log: &FeedbackLog,
    form: &IntakeForm,
    label: FeedbackLabel,
    real_days: Option<f64>,
    plots_dir: Option<&Path>,
) -> Result<()> {
    let now = Local::now().naive_local();
    if let Some(summary) = record(model, log, form, label, real_days, now)? {
        println!("¡Gracias por tu feedback!");
        stats::show(&summary, plots_dir)?;
    }

    Ok(())
}
