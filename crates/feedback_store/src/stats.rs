//! Aggregate statistics over the feedback log.

use intake_structs::FeedbackLabel;
use strum::IntoEnumIterator;

use crate::record::FeedbackRecord;

/// Default number of histogram bins for real days.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// One bar of a histogram: `[start, end)`, the last bar also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Summary of every feedback row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedbackStats {
    pub count: usize,
    /// Count per label, in label order, including zero counts.
    pub label_counts: Vec<(FeedbackLabel, usize)>,
    /// Real days reported by users, in log order.
    pub real_days: Vec<f64>,
    pub mean_real_days: Option<f64>,
    /// Mean absolute error over the rows with a real value.
    pub mean_abs_error: Option<f64>,
}

impl FeedbackStats {
    /// Computes the summary. Runs over the whole log every time.
    #[must_use]
    pub fn compute(records: &[FeedbackRecord]) -> Self {
        let label_counts = FeedbackLabel::iter()
            .map(|label| (label, records.iter().filter(|r| r.label == label).count()))
            .collect();

        let real_days: Vec<f64> = records.iter().filter_map(|r| r.real_days).collect();
        let errors: Vec<f64> = records.iter().filter_map(FeedbackRecord::abs_error).collect();

        Self {
            count: records.len(),
            label_counts,
            mean_real_days: mean(&real_days),
            mean_abs_error: mean(&errors),
            real_days,
        }
    }

    /// Share of rows with `label`, in percent. Zero for an empty log.
    #[must_use]
    pub fn percentage(&self, label: FeedbackLabel) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self
            .label_counts
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |(_, n)| *n);
        n as f64 * 100.0 / self.count as f64
    }

    /// Percentages for every label, in label order.
    #[must_use]
    pub fn percentages(&self) -> Vec<(FeedbackLabel, f64)> {
        FeedbackLabel::iter()
            .map(|label| (label, self.percentage(label)))
            .collect()
    }

    /// Equal-width histogram of the real days.
    #[must_use]
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let bins = bins.max(1);
        let Some(min) = self.real_days.iter().copied().reduce(f64::min) else {
            return Vec::new();
        };
        let max = self.real_days.iter().copied().reduce(f64::max).unwrap_or(min);

        let width = if max > min {
            (max - min) / bins as f64
        } else {
            1.0
        };

        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                start: (i as f64).mul_add(width, min),
                end: ((i + 1) as f64).mul_add(width, min),
                count: 0,
            })
            .collect();

        for value in &self.real_days {
            let idx = (((value - min) / width) as usize).min(bins - 1);
            histogram[idx].count += 1;
        }

        histogram
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
