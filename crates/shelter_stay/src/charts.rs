//! SVG charts of the feedback log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use feedback_store::{DEFAULT_HISTOGRAM_BINS, FeedbackStats};
use intake_structs::{Choice, FeedbackLabel};
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::info;

/// File name of the label distribution chart.
pub const LABELS_CHART: &str = "feedback_labels.svg";

/// File name of the real days histogram.
pub const REAL_DAYS_CHART: &str = "real_days_histogram.svg";

const SIZE: (u32, u32) = (640, 480);

/// Writes every chart that has data into `dir`, returning their paths.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a chart fails to
/// render.
pub fn write_charts(stats: &FeedbackStats, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create plots directory {}", dir.display()))?;

    let mut written = Vec::new();

    if stats.count > 0 {
        let path = dir.join(LABELS_CHART);
        draw_label_pie(stats, &path)?;
        written.push(path);
    }

    if !stats.real_days.is_empty() {
        let path = dir.join(REAL_DAYS_CHART);
        draw_real_days_histogram(stats, &path)?;
        written.push(path);
    }

    for path in &written {
        info!(path = %path.display(), "Wrote chart");
    }

    Ok(written)
}

fn draw_label_pie(stats: &FeedbackStats, path: &Path) -> Result<()> {
    let slices: Vec<_> = stats
        .label_counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| {
            (
                *n as f64,
                label_color(*label),
                format!("{} ({:.1}%)", label.model_token(), stats.percentage(*label)),
            )
        })
        .collect();

    let sizes: Vec<f64> = slices.iter().map(|s| s.0).collect();
    let colors: Vec<RGBColor> = slices.iter().map(|s| s.1).collect();
    let labels: Vec<&str> = slices.iter().map(|s| s.2.as_str()).collect();

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Distribución del feedback", ("sans-serif", 20))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 14).into_font());
    root.draw(&pie)?;
    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

const fn label_color(label: FeedbackLabel) -> RGBColor {
    match label {
        FeedbackLabel::Exact => RGBColor(76, 175, 80),
        FeedbackLabel::Approximate => RGBColor(255, 193, 7),
        FeedbackLabel::Wrong => RGBColor(244, 67, 54),
    }
}

fn draw_real_days_histogram(stats: &FeedbackStats, path: &Path) -> Result<()> {
    let bins = stats.histogram(DEFAULT_HISTOGRAM_BINS);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Días reales hasta la adopción", ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(first.start..last.end, 0f64..y_max * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Días")
        .y_desc("Animales")
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use feature_extractor::FeatureRecord;
    use feedback_store::FeedbackRecord;
    use tempfile::TempDir;

    use super::*;

    fn stats(rows: &[(FeedbackLabel, Option<f64>)]) -> FeedbackStats {
        let records: Vec<_> = rows
            .iter()
            .map(|&(label, real_days)| FeedbackRecord {
                timestamp: NaiveDateTime::default(),
                features: FeatureRecord::new(),
                predicted_days: 15.0,
                label,
                real_days,
            })
            .collect();
        FeedbackStats::compute(&records)
    }

    #[test]
    fn test_no_feedback_no_charts() {
        let dir = TempDir::new().unwrap();
        let written = write_charts(&stats(&[]), dir.path()).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_labels_without_real_days() {
        let dir = TempDir::new().unwrap();
        let written = write_charts(
            &stats(&[(FeedbackLabel::Exact, None), (FeedbackLabel::Wrong, None)]),
            dir.path(),
        )
        .unwrap();

        assert_eq!(written, vec![dir.path().join(LABELS_CHART)]);
        let svg = std::fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_both_charts() {
        let dir = TempDir::new().unwrap();
        let plots = dir.path().join("plots");
        let written = write_charts(
            &stats(&[
                (FeedbackLabel::Exact, Some(12.0)),
                (FeedbackLabel::Approximate, Some(30.0)),
                (FeedbackLabel::Wrong, Some(90.0)),
            ]),
            &plots,
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
    }
}
