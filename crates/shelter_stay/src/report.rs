//! Text rendering of predictions and feedback statistics.

use core::fmt::Write as _;

use feature_extractor::FeatureRecord;
use feedback_store::{DEFAULT_HISTOGRAM_BINS, FeedbackStats};
use intake_structs::Choice;
use ml_model::Prediction;

/// Estimates at or below this many days are a quick adoption.
pub const FAST_ADOPTION_DAYS: f64 = 14.0;

/// Estimates at or below this many days are a moderate wait.
pub const MODERATE_ADOPTION_DAYS: f64 = 45.0;

const DISCLAIMER: &str = "Esta predicción se basa en un modelo entrenado con datos históricos \
     del Austin Animal Center. La estimación es orientativa y puede variar según factores \
     no recogidos en los datos.";

const HISTOGRAM_WIDTH: usize = 40;

/// Coarse reading of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Outlook {
    #[strum(to_string = "Alta probabilidad de adopción rápida")]
    Fast,
    #[strum(to_string = "Tiempo de adopción moderado")]
    Moderate,
    #[strum(to_string = "Este animal puede necesitar más apoyo para encontrar hogar")]
    NeedsSupport,
}

impl Outlook {
    /// Classifies displayed days.
    #[must_use]
    pub fn from_days(days: f64) -> Self {
        if days <= FAST_ADOPTION_DAYS {
            Self::Fast
        } else if days <= MODERATE_ADOPTION_DAYS {
            Self::Moderate
        } else {
            Self::NeedsSupport
        }
    }

    /// Traffic light marker.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Fast => "[verde]",
            Self::Moderate => "[ámbar]",
            Self::NeedsSupport => "[rojo]",
        }
    }
}

/// Renders an estimate, its band, the outlook and the inputs the model saw.
#[must_use]
pub fn render_prediction(model_name: &str, prediction: &Prediction, record: &FeatureRecord) -> String {
    let outlook = Outlook::from_days(prediction.days);
    let mut out = String::new();

    let _ = writeln!(out, "=== Resultado de la predicción ===");
    let _ = writeln!(out, "{} {outlook}", outlook.marker());
    let _ = writeln!(out);
    let _ = writeln!(out, "  Días estimados: {:.1} días", prediction.days);
    let _ = writeln!(out, "  Rango mínimo:   {:.0} días", prediction.low);
    let _ = writeln!(out, "  Rango máximo:   {:.0} días", prediction.high);
    let _ = writeln!(out, "  Modelo:         {model_name}");
    let _ = writeln!(out);
    out.push_str(&render_inputs(record));
    let _ = writeln!(out);
    out.push_str(DISCLAIMER);

    out
}

/// Two-column table of the submitted features.
#[must_use]
pub fn render_inputs(record: &FeatureRecord) -> String {
    let width = record
        .names()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max("Campo".len());

    let mut out = String::new();
    let _ = writeln!(out, "=== Datos introducidos ===");
    let _ = writeln!(out, "  {:<width$}  Valor", "Campo");
    for (name, value) in record.iter() {
        let _ = writeln!(out, "  {name:<width$}  {value}");
    }

    out
}

/// Renders a blocked-form warning.
#[must_use]
pub fn render_warning(message: &str) -> String {
    format!("Aviso: {message}. No se ha realizado ninguna predicción.")
}

/// Renders the feedback summary and a text histogram of real days.
#[must_use]
pub fn render_stats(stats: &FeedbackStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Feedback recibido ===");
    let _ = writeln!(out, "  Total de respuestas: {}", stats.count);

    if stats.count == 0 {
        let _ = writeln!(out, "  Todavía no hay feedback registrado.");
        return out;
    }

    for (label, n) in &stats.label_counts {
        let _ = writeln!(
            out,
            "  {:<12} {n:>5}  ({:.1}%)",
            label.model_token(),
            stats.percentage(*label)
        );
    }

    match stats.mean_real_days {
        Some(mean) => {
            let _ = writeln!(out, "  Media de días reales: {mean:.1}");
        }
        None => {
            let _ = writeln!(out, "  Sin días reales registrados.");
        }
    }
    if let Some(mae) = stats.mean_abs_error {
        let _ = writeln!(out, "  Error absoluto medio: {mae:.1} días");
    }

    let histogram = stats.histogram(DEFAULT_HISTOGRAM_BINS);
    let peak = histogram.iter().map(|b| b.count).max().unwrap_or(0);
    if peak > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Distribución de días reales ===");
        for bin in &histogram {
            let bar = "#".repeat(bin.count * HISTOGRAM_WIDTH / peak);
            let _ = writeln!(
                out,
                "  {:>7.1} - {:<7.1} | {bar} {}",
                bin.start, bin.end, bin.count
            );
        }
    }

    out
}
