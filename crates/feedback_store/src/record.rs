use chrono::NaiveDateTime;
use feature_extractor::FeatureRecord;
use intake_structs::{Choice, FeedbackLabel};

/// Column holding the submission time.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Column holding the displayed prediction, in days.
pub const PREDICTED_COLUMN: &str = "prediccion_dias";
/// Column holding the feedback label.
pub const LABEL_COLUMN: &str = "feedback";
/// Column holding the real number of days, empty when unknown.
pub const REAL_COLUMN: &str = "dias_reales";

/// Timestamp format used in the log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the feedback log.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub timestamp: NaiveDateTime,
    pub features: FeatureRecord,
    pub predicted_days: f64,
    pub label: FeedbackLabel,
    pub real_days: Option<f64>,
}

impl FeedbackRecord {
    /// Column names for a log holding records like this one.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        header_for(self.features.names())
    }

    /// The row as written to the log.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(self.features.len() + 4);
        row.push(self.timestamp.format(TIMESTAMP_FORMAT).to_string());
        row.extend(self.features.iter().map(|(_, value)| value.to_string()));
        row.push(self.predicted_days.to_string());
        row.push(self.label.model_token().to_string());
        row.push(self.real_days.map(|d| d.to_string()).unwrap_or_default());
        row
    }

    /// Absolute error between prediction and reality, when reality is known.
    #[must_use]
    pub fn abs_error(&self) -> Option<f64> {
        self.real_days.map(|real| (real - self.predicted_days).abs())
    }
}

/// Builds the log header for the given feature names.
pub fn header_for<'a>(feature_names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    core::iter::once(TIMESTAMP_COLUMN)
        .chain(feature_names)
        .chain([PREDICTED_COLUMN, LABEL_COLUMN, REAL_COLUMN])
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record() -> FeedbackRecord {
        FeedbackRecord {
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            features: FeatureRecord::new()
                .with("AnimalType", "Dog")
                .with("AgeInDays", 365_u32),
            predicted_days: 21.5,
            label: FeedbackLabel::Approximate,
            real_days: None,
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(
            record().header(),
            vec![
                "timestamp",
                "AnimalType",
                "AgeInDays",
                "prediccion_dias",
                "feedback",
                "dias_reales"
            ]
        );
    }

    #[test]
    fn test_row() {
        assert_eq!(
            record().to_row(),
            vec!["2026-03-01 10:30:00", "Dog", "365", "21.5", "Aproximada", ""]
        );
    }

    #[test]
    fn test_abs_error() {
        let mut r = record();
        assert_eq!(r.abs_error(), None);
        r.real_days = Some(30.0);
        assert_eq!(r.abs_error(), Some(8.5));
    }
}
