//! Turning raw model output into displayed days.

use feature_extractor::SchemaVersion;
use serde::{Deserialize, Serialize};

/// Displayed estimates never go below one day.
pub const MIN_DAYS: f64 = 1.0;

/// How the model's target was scaled during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TargetTransform {
    /// The model predicts days directly.
    Identity,
    /// The model predicts `ln(1 + days)`.
    #[serde(rename = "log1p")]
    #[strum(to_string = "log1p")]
    Log1p,
}

impl TargetTransform {
    /// Maps a raw prediction back to days.
    #[must_use]
    pub fn inverse(self, raw: f64) -> f64 {
        match self {
            Self::Identity => raw,
            Self::Log1p => raw.exp_m1(),
        }
    }
}

/// Display-only uncertainty band around the point estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayBand {
    /// `[max(0, d - days), d + days]`
    Fixed { days: f64 },
    /// `[max(1, low * d), high * d]`
    Multiplicative { low: f64, high: f64 },
}

impl DisplayBand {
    /// Returns the `(min, max)` range shown next to `days`.
    #[must_use]
    pub fn bounds(self, days: f64) -> (f64, f64) {
        match self {
            Self::Fixed { days: offset } => ((days - offset).max(0.0), days + offset),
            Self::Multiplicative { low, high } => ((days * low).max(MIN_DAYS), days * high),
        }
    }
}

/// Output transform and band tied to one schema.
///
/// A model artifact is only meaningful together with the transform it was
/// trained with, so both travel with the schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelProfile {
    pub schema: SchemaVersion,
    pub transform: TargetTransform,
    pub band: DisplayBand,
}

impl ModelProfile {
    /// The profile every artifact of `schema` must follow.
    #[must_use]
    pub const fn for_schema(schema: SchemaVersion) -> Self {
        match schema {
            SchemaVersion::BasicV1 | SchemaVersion::ExtendedV2 => Self {
                schema,
                transform: TargetTransform::Identity,
                band: DisplayBand::Fixed { days: 5.0 },
            },
            SchemaVersion::GroupedV3 => Self {
                schema,
                transform: TargetTransform::Log1p,
                band: DisplayBand::Multiplicative {
                    low: 0.6,
                    high: 1.4,
                },
            },
        }
    }
}

/// A single estimate of days in the shelter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// What the model returned, before any transform.
    pub raw: f64,
    /// Estimated days, rounded to one decimal and floored at [`MIN_DAYS`].
    pub days: f64,
    pub low: f64,
    pub high: f64,
}

impl Prediction {
    /// Applies the profile's transform, rounding, floor and band.
    #[must_use]
    pub fn from_raw(raw: f64, profile: &ModelProfile) -> Self {
        let days = round_to_tenth(profile.transform.inverse(raw)).max(MIN_DAYS);
        let (low, high) = profile.band.bounds(days);

        Self {
            raw,
            days,
            low,
            high,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
