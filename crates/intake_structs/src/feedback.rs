use core::str::FromStr;

use crate::Choice;

/// Whether a prediction matched what actually happened.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    clap::ValueEnum,
)]
pub enum FeedbackLabel {
    #[strum(to_string = "Sí")]
    #[value(name = "si")]
    Exact,
    #[strum(to_string = "Aproximada")]
    #[value(name = "aproximada")]
    Approximate,
    #[strum(to_string = "No")]
    #[value(name = "no")]
    Wrong,
}

impl Choice for FeedbackLabel {
    fn model_token(self) -> &'static str {
        match self {
            Self::Exact => "Sí",
            Self::Approximate => "Aproximada",
            Self::Wrong => "No",
        }
    }
}

impl FromStr for FeedbackLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::from_label(s).ok_or_else(|| anyhow::anyhow!("Invalid feedback label: {s}"))
    }
}
