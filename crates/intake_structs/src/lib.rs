//! Shared vocabulary for shelter intake forms.
//!
//! Every enum here is a single-select widget: its `Display` is the Spanish
//! label shown to the user and `model_token` is the exact spelling the
//! trained models saw.

use core::fmt::Display;

use strum::IntoEnumIterator;

mod animal;
mod breed;
mod color;
mod feedback;
mod intake;

pub use animal::*;
pub use breed::*;
pub use color::*;
pub use feedback::*;
pub use intake::*;

/// A closed set of user-facing choices backed by model tokens.
pub trait Choice: IntoEnumIterator + Display + Copy {
    /// The token the model was trained on.
    fn model_token(self) -> &'static str;

    /// Looks up a choice by its localized label or its model token.
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::iter().find(|c| c.to_string() == label || c.model_token() == label)
    }

    /// All localized labels, in widget order.
    fn labels() -> Vec<String> {
        Self::iter().map(|c| c.to_string()).collect()
    }

    /// All model tokens, in widget order.
    fn model_tokens() -> Vec<&'static str> {
        Self::iter().map(Self::model_token).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_accepts_label_and_token() {
        assert_eq!(AnimalType::from_label("Perro"), Some(AnimalType::Dog));
        assert_eq!(AnimalType::from_label("Dog"), Some(AnimalType::Dog));
        assert_eq!(Sex::from_label(" Hembra esterilizada "), Some(Sex::SpayedFemale));
        assert_eq!(Sex::from_label("Hermaphrodite"), None);
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut tokens = IntakeCondition::model_tokens();
        let before = tokens.len();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), before);
    }
}
