use crate::Choice;

/// Catch-all breed token for anything outside [`TOP_BREEDS`].
pub const OTHER_BREED: &str = "Other";

/// The most frequent breeds seen during training, in widget order.
///
/// Breeds outside this list were collapsed into [`OTHER_BREED`] before the
/// grouped model was fit.
pub const TOP_BREEDS: [&str; 25] = [
    "Domestic Shorthair Mix",
    "Pit Bull Mix",
    "Labrador Retriever Mix",
    "Domestic Shorthair",
    "Chihuahua Shorthair Mix",
    "German Shepherd Mix",
    "Domestic Medium Hair Mix",
    "Australian Cattle Dog Mix",
    "Domestic Longhair Mix",
    "Siamese Mix",
    "Pit Bull",
    "Border Collie Mix",
    "Dachshund Mix",
    "Boxer Mix",
    "Labrador Retriever",
    "German Shepherd",
    "Chihuahua Shorthair",
    "Staffordshire Mix",
    "Catahoula Mix",
    "Domestic Medium Hair",
    "Siberian Husky Mix",
    "Pointer Mix",
    "Australian Shepherd Mix",
    "Beagle Mix",
    "Miniature Poodle Mix",
];

/// Returns the grouped breed choices: `Other` first, then [`TOP_BREEDS`].
#[must_use]
pub fn grouped_breeds() -> Vec<&'static str> {
    core::iter::once(OTHER_BREED).chain(TOP_BREEDS).collect()
}

/// Returns true if `breed` is one of the grouped breed choices.
#[must_use]
pub fn is_grouped_breed(breed: &str) -> bool {
    breed == OTHER_BREED || TOP_BREEDS.contains(&breed)
}

/// Purebred or mixed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
pub enum BreedType {
    #[strum(to_string = "Raza pura")]
    Purebred,
    #[default]
    #[strum(to_string = "Mestizo")]
    Mix,
}

impl Choice for BreedType {
    fn model_token(self) -> &'static str {
        match self {
            Self::Purebred => "purebred",
            Self::Mix => "mix",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_breeds() {
        let breeds = grouped_breeds();
        assert_eq!(breeds.len(), 26);
        assert_eq!(breeds[0], "Other");
        assert!(is_grouped_breed("Beagle Mix"));
        assert!(is_grouped_breed("Other"));
        assert!(!is_grouped_breed("Beagle"));
        assert!(!is_grouped_breed(""));
    }
}
