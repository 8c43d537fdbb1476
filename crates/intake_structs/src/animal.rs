use crate::Choice;

/// Species of the animal.
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
pub enum AnimalType {
    #[default]
    #[strum(to_string = "Perro")]
    Dog,
    #[strum(to_string = "Gato")]
    Cat,
    #[strum(to_string = "Conejo")]
    Rabbit,
    #[strum(to_string = "Ave")]
    Bird,
    #[strum(to_string = "Otro")]
    Other,
}

impl AnimalType {
    /// Returns true for the species the shelter models were trained on.
    #[must_use]
    pub const fn is_dog_or_cat(self) -> bool {
        matches!(self, Self::Dog | Self::Cat)
    }
}

impl Choice for AnimalType {
    fn model_token(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rabbit => "Rabbit",
            Self::Bird => "Bird",
            Self::Other => "Other",
        }
    }
}

/// Sex and sterilization status.
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
pub enum Sex {
    #[default]
    #[strum(to_string = "Macho entero (no esterilizado)")]
    IntactMale,
    #[strum(to_string = "Hembra entera (no esterilizada)")]
    IntactFemale,
    #[strum(to_string = "Macho castrado")]
    NeuteredMale,
    #[strum(to_string = "Hembra esterilizada")]
    SpayedFemale,
}

impl Choice for Sex {
    fn model_token(self) -> &'static str {
        match self {
            Self::IntactMale => "Intact Male",
            Self::IntactFemale => "Intact Female",
            Self::NeuteredMale => "Neutered Male",
            Self::SpayedFemale => "Spayed Female",
        }
    }
}

/// Coarse age bucket derived from the age in months.
///
/// Labels double as model tokens: the models were trained on the Spanish
/// bucket names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
pub enum AgeGroup {
    #[strum(to_string = "Cachorro (<6m)")]
    Puppy,
    #[strum(to_string = "Joven (6m-1a)")]
    Young,
    #[strum(to_string = "Adulto joven (1-3a)")]
    YoungAdult,
    #[strum(to_string = "Adulto (3-7a)")]
    Adult,
    #[strum(to_string = "Senior (>7a)")]
    Senior,
}

impl AgeGroup {
    /// Buckets an age in months. Boundaries belong to the older bucket.
    #[must_use]
    pub const fn from_months(months: u32) -> Self {
        match months {
            0..6 => Self::Puppy,
            6..12 => Self::Young,
            12..36 => Self::YoungAdult,
            36..84 => Self::Adult,
            _ => Self::Senior,
        }
    }
}

impl Choice for AgeGroup {
    fn model_token(self) -> &'static str {
        match self {
            Self::Puppy => "Cachorro (<6m)",
            Self::Young => "Joven (6m-1a)",
            Self::YoungAdult => "Adulto joven (1-3a)",
            Self::Adult => "Adulto (3-7a)",
            Self::Senior => "Senior (>7a)",
        }
    }
}

/// Size class derived from species and weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
pub enum SizeClass {
    #[strum(to_string = "Pequeño")]
    Small,
    #[strum(to_string = "Mediano")]
    Medium,
    #[strum(to_string = "Grande")]
    Large,
}

impl SizeClass {
    /// Dogs under 10 kg are small, under 25 kg medium, large otherwise.
    /// Every other species is medium.
    #[must_use]
    pub fn from_weight(animal: AnimalType, weight_kg: f64) -> Self {
        match animal {
            AnimalType::Dog if weight_kg < 10.0 => Self::Small,
            AnimalType::Dog if weight_kg < 25.0 => Self::Medium,
            AnimalType::Dog => Self::Large,
            _ => Self::Medium,
        }
    }
}

impl Choice for SizeClass {
    fn model_token(self) -> &'static str {
        match self {
            Self::Small => "Pequeño",
            Self::Medium => "Mediano",
            Self::Large => "Grande",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_months(0), AgeGroup::Puppy);
        assert_eq!(AgeGroup::from_months(5), AgeGroup::Puppy);
        assert_eq!(AgeGroup::from_months(6), AgeGroup::Young);
        assert_eq!(AgeGroup::from_months(12), AgeGroup::YoungAdult);
        assert_eq!(AgeGroup::from_months(36), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_months(84), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_months(240), AgeGroup::Senior);
    }

    #[test]
    fn test_age_group_labels() {
        assert_eq!(AgeGroup::from_months(5).to_string(), "Cachorro (<6m)");
        assert_eq!(AgeGroup::from_months(6).to_string(), "Joven (6m-1a)");
        assert_eq!(AgeGroup::from_months(12).to_string(), "Adulto joven (1-3a)");
        assert_eq!(AgeGroup::from_months(36).to_string(), "Adulto (3-7a)");
        assert_eq!(AgeGroup::from_months(84).to_string(), "Senior (>7a)");
    }

    #[test]
    fn test_size_from_weight() {
        assert_eq!(SizeClass::from_weight(AnimalType::Dog, 9.0), SizeClass::Small);
        assert_eq!(SizeClass::from_weight(AnimalType::Dog, 9.9), SizeClass::Small);
        assert_eq!(SizeClass::from_weight(AnimalType::Dog, 10.0), SizeClass::Medium);
        assert_eq!(SizeClass::from_weight(AnimalType::Dog, 24.9), SizeClass::Medium);
        assert_eq!(SizeClass::from_weight(AnimalType::Dog, 25.0), SizeClass::Large);
        assert_eq!(SizeClass::from_weight(AnimalType::Cat, 2.0), SizeClass::Medium);
        assert_eq!(SizeClass::from_weight(AnimalType::Cat, 60.0), SizeClass::Medium);
        assert_eq!(SizeClass::Small.to_string(), "Pequeño");
    }

    #[test]
    fn test_species_labels() {
        assert_eq!(AnimalType::Dog.to_string(), "Perro");
        assert_eq!(AnimalType::Cat.model_token(), "Cat");
        assert!(!AnimalType::Rabbit.is_dog_or_cat());
    }
}
