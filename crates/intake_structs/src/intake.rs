use crate::Choice;

/// How the animal arrived at the shelter.
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
pub enum IntakeType {
    #[default]
    #[strum(to_string = "Callejero (Stray)")]
    Stray,
    #[strum(to_string = "Entregado por dueño")]
    OwnerSurrender,
    #[strum(to_string = "Asistencia pública")]
    PublicAssist,
    #[strum(to_string = "Abandonado")]
    Abandoned,
}

impl Choice for IntakeType {
    fn model_token(self) -> &'static str {
        match self {
            Self::Stray => "Stray",
            Self::OwnerSurrender => "Owner Surrender",
            Self::PublicAssist => "Public Assist",
            Self::Abandoned => "Abandoned",
        }
    }
}

/// Condition of the animal at intake.
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
pub enum IntakeCondition {
    #[default]
    #[strum(to_string = "Normal")]
    Normal,
    #[strum(to_string = "Lesionado")]
    Injured,
    #[strum(to_string = "Enfermo")]
    Sick,
    #[strum(to_string = "Embarazada")]
    Pregnant,
    #[strum(to_string = "Médico")]
    Medical,
    #[strum(to_string = "Comportamiento")]
    Behavior,
    #[strum(to_string = "Lactante")]
    Nursing,
    #[strum(to_string = "Anciano")]
    Aged,
}

impl Choice for IntakeCondition {
    fn model_token(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Injured => "Injured",
            Self::Sick => "Sick",
            Self::Pregnant => "Pregnant",
            Self::Medical => "Medical",
            Self::Behavior => "Behavior",
            Self::Nursing => "Nursing",
            Self::Aged => "Aged",
        }
    }
}
