//! Feature extractor crate for the shelter stay models.
//!
//! This crate turns the raw selections of an intake form into the exact
//! single-row feature table a given model schema expects: localized labels
//! become model tokens, months become days, and derived buckets (age group,
//! size) are filled in.

use intake_structs::{
    AgeGroup, AnimalType, BreedType, Choice, CoatColor, ColorGroup, IntakeCondition, IntakeType,
    Sex, SizeClass, is_grouped_breed, join_colors,
};
use tracing::debug;

mod record;
mod schema;

pub use record::*;
pub use schema::*;

/// Widget bounds for the age stepper, in months.
pub const AGE_MONTHS_MAX: u32 = 240;

/// Widget bounds for the weight stepper, in kilograms.
pub const WEIGHT_KG_MAX: f64 = 100.0;

/// Values the extended model expects but the form never asks for.
pub mod placeholders {
    pub const ADOPTION_FEE: f64 = 0.0;
    pub const VACCINATED: f64 = 0.0;
    pub const HEALTH_FLAG: f64 = 0.0;
    pub const PREVIOUS_OWNER: f64 = 0.0;
}

/// Errors that block a submission before the model is called.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("breed is required")]
    MissingBreed,

    #[error("select at least one coat color")]
    MissingColor,

    #[error("the {schema} model only knows dogs and cats, got {species}")]
    UnsupportedSpecies {
        schema: SchemaVersion,
        species: AnimalType,
    },

    #[error("breed `{0}` is not in the list; pick the closest one or `Other`")]
    UnknownBreed(String),
}

/// Raw selections of the intake form.
///
/// Not every schema reads every field: the basic model only uses age,
/// weight, species and breed.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    pub animal_type: AnimalType,
    pub sex: Sex,
    pub age_months: u32,
    pub weight_kg: f64,
    pub intake_type: IntakeType,
    pub intake_condition: IntakeCondition,
    pub breed_type: BreedType,
    pub breed: String,
    pub colors: Vec<CoatColor>,
    pub color_group: ColorGroup,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            animal_type: AnimalType::default(),
            sex: Sex::default(),
            age_months: 12,
            weight_kg: 5.0,
            intake_type: IntakeType::default(),
            intake_condition: IntakeCondition::default(),
            breed_type: BreedType::default(),
            breed: "Desconocida".to_string(),
            colors: vec![CoatColor::Black],
            color_group: ColorGroup::default(),
        }
    }
}

/// Converts an age in months to days, truncating.
#[must_use]
pub fn age_in_days(months: u32, days_per_month: f64) -> u32 {
    (f64::from(months) * days_per_month) as u32
}

/// Builds the feature record `schema` expects from the form.
///
/// # Errors
///
/// Returns an [`InputError`] when a required free-text field is blank or a
/// selection cannot be expressed in the schema's vocabulary. No model call
/// should be attempted in that case.
pub fn extract_features(form: &IntakeForm, schema: SchemaVersion) -> Result<FeatureRecord, InputError> {
    let record = match schema {
        SchemaVersion::BasicV1 => extract_basic(form)?,
        SchemaVersion::ExtendedV2 => extract_extended(form)?,
        SchemaVersion::GroupedV3 => extract_grouped(form)?,
    };

    debug!(schema = %schema, fields = record.len(), "Extracted features");

    Ok(record)
}

fn required_breed(form: &IntakeForm) -> Result<&str, InputError> {
    let breed = form.breed.trim();
    if breed.is_empty() {
        return Err(InputError::MissingBreed);
    }
    Ok(breed)
}

fn extract_basic(form: &IntakeForm) -> Result<FeatureRecord, InputError> {
    let breed = required_breed(form)?;

    Ok(FeatureRecord::new()
        .with("age", form.age_months)
        .with("weight", form.weight_kg)
        .with("animal_type", form.animal_type.to_string())
        .with("breed", breed))
}

fn extract_extended(form: &IntakeForm) -> Result<FeatureRecord, InputError> {
    let breed = required_breed(form)?;
    if form.colors.is_empty() {
        return Err(InputError::MissingColor);
    }

    let days_per_month = SchemaVersion::ExtendedV2.days_per_month().unwrap_or(30.0);
    let species = if form.animal_type.is_dog_or_cat() {
        form.animal_type.model_token()
    } else {
        AnimalType::Other.model_token()
    };
    let size = SizeClass::from_weight(form.animal_type, form.weight_kg);

    Ok(FeatureRecord::new()
        .with("AnimalType", species)
        .with("Sex", form.sex.model_token())
        .with("AgeInDays", age_in_days(form.age_months, days_per_month))
        .with("AgeGroup", AgeGroup::from_months(form.age_months).model_token())
        .with("Size", size.model_token())
        .with("weight_kg", form.weight_kg)
        .with("IntakeType", form.intake_type.model_token())
        .with("IntakeCondition", form.intake_condition.model_token())
        .with("Breed", breed)
        .with("Color", join_colors(&form.colors))
        .with("AdoptionFee", placeholders::ADOPTION_FEE)
        .with("Vaccinated", placeholders::VACCINATED)
        .with("HealthFlag", placeholders::HEALTH_FLAG)
        .with("PreviousOwner", placeholders::PREVIOUS_OWNER))
}

fn extract_grouped(form: &IntakeForm) -> Result<FeatureRecord, InputError> {
    if !form.animal_type.is_dog_or_cat() {
        return Err(InputError::UnsupportedSpecies {
            schema: SchemaVersion::GroupedV3,
            species: form.animal_type,
        });
    }

    let breed = form.breed.trim();
    if !is_grouped_breed(breed) {
        return Err(InputError::UnknownBreed(breed.to_string()));
    }

    let days_per_month = SchemaVersion::GroupedV3.days_per_month().unwrap_or(30.44);

    Ok(FeatureRecord::new()
        .with("AnimalType", form.animal_type.model_token())
        .with("Sex", form.sex.model_token())
        .with("IntakeType", form.intake_type.model_token())
        .with("IntakeCondition", form.intake_condition.model_token())
        .with("AgeInDays", age_in_days(form.age_months, days_per_month))
        .with("AgeGroup", AgeGroup::from_months(form.age_months).model_token())
        .with("breed_type", form.breed_type.model_token())
        .with("Breed_grouped", breed)
        .with("Color_grouped", form.color_group.model_token()))
}
