//! Intake form flags shared by `predict` and `feedback`.

use clap::Args;
use feature_extractor::{AGE_MONTHS_MAX, IntakeForm, WEIGHT_KG_MAX};
use intake_structs::{
    AnimalType, BreedType, CoatColor, ColorGroup, IntakeCondition, IntakeType, Sex,
};

/// One animal, as entered at intake.
#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    /// Species
    #[arg(long, value_enum, default_value_t)]
    pub animal_type: AnimalType,

    /// Sex and sterilization status
    #[arg(long, value_enum, default_value_t)]
    pub sex: Sex,

    /// Age in months
    #[arg(
        long,
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(AGE_MONTHS_MAX))
    )]
    pub age_months: u32,

    /// Weight in kilograms
    #[arg(long, default_value_t = 5.0, value_parser = parse_weight)]
    pub weight_kg: f64,

    /// How the animal arrived
    #[arg(long, value_enum, default_value_t)]
    pub intake_type: IntakeType,

    /// Condition on arrival
    #[arg(long, value_enum, default_value_t)]
    pub intake_condition: IntakeCondition,

    /// Purebred or mix
    #[arg(long, value_enum, default_value_t)]
    pub breed_type: BreedType,

    /// Breed; free text for the older models, one of the grouped breeds otherwise
    #[arg(long)]
    pub breed: String,

    /// Coat colors, in order (comma separated)
    #[arg(
        long = "color",
        value_enum,
        value_delimiter = ',',
        default_values_t = [CoatColor::Black]
    )]
    pub colors: Vec<CoatColor>,

    /// Number of coat colors
    #[arg(long, value_enum, default_value_t)]
    pub color_group: ColorGroup,
}

impl From<FormArgs> for IntakeForm {
    fn from(args: FormArgs) -> Self {
        Self {
            animal_type: args.animal_type,
            sex: args.sex,
            age_months: args.age_months,
            weight_kg: args.weight_kg,
            intake_type: args.intake_type,
            intake_condition: args.intake_condition,
            breed_type: args.breed_type,
            breed: args.breed,
            colors: args.colors,
            color_group: args.color_group,
        }
    }
}

fn parse_weight(s: &str) -> Result<f64, String> {
    let weight: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("`{s}` is not a number: {e}"))?;

    if !weight.is_finite() || !(0.0..=WEIGHT_KG_MAX).contains(&weight) {
        return Err(format!("weight must be between 0 and {WEIGHT_KG_MAX} kg"));
    }

    Ok(weight)
}

/// Parses a non-negative number of days.
///
/// # Errors
///
/// Returns a message if `s` is not a finite, non-negative number.
pub fn parse_days(s: &str) -> Result<f64, String> {
    let days: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("`{s}` is not a number: {e}"))?;

    if !days.is_finite() || days < 0.0 {
        return Err("days must be a non-negative number".to_string());
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        form: FormArgs,
    }

    fn parse(args: &[&str]) -> Result<FormArgs, clap::Error> {
        Harness::try_parse_from(core::iter::once("test").chain(args.iter().copied()))
            .map(|h| h.form)
    }

    #[test]
    fn test_defaults() {
        let form: IntakeForm = parse(&["--breed", "Pit Bull Mix"]).unwrap().into();
        assert_eq!(form.animal_type, AnimalType::Dog);
        assert_eq!(form.age_months, 12);
        assert!((form.weight_kg - 5.0).abs() < f64::EPSILON);
        assert_eq!(form.colors, vec![CoatColor::Black]);
        assert_eq!(form.breed, "Pit Bull Mix");
    }

    #[test]
    fn test_choices() {
        let form = parse(&[
            "--animal-type",
            "cat",
            "--sex",
            "spayed-female",
            "--intake-type",
            "owner-surrender",
            "--color",
            "white,tabby",
            "--breed",
            "Domestic Shorthair Mix",
        ])
        .unwrap();
        assert_eq!(form.animal_type, AnimalType::Cat);
        assert_eq!(form.sex, Sex::SpayedFemale);
        assert_eq!(form.intake_type, IntakeType::OwnerSurrender);
        assert_eq!(form.colors, vec![CoatColor::White, CoatColor::Tabby]);
    }

    #[test]
    fn test_ranges_are_enforced() {
        assert!(parse(&["--breed", "x", "--age-months", "240"]).is_ok());
        assert!(parse(&["--breed", "x", "--age-months", "241"]).is_err());
        assert!(parse(&["--breed", "x", "--weight-kg", "100"]).is_ok());
        assert!(parse(&["--breed", "x", "--weight-kg", "100.5"]).is_err());
        assert!(parse(&["--breed", "x", "--weight-kg", "-1"]).is_err());
        assert!(parse(&["--breed", "x", "--animal-type", "horse"]).is_err());
    }

    #[test]
    fn test_empty_breed_reaches_the_form() {
        let form = parse(&["--breed", ""]).unwrap();
        assert!(form.breed.is_empty());
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("12.5"), Ok(12.5));
        assert!(parse_days("-3").is_err());
        assert!(parse_days("NaN").is_err());
    }
}
