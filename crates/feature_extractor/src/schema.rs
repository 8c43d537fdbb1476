//! Versioned feature schemas.
//!
//! Each trained model was fit against exactly one of these schemas. A
//! schema fixes the field names, their order, their kind and, for
//! categorical fields, the tokens the model has seen.

use core::fmt;
use core::str::FromStr;

use intake_structs::{
    AgeGroup, AnimalType, BreedType, Choice, ColorGroup, IntakeCondition, IntakeType, Sex,
    SizeClass, grouped_breeds,
};

use strum::IntoEnumIterator;

use crate::record::{FeatureRecord, FeatureValue};

/// Errors raised when a record does not match its schema.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SchemaError {
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    #[error("schema {schema}: missing field `{field}`")]
    MissingField { schema: SchemaVersion, field: String },

    #[error("schema {schema}: unexpected field `{field}`")]
    UnexpectedField { schema: SchemaVersion, field: String },

    #[error("schema {schema}: field #{position} is `{found}`, expected `{expected}`")]
    FieldOrder {
        schema: SchemaVersion,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("schema {schema}: field `{field}` must be {expected}")]
    WrongKind {
        schema: SchemaVersion,
        field: String,
        expected: &'static str,
    },

    #[error("schema {schema}: field `{field}` has unknown value `{value}`")]
    UnknownCategory {
        schema: SchemaVersion,
        field: String,
        value: String,
    },

    #[error("schema {schema}: field `{field}` is not a finite number")]
    NonFinite { schema: SchemaVersion, field: String },
}

/// The kind of a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    /// `None` means free text: any non-empty token is passed through.
    Categorical(Option<Vec<String>>),
}

impl FieldKind {
    /// Decodes a value stored as text. Numeric fields must hold a number;
    /// categorical fields are kept verbatim, even when they look numeric.
    #[must_use]
    pub fn decode(&self, raw: &str) -> Option<FeatureValue> {
        match self {
            Self::Numeric => raw.trim().parse().ok().map(FeatureValue::Number),
            Self::Categorical(_) => Some(FeatureValue::Category(raw.to_string())),
        }
    }
}

/// A single named field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Numeric,
        }
    }

    const fn free_text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Categorical(None),
        }
    }

    fn one_of<I, S>(name: &'static str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            kind: FieldKind::Categorical(Some(allowed.into_iter().map(Into::into).collect())),
        }
    }

    fn tokens<C: Choice>(name: &'static str) -> Self {
        Self::one_of(name, C::model_tokens())
    }
}

/// A model revision's input contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum SchemaVersion {
    /// Age in months, weight, Spanish species label and free-text breed.
    BasicV1,
    /// Full intake record with derived size and constant placeholders.
    ExtendedV2,
    /// Grouped breeds and colors, fed to the log-target boosted model.
    GroupedV3,
}

impl SchemaVersion {
    /// The identifier stored in model artifacts.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BasicV1 => "basic-v1",
            Self::ExtendedV2 => "extended-v2",
            Self::GroupedV3 => "grouped-v3",
        }
    }

    /// Average days per month used to turn months into `AgeInDays`.
    #[must_use]
    pub const fn days_per_month(self) -> Option<f64> {
        match self {
            Self::BasicV1 => None,
            Self::ExtendedV2 => Some(30.0),
            Self::GroupedV3 => Some(30.44),
        }
    }

    /// Ordered field specifications.
    #[must_use]
    pub fn fields(self) -> Vec<FieldSpec> {
        match self {
            Self::BasicV1 => vec![
                FieldSpec::numeric("age"),
                FieldSpec::numeric("weight"),
                FieldSpec::one_of("animal_type", AnimalType::labels()),
                FieldSpec::free_text("breed"),
            ],
            Self::ExtendedV2 => vec![
                FieldSpec::one_of("AnimalType", ["Dog", "Cat", "Other"]),
                FieldSpec::tokens::<Sex>("Sex"),
                FieldSpec::numeric("AgeInDays"),
                FieldSpec::tokens::<AgeGroup>("AgeGroup"),
                FieldSpec::tokens::<SizeClass>("Size"),
                FieldSpec::numeric("weight_kg"),
                FieldSpec::tokens::<IntakeType>("IntakeType"),
                FieldSpec::tokens::<IntakeCondition>("IntakeCondition"),
                FieldSpec::free_text("Breed"),
                FieldSpec::free_text("Color"),
                FieldSpec::numeric("AdoptionFee"),
                FieldSpec::numeric("Vaccinated"),
                FieldSpec::numeric("HealthFlag"),
                FieldSpec::numeric("PreviousOwner"),
            ],
            Self::GroupedV3 => vec![
                FieldSpec::one_of("AnimalType", ["Dog", "Cat"]),
                FieldSpec::tokens::<Sex>("Sex"),
                FieldSpec::tokens::<IntakeType>("IntakeType"),
                FieldSpec::tokens::<IntakeCondition>("IntakeCondition"),
                FieldSpec::numeric("AgeInDays"),
                FieldSpec::tokens::<AgeGroup>("AgeGroup"),
                FieldSpec::tokens::<BreedType>("breed_type"),
                FieldSpec::one_of("Breed_grouped", grouped_breeds()),
                FieldSpec::tokens::<ColorGroup>("Color_grouped"),
            ],
        }
    }

    /// Ordered field names.
    #[must_use]
    pub fn feature_names(self) -> Vec<&'static str> {
        self.fields().into_iter().map(|f| f.name).collect()
    }

    /// Finds the schema whose ordered field names are exactly `names`.
    #[must_use]
    pub fn from_feature_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let names: Vec<&str> = names.into_iter().collect();
        Self::iter().find(|schema| schema.feature_names() == names)
    }

    /// Checks that `record` has exactly this schema's fields, in order, with
    /// the right kinds and known categorical values.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found.
    pub fn validate(self, record: &FeatureRecord) -> Result<(), SchemaError> {
        let fields = self.fields();

        for spec in &fields {
            if record.get(spec.name).is_none() {
                return Err(SchemaError::MissingField {
                    schema: self,
                    field: spec.name.to_string(),
                });
            }
        }

        for name in record.names() {
            if !fields.iter().any(|spec| spec.name == name) {
                return Err(SchemaError::UnexpectedField {
                    schema: self,
                    field: name.to_string(),
                });
            }
        }

        if record.len() != fields.len() {
            return Err(SchemaError::UnexpectedField {
                schema: self,
                field: duplicated_name(record).unwrap_or_default(),
            });
        }

        for (position, (spec, (name, value))) in fields.iter().zip(record.iter()).enumerate() {
            if spec.name != name {
                return Err(SchemaError::FieldOrder {
                    schema: self,
                    position,
                    expected: spec.name.to_string(),
                    found: name.to_string(),
                });
            }
            self.check_value(spec, value)?;
        }

        Ok(())
    }

    fn check_value(self, spec: &FieldSpec, value: &FeatureValue) -> Result<(), SchemaError> {
        match (&spec.kind, value) {
            (FieldKind::Numeric, FeatureValue::Number(n)) if n.is_finite() => Ok(()),
            (FieldKind::Numeric, FeatureValue::Number(_)) => Err(SchemaError::NonFinite {
                schema: self,
                field: spec.name.to_string(),
            }),
            (FieldKind::Numeric, FeatureValue::Category(_)) => Err(SchemaError::WrongKind {
                schema: self,
                field: spec.name.to_string(),
                expected: "numeric",
            }),
            (FieldKind::Categorical(_), FeatureValue::Number(_)) => Err(SchemaError::WrongKind {
                schema: self,
                field: spec.name.to_string(),
                expected: "categorical",
            }),
            (FieldKind::Categorical(None), FeatureValue::Category(_)) => Ok(()),
            (FieldKind::Categorical(Some(allowed)), FeatureValue::Category(token)) => {
                if allowed.iter().any(|a| a == token) {
                    Ok(())
                } else {
                    Err(SchemaError::UnknownCategory {
                        schema: self,
                        field: spec.name.to_string(),
                        value: token.clone(),
                    })
                }
            }
        }
    }
}

fn duplicated_name(record: &FeatureRecord) -> Option<String> {
    let names: Vec<&str> = record.names().collect();
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Some((*name).to_string());
        }
    }
    None
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SchemaVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic-v1" => Ok(Self::BasicV1),
            "extended-v2" => Ok(Self::ExtendedV2),
            "grouped-v3" => Ok(Self::GroupedV3),
            _ => Err(SchemaError::UnknownSchema(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped_record() -> FeatureRecord {
        FeatureRecord::new()
            .with("AnimalType", "Dog")
            .with("Sex", "Intact Male")
            .with("IntakeType", "Stray")
            .with("IntakeCondition", "Normal")
            .with("AgeInDays", 365_u32)
            .with("AgeGroup", "Adulto joven (1-3a)")
            .with("breed_type", "mix")
            .with("Breed_grouped", "Other")
            .with("Color_grouped", "Bicolor")
    }

    #[test]
    fn test_schema_ids_round_trip() {
        for schema in SchemaVersion::iter() {
            assert_eq!(schema.id().parse::<SchemaVersion>(), Ok(schema));
        }
        assert!("v4".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_from_feature_names() {
        for schema in SchemaVersion::iter() {
            assert_eq!(
                SchemaVersion::from_feature_names(schema.feature_names()),
                Some(schema)
            );
        }
        assert_eq!(
            SchemaVersion::from_feature_names(["weight", "age", "animal_type", "breed"]),
            None
        );
        assert_eq!(SchemaVersion::from_feature_names(core::iter::empty()), None);
    }

    #[test]
    fn test_decode_by_kind() {
        let free_text = FieldKind::Categorical(None);
        assert_eq!(
            free_text.decode("inf"),
            Some(FeatureValue::Category("inf".to_string()))
        );
        assert_eq!(
            free_text.decode("123"),
            Some(FeatureValue::Category("123".to_string()))
        );
        assert_eq!(FieldKind::Numeric.decode("365"), Some(FeatureValue::Number(365.0)));
        assert_eq!(FieldKind::Numeric.decode("Dog"), None);
    }

    #[test]
    fn test_grouped_feature_names() {
        assert_eq!(
            SchemaVersion::GroupedV3.feature_names(),
            vec![
                "AnimalType",
                "Sex",
                "IntakeType",
                "IntakeCondition",
                "AgeInDays",
                "AgeGroup",
                "breed_type",
                "Breed_grouped",
                "Color_grouped",
            ]
        );
    }

    #[test]
    fn test_validate_accepts_matching_record() {
        assert_eq!(SchemaVersion::GroupedV3.validate(&grouped_record()), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let record = FeatureRecord::new().with("AnimalType", "Dog");
        let err = SchemaVersion::GroupedV3.validate(&record).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField { field, .. } if field == "Sex"));
    }

    #[test]
    fn test_validate_rejects_extra_field() {
        let record = grouped_record().with("weight_kg", 5.0);
        let err = SchemaVersion::GroupedV3.validate(&record).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedField { field, .. } if field == "weight_kg"));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let mut record = FeatureRecord::new();
        for (name, value) in grouped_record().iter() {
            if name == "AnimalType" {
                record.push(name, "Bird");
            } else {
                record.push(name, value.clone());
            }
        }
        let err = SchemaVersion::GroupedV3.validate(&record).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownCategory { value, .. } if value == "Bird"));
    }

    #[test]
    fn test_validate_rejects_wrong_order() {
        let record = FeatureRecord::new()
            .with("weight", 5.0)
            .with("age", 12_u32)
            .with("animal_type", "Perro")
            .with("breed", "Beagle");
        let err = SchemaVersion::BasicV1.validate(&record).unwrap_err();
        assert!(matches!(err, SchemaError::FieldOrder { position: 0, .. }));
    }

    #[test]
    fn test_validate_rejects_wrong_kind() {
        let record = FeatureRecord::new()
            .with("age", "twelve")
            .with("weight", 5.0)
            .with("animal_type", "Perro")
            .with("breed", "Beagle");
        let err = SchemaVersion::BasicV1.validate(&record).unwrap_err();
        assert!(matches!(err, SchemaError::WrongKind { expected: "numeric", .. }));
    }
}
