//! Predict command - runs the loaded model on one intake form.

use anyhow::Result;
use feature_extractor::{FeatureRecord, IntakeForm, SchemaVersion, extract_features};
use ml_model::{ModelError, Prediction, ShelterStayModel};
use tracing::{info, warn};

use crate::report;

/// Something that turns a validated feature record into a stay estimate.
pub trait Estimator {
    /// Schema the estimator expects its records in.
    fn schema(&self) -> SchemaVersion;

    /// Name shown next to the estimate.
    fn name(&self) -> &str;

    /// Estimates days in the shelter.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not fit or the model fails.
    fn estimate(&self, record: &FeatureRecord) -> Result<Prediction, ModelError>;
}

impl Estimator for ShelterStayModel {
    fn schema(&self) -> SchemaVersion {
        Self::schema(self)
    }

    fn name(&self) -> &str {
        Self::name(self)
    }

    fn estimate(&self, record: &FeatureRecord) -> Result<Prediction, ModelError> {
        self.predict(record)
    }
}

/// A successful estimate together with what the model saw.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub record: FeatureRecord,
    pub prediction: Prediction,
}

/// Normalizes the form and calls the model.
///
/// Returns `Ok(None)` when the form is incomplete or cannot be expressed in
/// the model's schema; a warning is printed and the model is not called.
///
/// # Errors
///
/// Returns an error if the model rejects the record or fails to evaluate.
pub fn estimate(model: &impl Estimator, form: &IntakeForm) -> Result<Option<Estimate>> {
    let record = match extract_features(form, model.schema()) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "Form rejected, no prediction made");
            println!("{}", report::render_warning(&e.to_string()));
            return Ok(None);
        }
    };

    let prediction = model.estimate(&record)?;

    info!(
        model = model.name(),
        days = prediction.days,
        low = prediction.low,
        high = prediction.high,
        "Estimated stay"
    );

    Ok(Some(Estimate { record, prediction }))
}

/// Runs the predict command.
///
/// # Errors
///
/// Returns an error if prediction fails.
pub fn run(model: &impl Estimator, form: &IntakeForm) -> Result<()> {
    if let Some(estimate) = estimate(model, form)? {
        println!(
            "{}",
            report::render_prediction(model.name(), &estimate.prediction, &estimate.record)
        );
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use feature_extractor::FeatureValue;
    use intake_structs::AnimalType;
    use ml_model::{ModelProfile, TargetTransform};

    use super::*;

    /// Echoes a fixed raw value through the schema's profile and counts calls.
    pub(crate) struct FixedEstimator {
        pub schema: SchemaVersion,
        pub raw: f64,
        pub calls: Cell<usize>,
    }

    impl FixedEstimator {
        pub(crate) const fn new(schema: SchemaVersion, raw: f64) -> Self {
            Self {
                schema,
                raw,
                calls: Cell::new(0),
            }
        }
    }

    impl Estimator for FixedEstimator {
        fn schema(&self) -> SchemaVersion {
            self.schema
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn estimate(&self, record: &FeatureRecord) -> Result<Prediction, ModelError> {
            self.calls.set(self.calls.get() + 1);
            self.schema.validate(record)?;
            Ok(Prediction::from_raw(
                self.raw,
                &ModelProfile::for_schema(self.schema),
            ))
        }
    }

    fn number(record: &FeatureRecord, name: &str) -> Option<f64> {
        record.get(name).and_then(FeatureValue::as_number)
    }

    fn category<'a>(record: &'a FeatureRecord, name: &str) -> Option<&'a str> {
        record.get(name).and_then(FeatureValue::as_category)
    }

    #[test]
    fn test_small_puppy_end_to_end() {
        let model = FixedEstimator::new(SchemaVersion::ExtendedV2, 20.0);
        let form = IntakeForm {
            animal_type: AnimalType::Dog,
            age_months: 3,
            weight_kg: 9.0,
            breed: "Beagle".to_string(),
            ..IntakeForm::default()
        };

        let estimate = estimate(&model, &form).unwrap().unwrap();

        assert_eq!(category(&estimate.record, "Size"), Some("Pequeño"));
        assert_eq!(category(&estimate.record, "AgeGroup"), Some("Cachorro (<6m)"));
        assert_eq!(number(&estimate.record, "AgeInDays"), Some(90.0));
        assert!((estimate.prediction.days - 20.0).abs() < f64::EPSILON);
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn test_empty_breed_never_reaches_the_model() {
        for schema in [SchemaVersion::BasicV1, SchemaVersion::ExtendedV2] {
            let model = FixedEstimator::new(schema, 20.0);
            let form = IntakeForm {
                breed: "   ".to_string(),
                ..IntakeForm::default()
            };

            assert!(estimate(&model, &form).unwrap().is_none());
            assert_eq!(model.calls.get(), 0, "schema {schema}");
        }
    }

    #[test]
    fn test_log_target_is_inverted() {
        let model = FixedEstimator::new(SchemaVersion::GroupedV3, 3.0);
        assert_eq!(
            ModelProfile::for_schema(model.schema).transform,
            TargetTransform::Log1p
        );

        let form = IntakeForm {
            breed: "Labrador Retriever Mix".to_string(),
            ..IntakeForm::default()
        };
        let estimate = estimate(&model, &form).unwrap().unwrap();

        // exp(3) - 1 = 19.0855...
        assert!((estimate.prediction.days - 19.1).abs() < 1e-9);
        assert!((estimate.prediction.low - 11.46).abs() < 1e-9);
        assert!((estimate.prediction.high - 26.74).abs() < 1e-9);
    }

    #[test]
    fn test_bundled_model_predicts() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../models/best_model_XGBoost.json");
        let model = ShelterStayModel::load(&path).unwrap();
        let form = IntakeForm {
            breed: "Pit Bull Mix".to_string(),
            ..IntakeForm::default()
        };

        let estimate = estimate(&model, &form).unwrap().unwrap();
        assert!(estimate.prediction.days >= 1.0);
        assert!(estimate.prediction.low <= estimate.prediction.days);
        assert!(estimate.prediction.high >= estimate.prediction.days);
    }
}
