//! ML model crate for shelter stay prediction.
//!
//! A model artifact is a JSON file produced by the training step. It names
//! the feature schema it was fit against, the transform applied to its
//! target, the ordered feature list and the fitted model itself. Loading
//! checks all of those agree; predicting checks the record against the
//! schema before the model ever sees it.

use std::path::{Path, PathBuf};

use feature_extractor::{FeatureRecord, SchemaError, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

mod linear;
mod output;
mod tree;

pub use linear::LinearModel;
pub use output::*;
pub use tree::{Node, Tree, TreeEnsemble};

/// Errors raised while loading or calling a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("artifact features {found:?} do not match schema {schema} features {expected:?}")]
    FeatureListMismatch {
        schema: SchemaVersion,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("artifact declares target transform {declared}, but schema {schema} requires {expected}")]
    TransformMismatch {
        schema: SchemaVersion,
        declared: TargetTransform,
        expected: TargetTransform,
    },

    #[error("tree {tree}, node {node}: {reason}")]
    InvalidTree {
        tree: usize,
        node: usize,
        reason: String,
    },

    #[error("tree walk reached missing node {0}")]
    DanglingNode(usize),

    #[error("model refers to unknown feature `{0}`")]
    UnknownFeature(String),

    #[error("record has no feature `{0}`")]
    MissingFeature(String),

    #[error("feature `{feature}` must be {expected}")]
    FeatureKind {
        feature: String,
        expected: &'static str,
    },

    #[error("model returned a non-finite value: {0}")]
    NonFiniteOutput(f64),
}

/// Anything that maps one feature record to one raw score.
pub trait Regressor {
    /// Scores a single record, before any target transform.
    ///
    /// # Errors
    ///
    /// Returns an error if a feature the model needs is missing or has the
    /// wrong kind.
    fn predict_raw(&self, record: &FeatureRecord) -> Result<f64, ModelError>;
}

/// The fitted model stored in an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    TreeEnsemble(TreeEnsemble),
    Linear(LinearModel),
}

impl Regressor for ModelSpec {
    fn predict_raw(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        match self {
            Self::TreeEnsemble(model) => model.predict_raw(record),
            Self::Linear(model) => model.predict_raw(record),
        }
    }
}

/// On-disk model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    /// Schema id, e.g. `grouped-v3`.
    pub schema: String,
    pub target_transform: TargetTransform,
    pub features: Vec<String>,
    pub model: ModelSpec,
}

/// A loaded, validated model ready to serve predictions.
///
/// Built once at startup and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct ShelterStayModel {
    name: String,
    profile: ModelProfile,
    model: ModelSpec,
}

impl ShelterStayModel {
    /// Loads and validates a model artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// artifact is inconsistent with its declared schema.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        info!(path = %path.display(), "Loading model artifact");

        let data = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&data).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_artifact(artifact)
    }

    /// Validates an in-memory artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the feature list, transform or model structure
    /// disagree with the declared schema.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let schema: SchemaVersion = artifact.schema.parse()?;
        let profile = ModelProfile::for_schema(schema);

        let expected: Vec<String> = schema
            .feature_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if artifact.features != expected {
            return Err(ModelError::FeatureListMismatch {
                schema,
                expected,
                found: artifact.features,
            });
        }

        if artifact.target_transform != profile.transform {
            return Err(ModelError::TransformMismatch {
                schema,
                declared: artifact.target_transform,
                expected: profile.transform,
            });
        }

        match &artifact.model {
            ModelSpec::TreeEnsemble(model) => model.check(&artifact.features)?,
            ModelSpec::Linear(model) => model.check(&artifact.features)?,
        }

        info!(
            name = %artifact.name,
            schema = %schema,
            transform = %profile.transform,
            "Model ready"
        );

        Ok(Self {
            name: artifact.name,
            profile,
            model: artifact.model,
        })
    }

    /// The artifact's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema this model was trained against.
    #[must_use]
    pub const fn schema(&self) -> SchemaVersion {
        self.profile.schema
    }

    /// Transform and band for this model.
    #[must_use]
    pub const fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// Predicts days in the shelter for a single record.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Schema`] if the record does not match the
    /// model's schema, or an evaluation error from the model itself.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, ModelError> {
        self.profile.schema.validate(record)?;

        let raw = self.model.predict_raw(record)?;
        if !raw.is_finite() {
            return Err(ModelError::NonFiniteOutput(raw));
        }

        let prediction = Prediction::from_raw(raw, &self.profile);
        debug!(raw, days = prediction.days, "Prediction");

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use feature_extractor::{IntakeForm, extract_features};

    use super::*;

    fn grouped_artifact() -> ModelArtifact {
        serde_json::from_str(
            r#"{
                "name": "test_xgb",
                "schema": "grouped-v3",
                "target_transform": "log1p",
                "features": ["AnimalType", "Sex", "IntakeType", "IntakeCondition",
                             "AgeInDays", "AgeGroup", "breed_type", "Breed_grouped",
                             "Color_grouped"],
                "model": {
                    "type": "tree_ensemble",
                    "base_score": 3.0,
                    "trees": [{"nodes": [
                        {"kind": "numeric", "feature": "AgeInDays", "threshold": 180.0, "yes": 1, "no": 2},
                        {"kind": "leaf", "value": -1.0},
                        {"kind": "leaf", "value": 0.5}
                    ]}]
                }
            }"#,
        )
        .unwrap()
    }

    fn form(breed: &str) -> IntakeForm {
        IntakeForm {
            breed: breed.to_string(),
            ..IntakeForm::default()
        }
    }

    #[test]
    fn test_predict_applies_log_inverse() {
        let model = ShelterStayModel::from_artifact(grouped_artifact()).unwrap();
        let record = extract_features(&form("Other"), model.schema()).unwrap();

        let prediction = model.predict(&record).unwrap();

        let expected = ((3.5_f64.exp_m1()) * 10.0).round() / 10.0;
        assert!((prediction.raw - 3.5).abs() < 1e-12);
        assert!((prediction.days - expected).abs() < 1e-9);
        assert!(prediction.low <= prediction.days && prediction.days <= prediction.high);
    }

    #[test]
    fn test_predict_rejects_schema_mismatch() {
        let model = ShelterStayModel::from_artifact(grouped_artifact()).unwrap();
        let record = extract_features(&form("Beagle"), SchemaVersion::BasicV1).unwrap();

        assert!(matches!(
            model.predict(&record),
            Err(ModelError::Schema(SchemaError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_load_rejects_feature_list_mismatch() {
        let mut artifact = grouped_artifact();
        artifact.features.swap(0, 1);
        assert!(matches!(
            ShelterStayModel::from_artifact(artifact),
            Err(ModelError::FeatureListMismatch { .. })
        ));
    }

    #[test]
    fn test_load_rejects_transform_mismatch() {
        let mut artifact = grouped_artifact();
        artifact.target_transform = TargetTransform::Identity;
        assert!(matches!(
            ShelterStayModel::from_artifact(artifact),
            Err(ModelError::TransformMismatch { .. })
        ));
    }

    #[test]
    fn test_load_rejects_unknown_schema() {
        let mut artifact = grouped_artifact();
        artifact.schema = "grouped-v9".to_string();
        assert!(matches!(
            ShelterStayModel::from_artifact(artifact),
            Err(ModelError::Schema(SchemaError::UnknownSchema(_)))
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ShelterStayModel::load(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ModelError::Io { .. })));
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
        for (file, schema) in [
            ("best_model_XGBoost.json", SchemaVersion::GroupedV3),
            ("modelo_regresion.json", SchemaVersion::BasicV1),
            ("modelo_extendido.json", SchemaVersion::ExtendedV2),
        ] {
            let model = ShelterStayModel::load(&models.join(file)).unwrap();
            assert_eq!(model.schema(), schema);

            let record = extract_features(&form("Pit Bull Mix"), schema).unwrap();
            let prediction = model.predict(&record).unwrap();
            assert!(prediction.days >= MIN_DAYS);
        }
    }
}
