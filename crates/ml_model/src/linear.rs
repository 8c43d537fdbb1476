//! One-hot linear regression.

use std::collections::BTreeMap;

use feature_extractor::FeatureRecord;
use serde::{Deserialize, Serialize};

use crate::{ModelError, Regressor};

/// `intercept + Σ numeric_coef · x + Σ weight[category]`.
///
/// Categories the model never saw contribute nothing, which is how a
/// one-hot encoder with `handle_unknown = ignore` behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

impl LinearModel {
    /// Checks that every coefficient refers to a known feature.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownFeature`] for the first unknown name.
    pub fn check(&self, features: &[String]) -> Result<(), ModelError> {
        self.numeric
            .keys()
            .chain(self.categorical.keys())
            .find(|name| !features.contains(*name))
            .map_or(Ok(()), |name| Err(ModelError::UnknownFeature(name.clone())))
    }
}

impl Regressor for LinearModel {
    fn predict_raw(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let mut total = self.intercept;

        for (feature, coef) in &self.numeric {
            let value = record
                .get(feature)
                .ok_or_else(|| ModelError::MissingFeature(feature.clone()))?
                .as_number()
                .ok_or_else(|| ModelError::FeatureKind {
                    feature: feature.clone(),
                    expected: "numeric",
                })?;
            total += coef * value;
        }

        for (feature, weights) in &self.categorical {
            let token = record
                .get(feature)
                .ok_or_else(|| ModelError::MissingFeature(feature.clone()))?
                .as_category()
                .ok_or_else(|| ModelError::FeatureKind {
                    feature: feature.clone(),
                    expected: "categorical",
                })?;
            total += weights.get(token).copied().unwrap_or_default();
        }

        Ok(total)
    }
}
