//! Gradient boosted tree ensembles.
//!
//! Trees are stored as flat node arrays. A split sends the record to `yes`
//! when a numeric feature is below the threshold, or when a categorical
//! feature is one of the listed categories; otherwise to `no`. The
//! ensemble output is `base_score` plus the sum of the reached leaves.

use feature_extractor::{FeatureRecord, FeatureValue};
use serde::{Deserialize, Serialize};

use crate::{ModelError, Regressor};

/// A single tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Numeric {
        feature: String,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Categorical {
        feature: String,
        categories: Vec<String>,
        yes: usize,
        no: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A regression tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// Additive ensemble of regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Checks that every split names a known feature and every child index
    /// points forward inside its tree, so evaluation always terminates.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidTree`] or [`ModelError::UnknownFeature`].
    pub fn check(&self, features: &[String]) -> Result<(), ModelError> {
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::InvalidTree {
                    tree: tree_idx,
                    node: 0,
                    reason: "tree has no nodes".to_string(),
                });
            }

            for (node_idx, node) in tree.nodes.iter().enumerate() {
                let (feature, yes, no) = match node {
                    Node::Numeric {
                        feature, yes, no, ..
                    }
                    | Node::Categorical {
                        feature, yes, no, ..
                    } => (feature, *yes, *no),
                    Node::Leaf { value } => {
                        if !value.is_finite() {
                            return Err(ModelError::InvalidTree {
                                tree: tree_idx,
                                node: node_idx,
                                reason: "leaf value is not finite".to_string(),
                            });
                        }
                        continue;
                    }
                };

                if !features.iter().any(|f| f == feature) {
                    return Err(ModelError::UnknownFeature(feature.clone()));
                }

                for child in [yes, no] {
                    if child <= node_idx || child >= tree.nodes.len() {
                        return Err(ModelError::InvalidTree {
                            tree: tree_idx,
                            node: node_idx,
                            reason: format!("child {child} is out of order or out of bounds"),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Tree {
    fn evaluate(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let mut idx = 0;
        loop {
            let node = self
                .nodes
                .get(idx)
                .ok_or(ModelError::DanglingNode(idx))?;

            idx = match node {
                Node::Leaf { value } => return Ok(*value),
                Node::Numeric {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    let value = lookup(record, feature)?
                        .as_number()
                        .ok_or_else(|| ModelError::FeatureKind {
                            feature: feature.clone(),
                            expected: "numeric",
                        })?;
                    if value < *threshold { *yes } else { *no }
                }
                Node::Categorical {
                    feature,
                    categories,
                    yes,
                    no,
                } => {
                    let value = lookup(record, feature)?
                        .as_category()
                        .ok_or_else(|| ModelError::FeatureKind {
                            feature: feature.clone(),
                            expected: "categorical",
                        })?;
                    if categories.iter().any(|c| c == value) {
                        *yes
                    } else {
                        *no
                    }
                }
            };
        }
    }
}

fn lookup<'a>(record: &'a FeatureRecord, feature: &str) -> Result<&'a FeatureValue, ModelError> {
    record
        .get(feature)
        .ok_or_else(|| ModelError::MissingFeature(feature.to_string()))
}

impl Regressor for TreeEnsemble {
    fn predict_raw(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        self.trees
            .iter()
            .try_fold(self.base_score, |acc, tree| -> Result<f64, ModelError> {
                Ok(acc + tree.evaluate(record)?)
            })
    }
}
