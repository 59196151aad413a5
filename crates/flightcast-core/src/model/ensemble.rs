//! Gradient-boosted tree ensemble.
//!
//! Each tree is a flat node table rooted at index 0. A split sends the row
//! to `yes` when the feature value is strictly below the split threshold and
//! to `no` otherwise. Children always sit after their parent in the table, so
//! every walk ends at a leaf within `nodes.len()` steps.

use super::{check_threshold, default_threshold};
use crate::error::{ArtifactError, PredictError};
use crate::features::FeatureRow;
use serde::{Deserialize, Serialize};

/// One node of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: String,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf {
        leaf: f64,
    },
}

/// A single regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf and return its value.
    fn leaf_value(&self, index: usize, row: &FeatureRow) -> Result<f64, PredictError> {
        let mut at = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(at) {
                Some(Node::Leaf { leaf }) => return Ok(*leaf),
                Some(Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                }) => {
                    let value = row
                        .numeric(feature)
                        .ok_or_else(|| PredictError::UnknownFeature(feature.clone()))?;
                    at = if value < *threshold { *yes } else { *no };
                }
                None => break,
            }
        }
        Err(PredictError::MalformedTree(index))
    }

    fn validate(&self, index: usize) -> Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::InvalidModel(format!("tree {index}: {reason}"));

        if self.nodes.is_empty() {
            return Err(invalid("has no nodes".into()));
        }
        for (at, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { leaf } if !leaf.is_finite() => {
                    return Err(invalid(format!("leaf {at} is not finite")));
                }
                Node::Leaf { .. } => {}
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    if feature.is_empty() {
                        return Err(invalid(format!("split {at} has no feature")));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("split {at} threshold is not finite")));
                    }
                    for child in [*yes, *no] {
                        if child <= at || child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "split {at} points to node {child} outside {}..{}",
                                at + 1,
                                self.nodes.len()
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Additive ensemble of trees with a logistic link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Margin added before any tree contributes.
    #[serde(default)]
    pub base_margin: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Sum of `base_margin` and every tree's leaf value.
    pub fn margin(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        self.trees
            .iter()
            .enumerate()
            .try_fold(self.base_margin, |acc, (i, tree)| {
                Ok(acc + tree.leaf_value(i, row)?)
            })
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::InvalidModel("ensemble has no trees".into()));
        }
        if !self.base_margin.is_finite() {
            return Err(ArtifactError::InvalidModel(
                "base_margin is not finite".into(),
            ));
        }
        check_threshold(self.threshold)?;
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i))
    }

    pub(crate) fn feature_names(&self) -> impl Iterator<Item = String> + '_ {
        self.trees
            .iter()
            .flat_map(|tree| tree.nodes.iter())
            .filter_map(|node| match node {
                Node::Split { feature, .. } => Some(feature.clone()),
                Node::Leaf { .. } => None,
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================
