//! Logistic regression over named inputs.

use super::{check_threshold, default_threshold};
use crate::error::{ArtifactError, PredictError};
use crate::features::FeatureRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Linear model: `margin = intercept + Σ weight · input`.
///
/// Coefficients are kept in a `BTreeMap` so the summation order, and
/// therefore the floating-point result, is the same on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl LogisticModel {
    pub fn margin(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        self.coefficients
            .iter()
            .try_fold(self.intercept, |acc, (feature, weight)| {
                let value = row
                    .numeric(feature)
                    .ok_or_else(|| PredictError::UnknownFeature(feature.clone()))?;
                Ok(acc + weight * value)
            })
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if !self.intercept.is_finite() {
            return Err(ArtifactError::InvalidModel("intercept is not finite".into()));
        }
        if let Some((feature, _)) = self.coefficients.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ArtifactError::InvalidModel(format!(
                "coefficient for '{feature}' is not finite"
            )));
        }
        check_threshold(self.threshold)
    }
}
