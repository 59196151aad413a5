//! # Model Metrics
//!
//! Evaluation scores shipped alongside the model in the deployment artifact.
//! They are read once at startup and shown as static sidebar labels.
//!
//! Expected document shape (other keys are ignored):
//!
//! ```json
//! { "model_metrics": { "accuracy": 0.853, "roc_auc": 0.79, "f1_score": 0.41 } }
//! ```

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Held-out evaluation scores of the deployed model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub roc_auc: f64,
    pub f1_score: f64,
}

#[derive(Deserialize)]
struct DeploymentArtifacts {
    model_metrics: ModelMetrics,
}

impl ModelMetrics {
    /// Parse the `model_metrics` section of a deployment document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<DeploymentArtifacts>(json).map(|doc| doc.model_metrics)
    }

    /// Accuracy as a percentage with one decimal, e.g. `85.3%`.
    pub fn accuracy_label(&self) -> String {
        format!("{:.1}%", self.accuracy * 100.0)
    }

    /// ROC AUC with three decimals.
    pub fn roc_auc_label(&self) -> String {
        format!("{:.3}", self.roc_auc)
    }

    /// F1 score with three decimals.
    pub fn f1_score_label(&self) -> String {
        format!("{:.3}", self.f1_score)
    }

    /// `(label, value)` rows in sidebar order.
    pub fn labels(&self) -> [(&'static str, String); 3] {
        [
            ("Accuracy", self.accuracy_label()),
            ("ROC AUC", self.roc_auc_label()),
            ("F1 Score", self.f1_score_label()),
        ]
    }
}

/// Read the metrics from a deployment artifact on disk.
pub fn load_metrics(path: impl AsRef<Path>) -> Result<ModelMetrics, ArtifactError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ModelMetrics::from_json(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
