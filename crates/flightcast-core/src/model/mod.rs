//! # Model Module
//!
//! The predictor seam and the artifact formats behind it.
//!
//! Form handling only ever talks to [`Predictor`]. The concrete model is a
//! [`ModelArtifact`] loaded once from JSON at startup:
//!
//! - `tree_ensemble`: gradient-boosted binary trees with a logistic link
//! - `logistic`: a linear model with a logistic link
//!
//! Both score a [`FeatureRow`] as an additive margin and squash it into the
//! probability of booking completion.

mod ensemble;
mod logistic;

pub use ensemble::{Node, Tree, TreeEnsemble};
pub use logistic::LogisticModel;

use crate::error::{ArtifactError, PredictError};
use crate::features::FeatureRow;
use crate::query::BookingQuery;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default decision threshold on the positive-class probability.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

// =============================================================================
// OUTCOME + PREDICTION
// =============================================================================

/// Binary label predicted for a booking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BookingOutcome {
    /// Label 0: the customer leaves without booking.
    NotCompleted,
    /// Label 1: the customer completes the booking.
    Completed,
}

impl BookingOutcome {
    /// The 0/1 class label.
    pub fn label(&self) -> u8 {
        match self {
            BookingOutcome::NotCompleted => 0,
            BookingOutcome::Completed => 1,
        }
    }

    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(BookingOutcome::NotCompleted),
            1 => Some(BookingOutcome::Completed),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, BookingOutcome::Completed)
    }
}

impl From<BookingOutcome> for u8 {
    fn from(outcome: BookingOutcome) -> Self {
        outcome.label()
    }
}

impl TryFrom<u8> for BookingOutcome {
    type Error = String;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        Self::from_label(label).ok_or_else(|| format!("label must be 0 or 1, got {label}"))
    }
}

/// Result of scoring one booking query.
///
/// Only exists for the render that displays it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    #[serde(rename = "label")]
    outcome: BookingOutcome,
    probability: f64,
}

impl Prediction {
    /// Pair a label with the positive-class probability.
    ///
    /// Fails if `probability` is not a finite value in [0, 1].
    pub fn new(outcome: BookingOutcome, probability: f64) -> Result<Self, PredictError> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PredictError::InvalidProbability(probability));
        }
        Ok(Self {
            outcome,
            probability,
        })
    }

    pub fn outcome(&self) -> BookingOutcome {
        self.outcome
    }

    /// Probability that the booking completes (label 1).
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

// =============================================================================
// PREDICTOR TRAIT
// =============================================================================

/// A binary classifier over booking feature rows.
///
/// Implementations must be deterministic: the same row always yields the
/// same label and probabilities.
pub trait Predictor: Send + Sync {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Predict the class label for one row.
    fn predict(&self, row: &FeatureRow) -> Result<BookingOutcome, PredictError>;

    /// Class probabilities `[p(label 0), p(label 1)]` for one row.
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], PredictError>;

    /// Assemble the row for `query` and return its label with the
    /// positive-class probability.
    fn classify(&self, query: &BookingQuery) -> Result<Prediction, PredictError> {
        let row = FeatureRow::from_query(query);
        let outcome = self.predict(&row)?;
        let [_, positive] = self.predict_proba(&row)?;
        Prediction::new(outcome, positive)
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(margin: f64) -> f64 {
    if margin >= 0.0 {
        1.0 / (1.0 + (-margin).exp())
    } else {
        let e = margin.exp();
        e / (1.0 + e)
    }
}

/// Turn an additive margin into `[p0, p1]`.
fn margin_to_proba(margin: f64) -> Result<[f64; 2], PredictError> {
    let positive = sigmoid(margin);
    if !positive.is_finite() {
        return Err(PredictError::InvalidProbability(positive));
    }
    Ok([1.0 - positive, positive])
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn check_threshold(threshold: f64) -> Result<(), ArtifactError> {
    if threshold.is_finite() && threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(ArtifactError::InvalidModel(format!(
            "threshold must lie strictly between 0 and 1, got {threshold}"
        )))
    }
}

// =============================================================================
// MODEL ARTIFACT
// =============================================================================

/// A model loaded from its JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    TreeEnsemble(TreeEnsemble),
    Logistic(LogisticModel),
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_str(json).map_err(|source| {
            ArtifactError::Parse {
                path: "<inline>".into(),
                source,
            }
        })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check structural invariants.
    ///
    /// A validated artifact always terminates evaluation and never yields a
    /// non-finite margin from its own parameters.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            ModelArtifact::TreeEnsemble(model) => model.validate(),
            ModelArtifact::Logistic(model) => model.validate(),
        }
    }

    pub fn version(&self) -> &str {
        match self {
            ModelArtifact::TreeEnsemble(model) => &model.version,
            ModelArtifact::Logistic(model) => &model.version,
        }
    }

    /// Short label for the artifact format.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::TreeEnsemble(_) => "tree_ensemble",
            ModelArtifact::Logistic(_) => "logistic",
        }
    }

    /// Every input name the model reads, sorted and deduplicated.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match self {
            ModelArtifact::TreeEnsemble(model) => model.feature_names().collect(),
            ModelArtifact::Logistic(model) => model.coefficients.keys().cloned().collect(),
        };
        names.sort();
        names.dedup();
        names
    }

    fn margin(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        match self {
            ModelArtifact::TreeEnsemble(model) => model.margin(row),
            ModelArtifact::Logistic(model) => model.margin(row),
        }
    }

    fn threshold(&self) -> f64 {
        match self {
            ModelArtifact::TreeEnsemble(model) => model.threshold,
            ModelArtifact::Logistic(model) => model.threshold,
        }
    }
}

impl Predictor for ModelArtifact {
    fn name(&self) -> &str {
        match self {
            ModelArtifact::TreeEnsemble(model) => &model.name,
            ModelArtifact::Logistic(model) => &model.name,
        }
    }

    fn predict(&self, row: &FeatureRow) -> Result<BookingOutcome, PredictError> {
        let [_, positive] = self.predict_proba(row)?;
        Ok(if positive > self.threshold() {
            BookingOutcome::Completed
        } else {
            BookingOutcome::NotCompleted
        })
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], PredictError> {
        margin_to_proba(self.margin(row)?)
    }
}

/// Read, parse and validate a model artifact.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact, ArtifactError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    artifact.validate()?;
    Ok(artifact)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::BookingForm;
    use crate::recommendation::{recommend, Recommendation};

    const STUMP: &str = r#"{
        "kind": "tree_ensemble",
        "name": "stump",
        "version": "1",
        "trees": [
            {"nodes": [
                {"feature": "purchase_lead", "threshold": 60.0, "yes": 1, "no": 2},
                {"leaf": 1.2},
                {"leaf": -1.2}
            ]}
        ]
    }"#;

    fn query(purchase_lead: i64) -> BookingQuery {
        let form = BookingForm {
            purchase_lead,
            ..BookingForm::default()
        };
        BookingQuery::try_from(form).unwrap()
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(BookingOutcome::NotCompleted.label(), 0);
        assert_eq!(BookingOutcome::Completed.label(), 1);
        assert_eq!(BookingOutcome::from_label(2), None);
    }

    #[test]
    fn outcome_serializes_as_integer() {
        let json = serde_json::to_string(&BookingOutcome::Completed).unwrap();
        assert_eq!(json, "1");
        let parsed: Result<BookingOutcome, _> = serde_json::from_str("7");
        assert!(parsed.is_err());
    }

    #[test]
    fn prediction_rejects_out_of_range_probability() {
        assert!(Prediction::new(BookingOutcome::Completed, 1.0).is_ok());
        assert!(Prediction::new(BookingOutcome::Completed, 1.01).is_err());
        assert!(Prediction::new(BookingOutcome::NotCompleted, -0.1).is_err());
        assert!(Prediction::new(BookingOutcome::NotCompleted, f64::NAN).is_err());
    }

    #[test]
    fn sigmoid_is_symmetric_and_bounded() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn stump_classifies_by_purchase_lead() {
        let model = ModelArtifact::from_json(STUMP).unwrap();

        let early = model.classify(&query(10));
        let late = model.classify(&query(200));

        assert_eq!(
            early.map(|p| p.outcome()),
            Ok(BookingOutcome::Completed)
        );
        assert_eq!(
            late.map(|p| p.outcome()),
            Ok(BookingOutcome::NotCompleted)
        );
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = ModelArtifact::from_json(STUMP).unwrap();
        let row = FeatureRow::from_query(&query(10));
        let proba = model.predict_proba(&row).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!((proba[1] - sigmoid(1.2)).abs() < 1e-12);
    }

    #[test]
    fn classification_is_repeatable() {
        let model = ModelArtifact::from_json(STUMP).unwrap();
        let q = query(45);
        assert_eq!(model.classify(&q), model.classify(&q));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = ModelArtifact::from_json(r#"{"kind": "pickle", "name": "x"}"#);
        assert!(matches!(err, Err(ArtifactError::Parse { .. })));
    }

    #[test]
    fn threshold_must_be_a_probability() {
        let json = STUMP.replace(r#""version": "1","#, r#""version": "1", "threshold": 1.5,"#);
        let err = ModelArtifact::from_json(&json);
        assert!(matches!(err, Err(ArtifactError::InvalidModel(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(dir.path().join("missing.json"));
        assert!(matches!(err, Err(ArtifactError::Io { .. })));
    }

    #[test]
    fn load_reads_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, STUMP).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.name(), "stump");
        assert_eq!(model.kind(), "tree_ensemble");
        assert_eq!(model.version(), "1");
        assert_eq!(model.feature_names(), vec!["purchase_lead".to_string()]);
    }

    #[test]
    fn probability_at_threshold_is_not_completed() {
        let model = ModelArtifact::from_json(
            r#"{"kind": "logistic", "name": "flat", "intercept": 0.0, "coefficients": {}}"#,
        )
        .unwrap();

        let prediction = model.classify(&BookingQuery::default()).unwrap();
        assert_eq!(prediction.probability(), 0.5);
        assert_eq!(prediction.outcome(), BookingOutcome::NotCompleted);
        assert_eq!(
            recommend(prediction.outcome(), prediction.probability()),
            Recommendation::SuggestInsurance
        );
    }
}
