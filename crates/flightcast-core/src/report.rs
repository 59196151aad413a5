//! # Report Module
//!
//! Display-ready view of one prediction: the banner keyed on the label, the
//! confidence indicator, the percentage and the recommendation.
//!
//! The HTML page and the CLI both render from a [`PredictionReport`], so the
//! wording stays identical across surfaces.

use crate::error::Error;
use crate::features::FeatureRow;
use crate::model::{BookingOutcome, Prediction, Predictor};
use crate::query::{BookingForm, BookingQuery};
use crate::recommendation::{recommend, Recommendation};
use serde::Serialize;

/// Width of the text-mode confidence bar, in cells.
const BAR_WIDTH: usize = 20;

/// Headline shown above the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Success(message) | Banner::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Banner::Success(_))
    }
}

/// Everything shown for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub label: u8,
    pub probability: f64,
    /// Probability as a percentage with one decimal, e.g. `72.4%`.
    pub percent: String,
    pub banner: Banner,
    pub recommendation: Recommendation,
}

/// Format a probability as a one-decimal percentage.
pub fn percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

impl PredictionReport {
    pub fn new(prediction: &Prediction) -> Self {
        let outcome = prediction.outcome();
        let probability = prediction.probability();
        let pct = percent(probability);

        let banner = match outcome {
            BookingOutcome::Completed => Banner::Success(format!(
                "High likelihood of booking completion ({pct} probability)"
            )),
            BookingOutcome::NotCompleted => Banner::Error(format!(
                "Low likelihood of booking completion ({pct} probability)"
            )),
        };

        Self {
            label: outcome.label(),
            probability,
            percent: pct,
            banner,
            recommendation: recommend(outcome, probability),
        }
    }

    /// Line shown under the confidence indicator.
    pub fn confidence_line(&self) -> String {
        format!("Confidence: {}", self.percent)
    }

    /// Format as plain text for terminal output.
    pub fn to_text(&self) -> String {
        let filled = ((self.probability * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let marker = if self.banner.is_success() { "✅" } else { "❌" };

        let mut output = String::new();
        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ PREDICTION RESULT                   │\n");
        output.push_str(&format!("│ {} {}\n", marker, self.banner.message()));
        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ CONFIDENCE LEVEL                    │\n");
        output.push_str(&format!("│ {}\n", bar));
        output.push_str(&format!("│ {}\n", self.confidence_line()));
        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ RECOMMENDATIONS                     │\n");
        output.push_str(&format!("│ 💡 {}\n", self.recommendation.text()));
        output.push_str("└─────────────────────────────────────┘\n");
        output
    }
}

// =============================================================================
// ASSESSMENT
// =============================================================================

/// A scored booking: the row the model saw and the report derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub report: PredictionReport,
    pub features: FeatureRow,
}

/// Validate `form`, score it with `predictor` and build the report.
///
/// Fails with [`Error::Query`] when a field is out of domain and with
/// [`Error::Predict`] when the predictor cannot score the row.
pub fn assess(predictor: &dyn Predictor, form: &BookingForm) -> Result<Assessment, Error> {
    let query = BookingQuery::try_from(form)?;
    let prediction = predictor.classify(&query)?;
    Ok(Assessment {
        report: PredictionReport::new(&prediction),
        features: FeatureRow::from_query(&query),
    })
}

// =============================================================================
// TESTS
// =============================================================================
