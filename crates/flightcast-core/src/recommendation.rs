//! # Recommendation Bands
//!
//! Maps a prediction to one of three canned sales actions.
//!
//! ```text
//! label 0, p < 0.30          → OfferDiscounts
//! label 0, 0.30 ≤ p < 0.60   → SuggestInsurance
//! otherwise                  → SmoothCheckout
//! ```

use crate::model::BookingOutcome;
use serde::Serialize;
use std::fmt;

/// Upper bound (exclusive) of the discount band.
pub const DISCOUNT_BAND_MAX: f64 = 0.30;

/// Upper bound (exclusive) of the insurance band.
pub const INSURANCE_BAND_MAX: f64 = 0.60;

/// Suggested follow-up for a booking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    OfferDiscounts,
    SuggestInsurance,
    SmoothCheckout,
}

impl Recommendation {
    pub fn text(&self) -> &'static str {
        match self {
            Recommendation::OfferDiscounts => {
                "Consider offering promotional discounts or flexible booking options"
            }
            Recommendation::SuggestInsurance => {
                "Suggest adding travel insurance or highlighting popular routes"
            }
            Recommendation::SmoothCheckout => {
                "Customer shows strong intent - focus on smooth checkout process"
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Pick the band for a label and positive-class probability.
///
/// Lower bounds are inclusive: exactly 0.30 is already the insurance band.
pub fn recommend(outcome: BookingOutcome, probability: f64) -> Recommendation {
    match outcome {
        BookingOutcome::NotCompleted if probability < DISCOUNT_BAND_MAX => {
            Recommendation::OfferDiscounts
        }
        BookingOutcome::NotCompleted if probability < INSURANCE_BAND_MAX => {
            Recommendation::SuggestInsurance
        }
        _ => Recommendation::SmoothCheckout,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_probability_gets_discounts() {
        assert_eq!(
            recommend(BookingOutcome::NotCompleted, 0.10),
            Recommendation::OfferDiscounts
        );
    }

    #[test]
    fn middle_probability_gets_insurance() {
        assert_eq!(
            recommend(BookingOutcome::NotCompleted, 0.45),
            Recommendation::SuggestInsurance
        );
    }

    #[test]
    fn completed_gets_smooth_checkout() {
        assert_eq!(
            recommend(BookingOutcome::Completed, 0.95),
            Recommendation::SmoothCheckout
        );
        // Label wins over a low probability.
        assert_eq!(
            recommend(BookingOutcome::Completed, 0.05),
            Recommendation::SmoothCheckout
        );
    }

    #[test]
    fn band_lower_bounds_are_inclusive() {
        assert_eq!(
            recommend(BookingOutcome::NotCompleted, 0.30),
            Recommendation::SuggestInsurance
        );
        assert_eq!(
            recommend(BookingOutcome::NotCompleted, 0.60),
            Recommendation::SmoothCheckout
        );
    }

    #[test]
    fn texts_are_distinct() {
        assert!(Recommendation::OfferDiscounts.text().contains("discounts"));
        assert!(Recommendation::SuggestInsurance.text().contains("insurance"));
        assert!(Recommendation::SmoothCheckout.text().contains("smooth checkout"));
    }
}
