//! # Flightcast Core
//!
//! The prediction engine behind Flightcast.
//!
//! A [`BookingQuery`] is validated from raw field values ([`BookingForm`]),
//! assembled into a single-row [`FeatureRow`], and scored by a [`Predictor`].
//! The resulting [`Prediction`] is mapped to a [`Recommendation`] band and
//! rendered as a [`PredictionReport`].
//!
//! ```text
//! BookingForm ──try_from──► BookingQuery ──► FeatureRow ──► Predictor
//!                                                              │
//!                     PredictionReport ◄── Recommendation ◄── Prediction
//! ```
//!
//! This crate is synchronous and performs no I/O beyond reading the model
//! and metrics artifacts once at startup.

pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod query;
pub mod recommendation;
pub mod report;

pub use error::{ArtifactError, Error, PredictError, QueryError};
pub use features::{FeatureRow, FeatureValue, COLUMNS};
pub use metrics::{load_metrics, ModelMetrics};
pub use model::{load_model, BookingOutcome, ModelArtifact, Prediction, Predictor};
pub use query::{
    BookingForm, BookingOrigin, BookingQuery, FlightDay, SalesChannel, TripType,
};
pub use recommendation::{recommend, Recommendation};
pub use report::{assess, Assessment, Banner, PredictionReport};
