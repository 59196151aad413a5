//! # Feature Row
//!
//! The single-row, fixed-schema record handed to a [`Predictor`](crate::Predictor).
//!
//! Columns follow the booking schema order. Numeric columns carry the value
//! the model sees (weekday as its ordinal, checkboxes as 0/1). Categorical
//! columns carry the option label unchanged; models that need indicator
//! inputs address them as `column=Variant`.

use crate::query::{flag, BookingOrigin, BookingQuery, SalesChannel, TripType};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column names, in schema order.
pub const COLUMNS: [&str; 12] = [
    "num_passengers",
    "sales_channel",
    "trip_type",
    "purchase_lead",
    "length_of_stay",
    "flight_hour",
    "flight_day",
    "booking_origin",
    "wants_extra_baggage",
    "wants_preferred_seat",
    "wants_in_flight_meals",
    "flight_duration",
];

/// Separator between a categorical column and one of its options.
pub const ONE_HOT_SEPARATOR: char = '=';

/// A single cell of the feature row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// Count, day, hour or 0/1 flag.
    Integer(i64),
    /// Continuous measurement.
    Number(f64),
    Category(&'static str),
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Integer(n) => serializer.serialize_i64(*n),
            FeatureValue::Number(n) => serializer.serialize_f64(*n),
            FeatureValue::Category(c) => serializer.serialize_str(c),
        }
    }
}

/// One booking query laid out as named model inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    cells: [(&'static str, FeatureValue); 12],
}

impl FeatureRow {
    /// Assemble the row for a validated query.
    pub fn from_query(query: &BookingQuery) -> Self {
        use FeatureValue::{Category, Integer, Number};

        Self {
            cells: [
                ("num_passengers", Integer(query.num_passengers().into())),
                ("sales_channel", Category(query.sales_channel().as_str())),
                ("trip_type", Category(query.trip_type().as_str())),
                ("purchase_lead", Integer(query.purchase_lead().into())),
                ("length_of_stay", Integer(query.length_of_stay().into())),
                ("flight_hour", Integer(query.flight_hour().into())),
                ("flight_day", Integer(query.flight_day().ordinal().into())),
                ("booking_origin", Category(query.booking_origin().as_str())),
                (
                    "wants_extra_baggage",
                    Integer(flag(query.wants_extra_baggage()).into()),
                ),
                (
                    "wants_preferred_seat",
                    Integer(flag(query.wants_preferred_seat()).into()),
                ),
                (
                    "wants_in_flight_meals",
                    Integer(flag(query.wants_in_flight_meals()).into()),
                ),
                ("flight_duration", Number(query.flight_duration())),
            ],
        }
    }

    /// Look up a column by name.
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Resolve a model input to a number.
    ///
    /// Accepts plain numeric columns and one-hot names (`booking_origin=UK`).
    /// Returns `None` for names outside the schema, for categorical columns
    /// addressed without an option, and for options the column does not have.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match name.split_once(ONE_HOT_SEPARATOR) {
            Some((column, option)) => match self.get(column)? {
                FeatureValue::Category(selected) if is_known_option(column, option) => {
                    Some(if *selected == option { 1.0 } else { 0.0 })
                }
                _ => None,
            },
            None => match self.get(name)? {
                FeatureValue::Integer(n) => Some(*n as f64),
                FeatureValue::Number(n) => Some(*n),
                FeatureValue::Category(_) => None,
            },
        }
    }

    /// Iterate over `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        self.cells.iter().copied()
    }
}

impl From<&BookingQuery> for FeatureRow {
    fn from(query: &BookingQuery) -> Self {
        Self::from_query(query)
    }
}

impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn is_known_option(column: &str, option: &str) -> bool {
    match column {
        SalesChannel::FIELD => option.parse::<SalesChannel>().is_ok(),
        TripType::FIELD => option.parse::<TripType>().is_ok(),
        BookingOrigin::FIELD => option.parse::<BookingOrigin>().is_ok(),
        _ => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
