//! # Booking Query
//!
//! The fixed-schema record that describes one browsing session.
//!
//! Raw values arrive as a [`BookingForm`] (HTML form, JSON body or CLI flags)
//! and are validated into a [`BookingQuery`]. Once constructed, a query is
//! always within its domain: its fields are private and only readable.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// FIELD DOMAINS
// =============================================================================

pub const PASSENGERS_MIN: i64 = 1;
pub const PASSENGERS_MAX: i64 = 10;
pub const PURCHASE_LEAD_MIN: i64 = 0;
pub const PURCHASE_LEAD_MAX: i64 = 365;
pub const LENGTH_OF_STAY_MIN: i64 = 1;
pub const LENGTH_OF_STAY_MAX: i64 = 365;
pub const FLIGHT_HOUR_MIN: i64 = 0;
pub const FLIGHT_HOUR_MAX: i64 = 23;
pub const FLIGHT_DURATION_MIN: f64 = 1.0;
pub const FLIGHT_DURATION_MAX: f64 = 24.0;

// =============================================================================
// CLOSED SELECTIONS
// =============================================================================

/// Declares a closed selection: an enum whose variants render as a
/// fixed option list and parse only from their exact labels.
macro_rules! closed_choice {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, default = $default:ident,
        { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Field name in the booking schema.
            pub const FIELD: &'static str = $field;

            /// The label passed to the model and shown in the form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = QueryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(QueryError::unknown_variant($field, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_choice! {
    /// Channel the booking session came through.
    SalesChannel, field = "sales_channel", default = Internet,
    {
        Internet => "Internet",
        Mobile => "Mobile",
    }
}

closed_choice! {
    /// Itinerary shape.
    TripType, field = "trip_type", default = RoundTrip,
    {
        RoundTrip => "RoundTrip",
        OneWay => "OneWay",
        CircleTrip => "CircleTrip",
    }
}

closed_choice! {
    /// Country the booking originated from.
    BookingOrigin, field = "booking_origin", default = Australia,
    {
        Australia => "Australia",
        Malaysia => "Malaysia",
        China => "China",
        Japan => "Japan",
        Uk => "UK",
        Us => "US",
        Germany => "Germany",
    }
}

closed_choice! {
    /// Day of the week the flight departs.
    ///
    /// Shown as a three-letter label and passed to the model as its
    /// ordinal (Mon=1 .. Sun=7).
    FlightDay, field = "flight_day", default = Mon,
    {
        Mon => "Mon",
        Tue => "Tue",
        Wed => "Wed",
        Thu => "Thu",
        Fri => "Fri",
        Sat => "Sat",
        Sun => "Sun",
    }
}

impl FlightDay {
    /// Parse a three-letter weekday label.
    pub fn from_label(label: &str) -> Result<Self, QueryError> {
        label.parse()
    }

    /// Ordinal passed to the model, Mon=1 through Sun=7.
    pub fn ordinal(&self) -> u8 {
        match self {
            FlightDay::Mon => 1,
            FlightDay::Tue => 2,
            FlightDay::Wed => 3,
            FlightDay::Thu => 4,
            FlightDay::Fri => 5,
            FlightDay::Sat => 6,
            FlightDay::Sun => 7,
        }
    }

    /// Inverse of [`FlightDay::ordinal`].
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|day| day.ordinal() == ordinal)
    }
}

/// Encode a checkbox as the 0/1 integer the model expects.
pub fn flag(value: bool) -> u8 {
    u8::from(value)
}

// =============================================================================
// RAW FORM INPUT
// =============================================================================

/// Unvalidated booking fields as submitted.
///
/// Every field has a default, so a partial submission (an unchecked
/// checkbox, a JSON body with omitted keys) still yields a complete form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub num_passengers: i64,
    pub sales_channel: String,
    pub trip_type: String,
    pub purchase_lead: i64,
    pub length_of_stay: i64,
    pub flight_hour: i64,
    pub flight_day: String,
    pub booking_origin: String,
    pub wants_extra_baggage: bool,
    pub wants_preferred_seat: bool,
    pub wants_in_flight_meals: bool,
    pub flight_duration: f64,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::from(&BookingQuery::default())
    }
}

impl From<&BookingQuery> for BookingForm {
    fn from(query: &BookingQuery) -> Self {
        Self {
            num_passengers: query.num_passengers.into(),
            sales_channel: query.sales_channel.as_str().to_string(),
            trip_type: query.trip_type.as_str().to_string(),
            purchase_lead: query.purchase_lead.into(),
            length_of_stay: query.length_of_stay.into(),
            flight_hour: query.flight_hour.into(),
            flight_day: query.flight_day.as_str().to_string(),
            booking_origin: query.booking_origin.as_str().to_string(),
            wants_extra_baggage: query.wants_extra_baggage,
            wants_preferred_seat: query.wants_preferred_seat,
            wants_in_flight_meals: query.wants_in_flight_meals,
            flight_duration: query.flight_duration,
        }
    }
}

// =============================================================================
// BOOKING QUERY
// =============================================================================

/// One validated booking session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingQuery {
    num_passengers: u8,
    sales_channel: SalesChannel,
    trip_type: TripType,
    purchase_lead: u16,
    length_of_stay: u16,
    flight_hour: u8,
    flight_day: FlightDay,
    booking_origin: BookingOrigin,
    wants_extra_baggage: bool,
    wants_preferred_seat: bool,
    wants_in_flight_meals: bool,
    flight_duration: f64,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            num_passengers: 1,
            sales_channel: SalesChannel::default(),
            trip_type: TripType::default(),
            purchase_lead: 30,
            length_of_stay: 7,
            flight_hour: 12,
            flight_day: FlightDay::default(),
            booking_origin: BookingOrigin::default(),
            wants_extra_baggage: false,
            wants_preferred_seat: false,
            wants_in_flight_meals: false,
            flight_duration: 5.0,
        }
    }
}

impl TryFrom<BookingForm> for BookingQuery {
    type Error = QueryError;

    fn try_from(form: BookingForm) -> Result<Self, Self::Error> {
        Self::try_from(&form)
    }
}

impl TryFrom<&BookingForm> for BookingQuery {
    type Error = QueryError;

    fn try_from(form: &BookingForm) -> Result<Self, Self::Error> {
        Ok(Self {
            num_passengers: bounded(
                "num_passengers",
                form.num_passengers,
                PASSENGERS_MIN,
                PASSENGERS_MAX,
            )?,
            sales_channel: form.sales_channel.parse()?,
            trip_type: form.trip_type.parse()?,
            purchase_lead: bounded(
                "purchase_lead",
                form.purchase_lead,
                PURCHASE_LEAD_MIN,
                PURCHASE_LEAD_MAX,
            )?,
            length_of_stay: bounded(
                "length_of_stay",
                form.length_of_stay,
                LENGTH_OF_STAY_MIN,
                LENGTH_OF_STAY_MAX,
            )?,
            flight_hour: bounded(
                "flight_hour",
                form.flight_hour,
                FLIGHT_HOUR_MIN,
                FLIGHT_HOUR_MAX,
            )?,
            flight_day: FlightDay::from_label(&form.flight_day)?,
            booking_origin: form.booking_origin.parse()?,
            wants_extra_baggage: form.wants_extra_baggage,
            wants_preferred_seat: form.wants_preferred_seat,
            wants_in_flight_meals: form.wants_in_flight_meals,
            flight_duration: duration(form.flight_duration)?,
        })
    }
}

/// Range-check an integer field and narrow it to its storage type.
fn bounded<T: TryFrom<i64>>(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<T, QueryError> {
    if !(min..=max).contains(&value) {
        return Err(QueryError::out_of_range(field, value, min, max));
    }
    T::try_from(value).map_err(|_| QueryError::out_of_range(field, value, min, max))
}

fn duration(value: f64) -> Result<f64, QueryError> {
    if !value.is_finite() {
        return Err(QueryError::NotFinite {
            field: "flight_duration",
        });
    }
    if !(FLIGHT_DURATION_MIN..=FLIGHT_DURATION_MAX).contains(&value) {
        return Err(QueryError::out_of_range(
            "flight_duration",
            value,
            format!("{FLIGHT_DURATION_MIN:.1}"),
            format!("{FLIGHT_DURATION_MAX:.1}"),
        ));
    }
    Ok(value)
}

impl BookingQuery {
    pub fn num_passengers(&self) -> u8 {
        self.num_passengers
    }

    pub fn sales_channel(&self) -> SalesChannel {
        self.sales_channel
    }

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn purchase_lead(&self) -> u16 {
        self.purchase_lead
    }

    pub fn length_of_stay(&self) -> u16 {
        self.length_of_stay
    }

    pub fn flight_hour(&self) -> u8 {
        self.flight_hour
    }

    pub fn flight_day(&self) -> FlightDay {
        self.flight_day
    }

    pub fn booking_origin(&self) -> BookingOrigin {
        self.booking_origin
    }

    pub fn wants_extra_baggage(&self) -> bool {
        self.wants_extra_baggage
    }

    pub fn wants_preferred_seat(&self) -> bool {
        self.wants_preferred_seat
    }

    pub fn wants_in_flight_meals(&self) -> bool {
        self.wants_in_flight_meals
    }

    pub fn flight_duration(&self) -> f64 {
        self.flight_duration
    }
}

// =============================================================================
// TESTS
// =============================================================================
