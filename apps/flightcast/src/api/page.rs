//! # Form Page
//!
//! Server-rendered HTML for the single booking page.
//!
//! Every control is bounded to its field's domain: sliders and number inputs
//! carry min/max, categoricals are closed `<select>` lists, preferences are
//! checkboxes. The page is re-rendered from the submitted values on every
//! request, so no state lives on the server between interactions.

use flightcast_core::query::{
    FLIGHT_DURATION_MAX, FLIGHT_DURATION_MIN, FLIGHT_HOUR_MAX, FLIGHT_HOUR_MIN,
    LENGTH_OF_STAY_MAX, LENGTH_OF_STAY_MIN, PASSENGERS_MAX, PASSENGERS_MIN, PURCHASE_LEAD_MAX,
    PURCHASE_LEAD_MIN,
};
use flightcast_core::{
    BookingForm, BookingOrigin, FlightDay, ModelMetrics, PredictionReport, SalesChannel, TripType,
};

pub const TITLE: &str = "Flight Booking Completion Predictor";
pub const SUBTITLE: &str = "Predict whether a customer will complete their flight booking";
pub const FOOTER: &str = "Built with gradient-boosted trees • Model updated with latest booking data";

/// What the result section shows after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The form was scored.
    Scored(PredictionReport),
    /// A field was outside its domain; nothing was scored.
    Invalid(String),
    /// The predictor failed on a valid form.
    Failed(String),
}

/// Render the full page.
pub fn render(
    metrics: &ModelMetrics,
    model_name: &str,
    form: &BookingForm,
    outcome: Option<&Outcome>,
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>✈️ {TITLE}</title>\n"));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    html.push_str(&sidebar(metrics, model_name));

    html.push_str("<main>\n");
    html.push_str(&format!("<h1>✈️ {TITLE}</h1>\n<p>{SUBTITLE}</p>\n"));
    html.push_str(&booking_form(form));
    if let Some(outcome) = outcome {
        html.push_str(&result_section(outcome));
    }
    html.push_str(&format!("<hr>\n<footer><em>{FOOTER}</em></footer>\n"));
    html.push_str("</main>\n</body>\n</html>\n");

    html
}

fn sidebar(metrics: &ModelMetrics, model_name: &str) -> String {
    let mut html = String::from("<aside>\n<h2>Model Information</h2>\n");
    html.push_str(&format!(
        "<p class=\"model\">{}</p>\n",
        escape_html(model_name)
    ));
    for (label, value) in metrics.labels() {
        html.push_str(&format!(
            "<div class=\"metric\"><span>{label}</span><strong>{value}</strong></div>\n"
        ));
    }
    html.push_str("</aside>\n");
    html
}

fn booking_form(form: &BookingForm) -> String {
    let mut html = String::from("<form method=\"post\" action=\"/\">\n<h2>Booking Details</h2>\n");
    html.push_str("<div class=\"columns\">\n<div>\n");

    html.push_str(&slider(
        "num_passengers",
        "Number of Passengers",
        form.num_passengers,
        PASSENGERS_MIN,
        PASSENGERS_MAX,
    ));
    html.push_str(&select(
        "sales_channel",
        "Sales Channel",
        SalesChannel::ALL.iter().map(|c| c.as_str()),
        &form.sales_channel,
    ));
    html.push_str(&select(
        "trip_type",
        "Trip Type",
        TripType::ALL.iter().map(|t| t.as_str()),
        &form.trip_type,
    ));
    html.push_str(&number(
        "purchase_lead",
        "Purchase Lead (days)",
        &form.purchase_lead.to_string(),
        &PURCHASE_LEAD_MIN.to_string(),
        &PURCHASE_LEAD_MAX.to_string(),
        "1",
    ));
    html.push_str(&number(
        "length_of_stay",
        "Length of Stay (days)",
        &form.length_of_stay.to_string(),
        &LENGTH_OF_STAY_MIN.to_string(),
        &LENGTH_OF_STAY_MAX.to_string(),
        "1",
    ));

    html.push_str("</div>\n<div>\n");

    html.push_str(&slider(
        "flight_hour",
        "Flight Hour",
        form.flight_hour,
        FLIGHT_HOUR_MIN,
        FLIGHT_HOUR_MAX,
    ));
    html.push_str(&select(
        "flight_day",
        "Flight Day",
        FlightDay::ALL.iter().map(|d| d.as_str()),
        &form.flight_day,
    ));
    html.push_str(&select(
        "booking_origin",
        "Booking Origin",
        BookingOrigin::ALL.iter().map(|o| o.as_str()),
        &form.booking_origin,
    ));
    html.push_str(&number(
        "flight_duration",
        "Flight Duration (hours)",
        &form.flight_duration.to_string(),
        &format!("{FLIGHT_DURATION_MIN:.1}"),
        &format!("{FLIGHT_DURATION_MAX:.1}"),
        "0.01",
    ));

    html.push_str("</div>\n</div>\n<h3>Customer Preferences</h3>\n<div class=\"columns three\">\n");
    html.push_str(&checkbox(
        "wants_extra_baggage",
        "Extra Baggage",
        form.wants_extra_baggage,
    ));
    html.push_str(&checkbox(
        "wants_preferred_seat",
        "Preferred Seat",
        form.wants_preferred_seat,
    ));
    html.push_str(&checkbox(
        "wants_in_flight_meals",
        "In-Flight Meals",
        form.wants_in_flight_meals,
    ));
    html.push_str("</div>\n");

    html.push_str("<button type=\"submit\">Predict Booking Completion</button>\n</form>\n");
    html
}

fn slider(name: &str, label: &str, value: i64, min: i64, max: i64) -> String {
    let value = value.clamp(min, max);
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" \
         value=\"{value}\" oninput=\"this.nextElementSibling.value=this.value\">\
         <output>{value}</output>\n"
    )
}

fn number(name: &str, label: &str, value: &str, min: &str, max: &str, step: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" \
         step=\"{step}\" value=\"{value}\" required>\n"
    )
}

fn select<'a>(
    name: &str,
    label: &str,
    options: impl Iterator<Item = &'a str>,
    selected: &str,
) -> String {
    let mut html = format!("<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\n");
    for option in options {
        let marker = if option == selected { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{option}\"{marker}>{option}</option>\n"));
    }
    html.push_str("</select>\n");
    html
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let marker = if checked { " checked" } else { "" };
    format!(
        "<label class=\"check\"><input type=\"checkbox\" name=\"{name}\" value=\"true\"{marker}> {label}</label>\n"
    )
}

fn result_section(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Scored(report) => {
            let (class, marker) = if report.banner.is_success() {
                ("success", "✅")
            } else {
                ("error", "❌")
            };
            let mut html = String::from("<section id=\"result\">\n<h2>Prediction Result</h2>\n");
            html.push_str(&format!(
                "<div class=\"banner {class}\">{marker} {}</div>\n",
                escape_html(report.banner.message())
            ));
            html.push_str("<h3>Confidence Level</h3>\n");
            html.push_str(&format!(
                "<progress max=\"1\" value=\"{:.4}\">{}</progress>\n",
                report.probability, report.percent
            ));
            html.push_str(&format!("<p>{}</p>\n", report.confidence_line()));
            html.push_str("<h3>Recommendations</h3>\n");
            html.push_str(&format!(
                "<div class=\"banner info\">💡 {}</div>\n",
                report.recommendation.text()
            ));
            html.push_str("</section>\n");
            html
        }
        Outcome::Invalid(message) => format!(
            "<section id=\"result\">\n<div class=\"banner error\">Invalid booking details: {}</div>\n</section>\n",
            escape_html(message)
        ),
        Outcome::Failed(message) => format!(
            "<section id=\"result\">\n<div class=\"banner error\">Prediction error: {}</div>\n</section>\n",
            escape_html(message)
        ),
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"<style>
body { display: flex; margin: 0; font-family: system-ui, sans-serif; color: #262730; }
aside { width: 16rem; padding: 1.5rem; background: #f0f2f6; min-height: 100vh; }
main { flex: 1; max-width: 46rem; padding: 1.5rem 3rem; }
.metric { display: flex; flex-direction: column; margin: 0.75rem 0; }
.metric strong { font-size: 1.75rem; }
.model { font-size: 0.85rem; color: #6b6f7b; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.columns.three { grid-template-columns: 1fr 1fr 1fr; gap: 1rem; }
label { display: block; margin-top: 0.75rem; }
label.check { display: inline-block; }
input[type=number], select { width: 100%; padding: 0.3rem; }
input[type=range] { width: 80%; }
button { margin-top: 1.5rem; padding: 0.5rem 1rem; }
progress { width: 100%; height: 1rem; }
.banner { padding: 0.75rem 1rem; border-radius: 0.4rem; margin: 0.5rem 0; }
.success { background: #dff5e3; }
.error { background: #fde2e1; }
.info { background: #e1effe; }
</style>
"#;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use flightcast_core::{BookingOutcome, Prediction};

    fn metrics() -> ModelMetrics {
        ModelMetrics {
            accuracy: 0.8512,
            roc_auc: 0.7794,
            f1_score: 0.4318,
        }
    }

    #[test]
    fn page_shows_sidebar_metrics() {
        let html = render(&metrics(), "gbt", &BookingForm::default(), None);
        assert!(html.contains("Model Information"));
        assert!(html.contains("85.1%"));
        assert!(html.contains("0.779"));
        assert!(html.contains("0.432"));
        assert!(!html.contains("Prediction Result"));
    }

    #[test]
    fn controls_are_bounded() {
        let html = render(&metrics(), "gbt", &BookingForm::default(), None);
        assert!(html.contains(
            "name=\"num_passengers\" min=\"1\" max=\"10\""
        ));
        assert!(html.contains("name=\"flight_hour\" min=\"0\" max=\"23\""));
        assert!(html.contains("name=\"purchase_lead\" min=\"0\" max=\"365\""));
        assert!(html.contains("name=\"length_of_stay\" min=\"1\" max=\"365\""));
        assert!(html.contains("name=\"flight_duration\" min=\"1.0\" max=\"24.0\""));
    }

    #[test]
    fn selects_mark_current_value() {
        let form = BookingForm {
            flight_day: "Thu".into(),
            booking_origin: "UK".into(),
            ..BookingForm::default()
        };
        let html = render(&metrics(), "gbt", &form, None);
        assert!(html.contains("<option value=\"Thu\" selected>Thu</option>"));
        assert!(html.contains("<option value=\"UK\" selected>UK</option>"));
        assert!(html.contains("<option value=\"Mon\">Mon</option>"));
    }

    #[test]
    fn checkboxes_default_unchecked() {
        let html = render(&metrics(), "gbt", &BookingForm::default(), None);
        assert!(!html.contains(" checked"));
    }

    #[test]
    fn scored_result_renders_banner_gauge_and_advice() {
        let prediction = Prediction::new(BookingOutcome::Completed, 0.9).unwrap();
        let outcome = Outcome::Scored(PredictionReport::new(&prediction));
        let html = render(&metrics(), "gbt", &BookingForm::default(), Some(&outcome));

        assert!(html.contains("Prediction Result"));
        assert!(html.contains("banner success"));
        assert!(html.contains("<progress max=\"1\" value=\"0.9000\">"));
        assert!(html.contains("Confidence: 90.0%"));
        assert!(html.contains("smooth checkout"));
    }

    #[test]
    fn failure_message_is_escaped() {
        let outcome = Outcome::Failed("feature '<script>' missing".into());
        let html = render(&metrics(), "gbt", &BookingForm::default(), Some(&outcome));
        assert!(html.contains("Prediction error: feature &#39;&lt;script&gt;&#39; missing"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn duration_is_shown_as_submitted() {
        let form = BookingForm {
            flight_duration: 23.999,
            ..BookingForm::default()
        };
        let html = render(&metrics(), "gbt", &form, None);
        assert!(html.contains("step=\"0.01\" value=\"23.999\""));
        assert!(!html.contains("24.00"));
    }
}
