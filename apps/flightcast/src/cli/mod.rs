//! # CLI Module
//!
//! Command-line interface for Flightcast.
//!
//! ## Commands
//!
//! - `serve` - Start the HTTP server with the booking form
//! - `predict` - Score one booking from flags
//! - `info` - Show the loaded model and its deployment metrics
//!
//! Artifacts are located with the global `--model` and `--metrics` flags.

use crate::api::{self, AppState};
use clap::{Args, Parser, Subcommand};
use flightcast_core::{
    assess, load_metrics, load_model, BookingForm, BookingQuery, Error, Predictor,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_PATH: &str = "artifacts/booking_predictor.json";
pub const DEFAULT_METRICS_PATH: &str = "artifacts/deployment_artifacts.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "flightcast")]
#[command(author, version, about = "Flight booking completion predictor", long_about = None)]
pub struct Cli {
    /// Path to the model artifact
    #[arg(long, global = true, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Path to the deployment metrics artifact
    #[arg(long, global = true, default_value = DEFAULT_METRICS_PATH)]
    pub metrics: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },

    /// Score one booking
    Predict(PredictArgs),

    /// Show model information and metrics
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Booking fields as flags. Omitted flags take the page defaults.
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long, default_value_t = 1)]
    pub passengers: i64,

    #[arg(long, default_value = "Internet")]
    pub sales_channel: String,

    #[arg(long, default_value = "RoundTrip")]
    pub trip_type: String,

    /// Days between purchase and departure
    #[arg(long, default_value_t = 30)]
    pub purchase_lead: i64,

    /// Days at the destination
    #[arg(long, default_value_t = 7)]
    pub length_of_stay: i64,

    /// Departure hour, 0-23
    #[arg(long, default_value_t = 12)]
    pub flight_hour: i64,

    /// Departure weekday (Mon..Sun)
    #[arg(long, default_value = "Mon")]
    pub flight_day: String,

    #[arg(long, default_value = "Australia")]
    pub booking_origin: String,

    #[arg(long)]
    pub extra_baggage: bool,

    #[arg(long)]
    pub preferred_seat: bool,

    #[arg(long)]
    pub in_flight_meals: bool,

    /// Flight duration in hours
    #[arg(long, default_value_t = 5.0)]
    pub flight_duration: f64,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn to_form(&self) -> BookingForm {
        BookingForm {
            num_passengers: self.passengers,
            sales_channel: self.sales_channel.clone(),
            trip_type: self.trip_type.clone(),
            purchase_lead: self.purchase_lead,
            length_of_stay: self.length_of_stay,
            flight_hour: self.flight_hour,
            flight_day: self.flight_day.clone(),
            booking_origin: self.booking_origin.clone(),
            wants_extra_baggage: self.extra_baggage,
            wants_preferred_seat: self.preferred_seat,
            wants_in_flight_meals: self.in_flight_meals,
            flight_duration: self.flight_duration,
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Serve { bind } => cmd_serve(&cli.model, &cli.metrics, bind).await,
        Command::Predict(args) => cmd_predict(&cli.model, &args.to_form(), args.json),
        Command::Info { json } => cmd_info(&cli.model, &cli.metrics, json),
    }
}

/// Load both artifacts and serve until Ctrl-C.
///
/// Artifacts are loaded before binding, so a bad artifact never leaves a
/// listening server behind.
pub async fn cmd_serve(model_path: &Path, metrics_path: &Path, bind: SocketAddr) -> Result<(), Error> {
    let state = AppState::load(model_path, metrics_path)?;
    api::serve(state, bind).await?;
    Ok(())
}

/// Score one booking and print the report.
pub fn cmd_predict(model_path: &Path, form: &BookingForm, json: bool) -> Result<(), Error> {
    println!("{}", predict_output(model_path, form, json)?);
    Ok(())
}

/// Output of `predict` without printing it.
pub fn predict_output(model_path: &Path, form: &BookingForm, json: bool) -> Result<String, Error> {
    // Validate before touching the artifact so field errors come first.
    BookingQuery::try_from(form)?;

    let model = load_model(model_path)?;
    let assessment = assess(&model, form)?;

    if json {
        Ok(serde_json::to_string_pretty(&assessment)?)
    } else {
        Ok(assessment.report.to_text())
    }
}

/// Print model identity and deployment metrics.
pub fn cmd_info(model_path: &Path, metrics_path: &Path, json: bool) -> Result<(), Error> {
    println!("{}", info_output(model_path, metrics_path, json)?);
    Ok(())
}

/// Output of `info` without printing it.
pub fn info_output(model_path: &Path, metrics_path: &Path, json: bool) -> Result<String, Error> {
    let model = load_model(model_path)?;
    let metrics = load_metrics(metrics_path)?;
    let features = model.feature_names();

    if json {
        let value = json!({
            "model": model.name(),
            "version": model.version(),
            "kind": model.kind(),
            "features": features,
            "model_metrics": metrics,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut output = String::new();
    output.push_str("Model Information\n");
    output.push_str(&format!("  Name:     {}\n", model.name()));
    output.push_str(&format!("  Version:  {}\n", model.version()));
    output.push_str(&format!("  Kind:     {}\n", model.kind()));
    output.push_str(&format!("  Features: {}\n", features.len()));
    for (label, value) in metrics.labels() {
        output.push_str(&format!("  {:<9} {}\n", format!("{label}:"), value));
    }
    Ok(output.trim_end().to_string())
}

// =============================================================================
// TESTS
// =============================================================================
