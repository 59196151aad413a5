//! # Flightcast Library
//!
//! This library exposes the Flightcast modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;

// Re-export flightcast_core for convenience
pub use flightcast_core;
