//! trip-planner-rs: AI-generated travel itineraries
//!
//! Given a set of travel preferences, the [`ItineraryPlanner`] optionally asks
//! a text-generation service to pick a destination, then requests an
//! overview, a day-by-day plan and a budget breakdown concurrently and
//! composes them into one markdown document. Saved itineraries live behind
//! the [`TripStore`] trait, and [`server`] exposes both over HTTP.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{ItineraryPlanner, PreferencesRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = ItineraryPlanner::from_env()?;
//!     let preferences = PreferencesRecord::new(
//!         "December",
//!         "5 Days",
//!         "50000 rupees per head",
//!         "adventure, food",
//!         "Adults: 2",
//!     )
//!     .with_destination("Unsure");
//!
//!     let itinerary = planner.generate(&preferences).await?;
//!     println!("{}", itinerary.final_document);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod store;
pub mod types;

pub use config::PlannerConfig;
pub use crate::core::{GenerationSettings, ItineraryPlanner, Section, FALLBACK_DESTINATION};
pub use error::{PlannerError, Result};
pub use schemas::{decode_record, RecordSchema, SchemaHandle};
pub use services::{GeminiClient, TextGenerator};
pub use store::{InMemoryTripStore, TripStore};
pub use types::{ItineraryDocument, PreferencesRecord, SaveTripRequest, TripForm, TripRecord};

#[cfg(feature = "cli")]
pub mod cli;
