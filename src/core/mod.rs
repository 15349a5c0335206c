pub mod planner;
pub mod prompts;
pub mod settings;

pub use planner::{ItineraryPlanner, Section, FALLBACK_DESTINATION};
pub use settings::{BlockThreshold, GenerationSettings, HarmCategory, SafetySetting};
