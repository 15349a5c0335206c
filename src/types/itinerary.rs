use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::prompts;

/// Generated itinerary: the three sections plus the composed markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryDocument {
    /// Destination the plan was generated for (resolved when the user was unsure)
    pub destination: String,
    /// Safety, weather, events and etiquette overview
    pub overview: String,
    /// Day-by-day schedule
    pub daily: String,
    /// Accommodation, food and transport cost breakdown
    pub budget: String,
    /// Markdown document combining all sections
    #[serde(rename = "final")]
    pub final_document: String,
}

impl ItineraryDocument {
    /// Assemble a document from its generated sections.
    pub fn from_sections(
        destination: impl Into<String>,
        overview: impl Into<String>,
        daily: impl Into<String>,
        budget: impl Into<String>,
    ) -> Self {
        let destination = destination.into();
        let overview = overview.into();
        let daily = daily.into();
        let budget = budget.into();
        let final_document = prompts::final_document(&destination, &overview, &daily, &budget);

        Self {
            destination,
            overview,
            daily,
            budget,
            final_document,
        }
    }
}
