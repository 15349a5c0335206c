use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record_schema;

/// Destination sentinel meaning "suggest one for me" (compared case-insensitively).
pub const UNSURE_DESTINATION: &str = "unsure";

/// Travel preferences submitted by a user.
///
/// Field names are Rust-side only; the serialized form uses the human-readable
/// labels the web form sends (`"Time of Year"`, `"Travellers"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PreferencesRecord {
    /// Requested destination, or "Unsure" / absent to have one suggested
    #[serde(
        rename = "Destination",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
    /// Month or season of travel (e.g. "December")
    #[serde(rename = "Time of Year")]
    #[schemars(length(min = 1))]
    pub time_of_year: String,
    /// Trip length (e.g. "5 Days")
    #[serde(rename = "Travel Duration")]
    #[schemars(length(min = 1))]
    pub travel_duration: String,
    /// Budget description (e.g. "50000 rupees per head")
    #[serde(rename = "Budget")]
    #[schemars(length(min = 1))]
    pub budget: String,
    /// Comma separated interests (e.g. "adventure, food")
    #[serde(rename = "Travel Themes")]
    #[schemars(length(min = 1))]
    pub travel_themes: String,
    /// Party composition (e.g. "Adults: 2, Children: 1")
    #[serde(rename = "Travellers")]
    #[schemars(length(min = 1))]
    pub travellers: String,
}

record_schema!(PreferencesRecord, "preferences");

impl PreferencesRecord {
    pub fn new(
        time_of_year: impl Into<String>,
        travel_duration: impl Into<String>,
        budget: impl Into<String>,
        travel_themes: impl Into<String>,
        travellers: impl Into<String>,
    ) -> Self {
        Self {
            destination: None,
            time_of_year: time_of_year.into(),
            travel_duration: travel_duration.into(),
            budget: budget.into(),
            travel_themes: travel_themes.into(),
            travellers: travellers.into(),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// The destination the user asked for, unless it is missing, empty or the "unsure" sentinel.
    /// Any other text, including whitespace, is passed through unchanged.
    pub fn explicit_destination(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case(UNSURE_DESTINATION))
    }

    pub fn needs_destination(&self) -> bool {
        self.explicit_destination().is_none()
    }
}
