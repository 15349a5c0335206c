use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record_schema;
use crate::types::{ItineraryDocument, PreferencesRecord};

/// A saved itinerary owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    pub payload: PreferencesRecord,
    pub result: ItineraryDocument,
    pub created_at: DateTime<Utc>,
}

/// Body of a save request: the preferences that were submitted and what came back.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaveTripRequest {
    pub payload: PreferencesRecord,
    pub result: ItineraryDocument,
}

record_schema!(SaveTripRequest, "save_trip");
