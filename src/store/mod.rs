//! Saved-trip persistence.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ItineraryDocument, PreferencesRecord, TripRecord};

pub use memory::InMemoryTripStore;

/// Storage for itineraries a user chose to keep.
///
/// Trips are scoped to an owning identity; ids and creation timestamps are
/// assigned by the store.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Save a generated itinerary and return its new id
    async fn save(
        &self,
        owner: &str,
        payload: &PreferencesRecord,
        result: &ItineraryDocument,
    ) -> Result<String>;

    /// All trips of `owner`, newest first
    async fn list(&self, owner: &str) -> Result<Vec<TripRecord>>;

    async fn get(&self, owner: &str, id: &str) -> Result<Option<TripRecord>>;

    /// Returns whether a trip was removed
    async fn delete(&self, owner: &str, id: &str) -> Result<bool>;
}
