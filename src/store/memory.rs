use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{PlannerError, Result};
use crate::store::TripStore;
use crate::types::{ItineraryDocument, PreferencesRecord, TripRecord};

const DEFAULT_TRIPS_PER_OWNER: usize = 500;

#[derive(Debug, Clone)]
struct StoredTrip {
    sequence: u64,
    record: TripRecord,
}

/// In-memory trip store for development and testing.
///
/// Each owner keeps at most `max_trips_per_owner` trips; saving beyond that
/// evicts the oldest one.
#[derive(Debug)]
pub struct InMemoryTripStore {
    trips: RwLock<HashMap<String, Vec<StoredTrip>>>,
    sequence: AtomicU64,
    max_trips_per_owner: usize,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::with_max_trips_per_owner(DEFAULT_TRIPS_PER_OWNER)
    }

    pub fn with_max_trips_per_owner(max_trips_per_owner: usize) -> Self {
        Self {
            trips: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            max_trips_per_owner: max_trips_per_owner.max(1),
        }
    }
}

impl Default for InMemoryTripStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn save(
        &self,
        owner: &str,
        payload: &PreferencesRecord,
        result: &ItineraryDocument,
    ) -> Result<String> {
        let mut trips = self
            .trips
            .write()
            .map_err(|e| PlannerError::Persistence(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let bucket = trips.entry(owner.to_string()).or_default();
        if bucket.len() >= self.max_trips_per_owner {
            // buckets are append-only, so the front is the oldest
            let evicted = bucket.remove(0);
            debug!(target: "tripplanner::store", owner, id = %evicted.record.id, "evicted oldest trip");
        }

        bucket.push(StoredTrip {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
            record: TripRecord {
                id: id.clone(),
                payload: payload.clone(),
                result: result.clone(),
                created_at: Utc::now(),
            },
        });

        debug!(target: "tripplanner::store", owner, id = %id, "trip saved");
        Ok(id)
    }

    async fn list(&self, owner: &str) -> Result<Vec<TripRecord>> {
        let trips = self
            .trips
            .read()
            .map_err(|e| PlannerError::Persistence(e.to_string()))?;

        let mut stored: Vec<&StoredTrip> = trips
            .get(owner)
            .map(|bucket| bucket.iter().collect())
            .unwrap_or_default();
        stored.sort_by(|a, b| {
            (b.record.created_at, b.sequence).cmp(&(a.record.created_at, a.sequence))
        });

        Ok(stored.into_iter().map(|s| s.record.clone()).collect())
    }

    async fn get(&self, owner: &str, id: &str) -> Result<Option<TripRecord>> {
        let trips = self
            .trips
            .read()
            .map_err(|e| PlannerError::Persistence(e.to_string()))?;

        Ok(trips
            .get(owner)
            .and_then(|bucket| bucket.iter().find(|s| s.record.id == id))
            .map(|s| s.record.clone()))
    }

    async fn delete(&self, owner: &str, id: &str) -> Result<bool> {
        let mut trips = self
            .trips
            .write()
            .map_err(|e| PlannerError::Persistence(e.to_string()))?;

        let Some(bucket) = trips.get_mut(owner) else {
            return Ok(false);
        };
        let before = bucket.len();
        bucket.retain(|s| s.record.id != id);
        let removed = bucket.len() != before;
        if bucket.is_empty() {
            trips.remove(owner);
        }
        Ok(removed)
    }
}
