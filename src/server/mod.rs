//! HTTP surface: itinerary generation plus per-user saved trips.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::core::ItineraryPlanner;
use crate::error::PlannerError;
use crate::schemas::{decode_record, RecordSchema};
use crate::store::TripStore;
use crate::types::{ItineraryDocument, PreferencesRecord, SaveTripRequest, TripRecord};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<ItineraryPlanner>,
    pub trips: Arc<dyn TripStore>,
}

impl AppState {
    pub fn new(planner: ItineraryPlanner, trips: Arc<dyn TripStore>) -> Self {
        Self {
            planner: Arc::new(planner),
            trips,
        }
    }
}

/// Error returned from handlers; renders the structured error payload
#[derive(Debug)]
pub struct ApiError(pub PlannerError);

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(target: "tripplanner::server", code = self.0.error_code(), "{}", self.0);
        } else {
            warn!(target: "tripplanner::server", code = self.0.error_code(), "{}", self.0);
        }
        (status, Json(self.0.to_error_payload())).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/itinerary", post(generate_itinerary))
        .route(
            "/api/users/{owner}/trips",
            get(list_trips).post(save_trip),
        )
        .route(
            "/api/users/{owner}/trips/{id}",
            get(get_trip).delete(delete_trip),
        )
        .with_state(state)
}

pub async fn serve(listen: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("bind server listener on {listen} failed"))?;
    info!(target: "tripplanner::server", "listening on http://{}", listen);
    axum::serve(listener, router(state))
        .await
        .context("server terminated with error")
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({"status":"ok"}))
}

async fn generate_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ItineraryDocument>, ApiError> {
    let preferences: PreferencesRecord = decode_body(&body)?;
    let document = state.planner.generate(&preferences).await?;
    Ok(Json(document))
}

async fn list_trips(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<Vec<TripRecord>>, ApiError> {
    Ok(Json(state.trips.list(&owner).await?))
}

async fn save_trip(
    State(state): State<AppState>,
    Path(owner): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: SaveTripRequest = decode_body(&body)?;
    let id = state
        .trips
        .save(&owner, &request.payload, &request.result)
        .await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

async fn get_trip(
    State(state): State<AppState>,
    Path((owner, id)): Path<(String, String)>,
) -> Result<Json<TripRecord>, ApiError> {
    state
        .trips
        .get(&owner, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError(PlannerError::TripNotFound(id)))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path((owner, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    if state.trips.delete(&owner, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError(PlannerError::TripNotFound(id)))
    }
}

fn decode_body<T: RecordSchema + DeserializeOwned>(body: &[u8]) -> Result<T, PlannerError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        PlannerError::InputShape(format!("request body is not valid JSON: {err}"))
    })?;
    decode_record(value)
}
