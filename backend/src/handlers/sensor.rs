//! HTTP handlers for listing sensor data

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::SensorReading;

use crate::error::AppResult;
use crate::services::sensor::{RecordReadingInput, SensorService};
use crate::AppState;

/// Record a sensor reading for a listing
pub async fn record_sensor_reading(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(input): Json<RecordReadingInput>,
) -> AppResult<(StatusCode, Json<SensorReading>)> {
    let service = SensorService::new(state.store);
    let reading = service.record(listing_id, input).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

/// Get sensor readings for a listing
pub async fn get_sensor_readings(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<Json<Vec<SensorReading>>> {
    let service = SensorService::new(state.store);
    let readings = service.list(listing_id).await?;
    Ok(Json(readings))
}
