//! Cold-chain sensor readings for listings awaiting pickup

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use shared::SensorReading;

use crate::error::{check, AppError, AppResult};
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct SensorService {
    store: Arc<MemoryStore>,
}

/// A reading pushed by a storage sensor
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReadingInput {
    pub temperature: f64,
    pub humidity: f64,
    /// Defaults to the time of receipt
    pub timestamp: Option<DateTime<Utc>>,
}

impl SensorService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, listing_id: Uuid, input: RecordReadingInput) -> AppResult<SensorReading> {
        check("temperature", shared::validate_temperature(input.temperature))?;
        check("humidity", shared::validate_humidity(input.humidity))?;
        self.ensure_listing(listing_id).await?;

        let reading = SensorReading {
            id: Uuid::new_v4(),
            listing_id,
            temperature: input.temperature,
            humidity: input.humidity,
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
        };
        tracing::debug!(
            listing_id = %listing_id,
            temperature = reading.temperature,
            humidity = reading.humidity,
            "Sensor reading recorded"
        );
        Ok(self.store.insert_sensor_reading(reading).await)
    }

    /// Readings for a listing, newest first
    pub async fn list(&self, listing_id: Uuid) -> AppResult<Vec<SensorReading>> {
        self.ensure_listing(listing_id).await?;
        Ok(self.store.list_sensor_readings(listing_id).await)
    }

    async fn ensure_listing(&self, listing_id: Uuid) -> AppResult<()> {
        match self.store.get_listing(listing_id).await {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Food listing".to_string())),
        }
    }
}
