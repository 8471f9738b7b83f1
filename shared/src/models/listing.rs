//! Surplus food listing models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// A batch of surplus food offered for pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Human readable amount, e.g. "20 meals" or "5 kg"
    pub quantity: String,
    pub category: String,
    pub image_url: Option<String>,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pickup_time_start: DateTime<Utc>,
    pub pickup_time_end: DateTime<Utc>,
    pub freshness_score: i32,
    pub quality_score: i32,
    pub defects_detected: Option<Vec<String>>,
    pub status: ListingStatus,
    pub donor_id: String,
    pub created_at: DateTime<Utc>,
}

impl FoodListing {
    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }

    pub fn is_available(&self) -> bool {
        self.status == ListingStatus::Available
    }
}

/// Listing lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Available,
    Claimed,
    Completed,
    Expired,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Claimed => "claimed",
            ListingStatus::Completed => "completed",
            ListingStatus::Expired => "expired",
        }
    }

    /// Whether a listing may move from `self` to `next`
    pub fn can_transition_to(&self, next: ListingStatus) -> bool {
        matches!(
            (self, next),
            (ListingStatus::Available, ListingStatus::Claimed)
                | (ListingStatus::Available, ListingStatus::Expired)
                | (ListingStatus::Claimed, ListingStatus::Completed)
                | (ListingStatus::Claimed, ListingStatus::Available)
        )
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
