//! Receiving organization models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// Radius applied when an organization has not configured one
pub const DEFAULT_MAX_RADIUS_KM: f64 = 10.0;

/// An organization that picks up and redistributes surplus food
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub organization_type: OrganizationType,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub license_number: Option<String>,
    pub is_verified: bool,
    pub registration_date: DateTime<Utc>,
    pub preferences: Option<OrganizationPreferences>,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn coordinates(&self) -> GpsCoordinates {
        GpsCoordinates::new(self.latitude, self.longitude)
    }

    /// Notification radius in km, falling back to `default_km` when unset
    pub fn max_radius_km(&self, default_km: f64) -> f64 {
        self.preferences
            .as_ref()
            .and_then(|p| p.max_radius)
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(default_km)
    }
}

/// Kinds of receiving organizations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Ngo,
    HomeCare,
    FoodBank,
}

impl std::fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationType::Ngo => write!(f, "NGO"),
            OrganizationType::HomeCare => write!(f, "Home Care"),
            OrganizationType::FoodBank => write!(f, "Food Bank"),
        }
    }
}

/// Pickup preferences of an organization.
///
/// Only `max_radius` takes part in notification matching; food types and
/// pickup times are informational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPreferences {
    #[serde(default)]
    pub food_types: Vec<String>,
    /// Kilometres
    #[serde(default)]
    pub max_radius: Option<f64>,
    #[serde(default)]
    pub preferred_pickup_times: Vec<String>,
}
