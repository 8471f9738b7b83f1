//! Food supplier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;


/// A registered food supplier (restaurant, grocery, bakery, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub user_id: String,
    pub business_name: String,
    /// Free-form business category, e.g. `restaurant`, `grocery`, `bakery`
    pub business_type: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<DateTime<Utc>>,
    pub google_place_id: Option<String>,
    /// External review rating on a 0-5 scale
    pub google_rating: Option<f64>,
    pub total_listings: u32,
    pub successful_deliveries: u32,
    /// Derived from the other fields, see [`crate::scoring::compute_safety_rating`]
    pub safety_rating: f64,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    /// License number present and non-blank
    pub fn has_license_number(&self) -> bool {
        self.license_number
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false)
    }

    /// Share of listings that ended in a successful delivery, `None` without history
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_listings == 0 {
            return None;
        }
        let rate = f64::from(self.successful_deliveries) / f64::from(self.total_listings);
        Some(rate.clamp(0.0, 1.0))
    }
}

/// Admin verification state of a supplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
