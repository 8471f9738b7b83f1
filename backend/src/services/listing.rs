//! Food listing service
//!
//! Posting a listing counts it against the donor's supplier profile and fans
//! out `new_listing` notifications to organizations in range.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::{FoodListing, GpsCoordinates, ListingStatus};

use super::{explicit_coordinates, NotificationService, SupplierService};
use crate::error::{check, AppError, AppResult};
use crate::store::MemoryStore;

/// Listing service for posting and moving listings through their lifecycle
#[derive(Clone)]
pub struct ListingService {
    store: Arc<MemoryStore>,
    notifications: NotificationService,
    suppliers: SupplierService,
}

/// Input for posting a listing
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingInput {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "Quantity is required"))]
    pub quantity: String,
    #[validate(length(min = 1, max = 50, message = "Category is required"))]
    pub category: String,
    pub image_url: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pickup_time_start: DateTime<Utc>,
    pub pickup_time_end: DateTime<Utc>,
    pub freshness_score: i32,
    pub quality_score: i32,
    pub defects_detected: Option<Vec<String>>,
    #[validate(length(min = 1, message = "Donor id is required"))]
    pub donor_id: String,
}

/// Partial listing update; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub quantity: Option<String>,
    pub image_url: Option<String>,
    pub pickup_time_start: Option<DateTime<Utc>>,
    pub pickup_time_end: Option<DateTime<Utc>>,
    pub freshness_score: Option<i32>,
    pub quality_score: Option<i32>,
    pub defects_detected: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimListingInput {
    pub organization_id: Uuid,
}

/// A freshly posted listing and the size of its notification fan-out
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListing {
    #[serde(flatten)]
    pub listing: FoodListing,
    pub notifications_sent: usize,
}

fn not_found() -> AppError {
    AppError::NotFound("Food listing".to_string())
}

/// Explicit coordinates are validated; otherwise the location is geocoded,
/// falling back to the default city.
fn listing_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
    location: &str,
) -> AppResult<GpsCoordinates> {
    Ok(explicit_coordinates(latitude, longitude)?
        .unwrap_or_else(|| shared::lookup_city_or_fallback(location)))
}

impl ListingService {
    /// Create a new ListingService instance
    pub fn new(store: Arc<MemoryStore>, default_radius_km: f64) -> Self {
        Self {
            notifications: NotificationService::new(store.clone(), default_radius_km),
            suppliers: SupplierService::new(store.clone()),
            store,
        }
    }

    /// Post a listing and notify nearby organizations
    pub async fn create(&self, input: CreateListingInput) -> AppResult<CreatedListing> {
        input.validate()?;
        check("freshnessScore", shared::validate_score(input.freshness_score))?;
        check("qualityScore", shared::validate_score(input.quality_score))?;
        check(
            "pickupTimeEnd",
            shared::validate_pickup_window(input.pickup_time_start, input.pickup_time_end),
        )?;
        let coords = listing_coordinates(input.latitude, input.longitude, &input.location)?;

        let listing = FoodListing {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            quantity: input.quantity,
            category: input.category,
            image_url: input.image_url,
            location: input.location,
            latitude: coords.latitude,
            longitude: coords.longitude,
            pickup_time_start: input.pickup_time_start,
            pickup_time_end: input.pickup_time_end,
            freshness_score: input.freshness_score,
            quality_score: input.quality_score,
            defects_detected: input.defects_detected,
            status: ListingStatus::Available,
            donor_id: input.donor_id,
            created_at: Utc::now(),
        };
        let listing = self.store.insert_listing(listing).await;

        if self.suppliers.record_listing_posted(&listing.donor_id).await.is_none() {
            tracing::debug!(donor_id = %listing.donor_id, "Donor has no supplier profile");
        }

        let sent = self.notifications.notify_nearby_organizations(&listing).await;
        tracing::info!(
            listing_id = %listing.id,
            notifications = sent.len(),
            "Food listing posted: {}",
            listing.title
        );

        Ok(CreatedListing {
            listing,
            notifications_sent: sent.len(),
        })
    }

    pub async fn get(&self, id: Uuid) -> AppResult<FoodListing> {
        self.store.get_listing(id).await.ok_or_else(not_found)
    }

    /// All listings, newest first
    pub async fn list(&self) -> Vec<FoodListing> {
        self.store.list_listings().await
    }

    pub async fn list_available(&self) -> Vec<FoodListing> {
        self.store.list_available_listings().await
    }

    /// Update listing fields. Only `available -> expired` and
    /// `claimed -> available` may be set here; claiming and completing go
    /// through [`Self::claim`] and [`Self::complete`].
    pub async fn update(&self, id: Uuid, input: UpdateListingInput) -> AppResult<FoodListing> {
        input.validate()?;
        if let Some(score) = input.freshness_score {
            check("freshnessScore", shared::validate_score(score))?;
        }
        if let Some(score) = input.quality_score {
            check("qualityScore", shared::validate_score(score))?;
        }
        if let Some(next @ (ListingStatus::Claimed | ListingStatus::Completed)) = input.status {
            return Err(AppError::InvalidStateTransition(format!(
                "Listings become {} through their own endpoint",
                next
            )));
        }

        let mut outcome = Ok(());
        let updated = self
            .store
            .update_listing(id, |l| {
                outcome = check(
                    "pickupTimeEnd",
                    shared::validate_pickup_window(
                        input.pickup_time_start.unwrap_or(l.pickup_time_start),
                        input.pickup_time_end.unwrap_or(l.pickup_time_end),
                    ),
                );
                if outcome.is_ok() {
                    if let Some(next) = input.status.filter(|next| *next != l.status) {
                        outcome = self.check_transition(l.status, next);
                    }
                }
                if outcome.is_err() {
                    return;
                }

                if let Some(v) = input.title {
                    l.title = v;
                }
                if let Some(v) = input.description {
                    l.description = v;
                }
                if let Some(v) = input.quantity {
                    l.quantity = v;
                }
                if let Some(v) = input.image_url {
                    l.image_url = Some(v);
                }
                if let Some(v) = input.pickup_time_start {
                    l.pickup_time_start = v;
                }
                if let Some(v) = input.pickup_time_end {
                    l.pickup_time_end = v;
                }
                if let Some(v) = input.freshness_score {
                    l.freshness_score = v;
                }
                if let Some(v) = input.quality_score {
                    l.quality_score = v;
                }
                if let Some(v) = input.defects_detected {
                    l.defects_detected = Some(v);
                }
                if let Some(v) = input.status {
                    l.status = v;
                }
            })
            .await
            .ok_or_else(not_found)?;
        outcome.map(|_| updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete_listing(id).await {
            tracing::info!(listing_id = %id, "Food listing deleted");
            Ok(())
        } else {
            Err(not_found())
        }
    }

    /// Claim an available listing for an organization and confirm the claim
    /// to that organization.
    pub async fn claim(&self, id: Uuid, input: ClaimListingInput) -> AppResult<FoodListing> {
        if self.store.get_organization(input.organization_id).await.is_none() {
            return Err(AppError::NotFound("Organization".to_string()));
        }
        let listing = self.transition(id, ListingStatus::Claimed).await?;
        self.notifications
            .notify_listing_claimed(&listing, input.organization_id)
            .await;

        tracing::info!(
            listing_id = %id,
            organization_id = %input.organization_id,
            "Food listing claimed"
        );
        Ok(listing)
    }

    /// Mark a claimed listing picked up and credit the donor's supplier
    pub async fn complete(&self, id: Uuid) -> AppResult<FoodListing> {
        let listing = self.transition(id, ListingStatus::Completed).await?;
        if let Some(supplier) = self.suppliers.record_successful_delivery(&listing.donor_id).await {
            tracing::info!(
                supplier_id = %supplier.id,
                rating = supplier.safety_rating,
                "Delivery credited"
            );
        }
        Ok(listing)
    }

    fn check_transition(&self, from: ListingStatus, to: ListingStatus) -> AppResult<()> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(AppError::InvalidStateTransition(format!(
                "Cannot move listing from {} to {}",
                from, to
            )))
        }
    }

    /// Check and apply a transition under the listings write lock
    async fn transition(&self, id: Uuid, to: ListingStatus) -> AppResult<FoodListing> {
        let mut outcome = Ok(());
        let updated = self
            .store
            .update_listing(id, |l| {
                outcome = self.check_transition(l.status, to);
                if outcome.is_ok() {
                    l.status = to;
                }
            })
            .await
            .ok_or_else(not_found)?;
        outcome.map(|_| updated)
    }
}
