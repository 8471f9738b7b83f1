//! Notification service for in-app organization notifications
//!
//! Supports:
//! - Proximity fan-out when a listing is posted
//! - Claim confirmations
//! - Per-organization inbox and read tracking

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use shared::{FoodListing, Notification};

use crate::error::{AppError, AppResult};
use crate::store::MemoryStore;

/// Notification service for managing notifications
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<MemoryStore>,
    default_radius_km: f64,
}

/// Unread badge count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub organization_id: Uuid,
    pub unread: usize,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(store: Arc<MemoryStore>, default_radius_km: f64) -> Self {
        Self {
            store,
            default_radius_km,
        }
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    /// Notify every organization whose radius covers `listing`.
    ///
    /// Organizations are snapshotted once, so each one receives at most one
    /// notification for this call. Returns the stored notifications.
    pub async fn notify_nearby_organizations(&self, listing: &FoodListing) -> Vec<Notification> {
        let organizations = self.store.list_all_organizations().await;
        let drafts =
            shared::plan_new_listing_notifications(listing, &organizations, self.default_radius_km);

        if drafts.is_empty() {
            tracing::info!(listing_id = %listing.id, "No organizations in range of new listing");
            return Vec::new();
        }

        let notifications = self.store.create_notifications(drafts).await;
        tracing::info!(
            listing_id = %listing.id,
            count = notifications.len(),
            "Notified nearby organizations"
        );
        notifications
    }

    /// Confirm a claim to the claiming organization
    pub async fn notify_listing_claimed(
        &self,
        listing: &FoodListing,
        organization_id: Uuid,
    ) -> Notification {
        let draft = shared::listing_claimed_notification(listing, organization_id);
        self.store.create_notification(draft).await
    }

    // ========================================================================
    // Inbox
    // ========================================================================

    /// Notifications for an organization, newest first
    pub async fn list_for_organization(&self, organization_id: Uuid) -> AppResult<Vec<Notification>> {
        self.ensure_organization(organization_id).await?;
        Ok(self
            .store
            .list_notifications_for_organization(organization_id)
            .await)
    }

    pub async fn unread_count(&self, organization_id: Uuid) -> AppResult<UnreadCount> {
        let unread = self
            .list_for_organization(organization_id)
            .await?
            .iter()
            .filter(|n| !n.is_read)
            .count();
        Ok(UnreadCount {
            organization_id,
            unread,
        })
    }

    /// Mark a notification read. Marking twice is not an error.
    pub async fn mark_as_read(&self, id: Uuid) -> AppResult<Notification> {
        self.store
            .mark_notification_read(id)
            .await
            .ok_or_else(|| AppError::NotFound("Notification".to_string()))
    }

    async fn ensure_organization(&self, organization_id: Uuid) -> AppResult<()> {
        match self.store.get_organization(organization_id).await {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Organization".to_string())),
        }
    }
}
