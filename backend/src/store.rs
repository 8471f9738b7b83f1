//! In-memory repository
//!
//! One `MemoryStore` is built at startup and shared through `AppState`. Each
//! table sits behind its own `RwLock`, so writes to a table are serialized
//! while reads proceed concurrently. Nothing is persisted.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{
    FoodListing, NewNotification, Notification, Organization, OrganizationType, SensorReading,
    Supplier,
};

#[derive(Default)]
pub struct MemoryStore {
    suppliers: RwLock<HashMap<Uuid, Supplier>>,
    organizations: RwLock<HashMap<Uuid, Organization>>,
    listings: RwLock<HashMap<Uuid, FoodListing>>,
    notifications: RwLock<HashMap<Uuid, Notification>>,
    sensor_readings: RwLock<HashMap<Uuid, SensorReading>>,
}

/// Row counts per table
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoreCounts {
    pub suppliers: usize,
    pub organizations: usize,
    pub listings: usize,
    pub notifications: usize,
    pub sensor_readings: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn counts(&self) -> StoreCounts {
        StoreCounts {
            suppliers: self.suppliers.read().await.len(),
            organizations: self.organizations.read().await.len(),
            listings: self.listings.read().await.len(),
            notifications: self.notifications.read().await.len(),
            sensor_readings: self.sensor_readings.read().await.len(),
        }
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    pub async fn get_supplier(&self, id: Uuid) -> Option<Supplier> {
        self.suppliers.read().await.get(&id).cloned()
    }

    pub async fn get_supplier_by_user_id(&self, user_id: &str) -> Option<Supplier> {
        self.suppliers
            .read()
            .await
            .values()
            .find(|s| s.user_id == user_id)
            .cloned()
    }

    pub async fn list_suppliers(&self) -> Vec<Supplier> {
        let mut suppliers: Vec<Supplier> = self.suppliers.read().await.values().cloned().collect();
        suppliers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        suppliers
    }

    pub async fn insert_supplier(&self, supplier: Supplier) -> Supplier {
        self.suppliers
            .write()
            .await
            .insert(supplier.id, supplier.clone());
        supplier
    }

    /// Insert unless another supplier already belongs to the same user
    pub async fn insert_supplier_unique(&self, supplier: Supplier) -> Option<Supplier> {
        let mut suppliers = self.suppliers.write().await;
        if suppliers.values().any(|s| s.user_id == supplier.user_id) {
            return None;
        }
        suppliers.insert(supplier.id, supplier.clone());
        Some(supplier)
    }

    /// Apply `update` under the table's write lock and return the new row
    pub async fn update_supplier<F>(&self, id: Uuid, update: F) -> Option<Supplier>
    where
        F: FnOnce(&mut Supplier),
    {
        let mut suppliers = self.suppliers.write().await;
        let supplier = suppliers.get_mut(&id)?;
        update(supplier);
        Some(supplier.clone())
    }

    // ========================================================================
    // Organizations
    // ========================================================================

    pub async fn get_organization(&self, id: Uuid) -> Option<Organization> {
        self.organizations.read().await.get(&id).cloned()
    }

    pub async fn list_all_organizations(&self) -> Vec<Organization> {
        let mut orgs: Vec<Organization> =
            self.organizations.read().await.values().cloned().collect();
        orgs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        orgs
    }

    pub async fn list_organizations_by_type(&self, org_type: OrganizationType) -> Vec<Organization> {
        self.list_all_organizations()
            .await
            .into_iter()
            .filter(|o| o.organization_type == org_type)
            .collect()
    }

    pub async fn insert_organization(&self, org: Organization) -> Organization {
        self.organizations.write().await.insert(org.id, org.clone());
        org
    }

    pub async fn update_organization<F>(&self, id: Uuid, update: F) -> Option<Organization>
    where
        F: FnOnce(&mut Organization),
    {
        let mut orgs = self.organizations.write().await;
        let org = orgs.get_mut(&id)?;
        update(org);
        Some(org.clone())
    }

    // ========================================================================
    // Food Listings
    // ========================================================================

    pub async fn get_listing(&self, id: Uuid) -> Option<FoodListing> {
        self.listings.read().await.get(&id).cloned()
    }

    /// All listings, newest first
    pub async fn list_listings(&self) -> Vec<FoodListing> {
        let mut listings: Vec<FoodListing> = self.listings.read().await.values().cloned().collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listings
    }

    pub async fn list_available_listings(&self) -> Vec<FoodListing> {
        self.list_listings()
            .await
            .into_iter()
            .filter(|l| l.is_available())
            .collect()
    }

    pub async fn insert_listing(&self, listing: FoodListing) -> FoodListing {
        self.listings
            .write()
            .await
            .insert(listing.id, listing.clone());
        listing
    }

    pub async fn update_listing<F>(&self, id: Uuid, update: F) -> Option<FoodListing>
    where
        F: FnOnce(&mut FoodListing),
    {
        let mut listings = self.listings.write().await;
        let listing = listings.get_mut(&id)?;
        update(listing);
        Some(listing.clone())
    }

    /// Returns `true` if a listing was removed
    pub async fn delete_listing(&self, id: Uuid) -> bool {
        self.listings.write().await.remove(&id).is_some()
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn get_notification(&self, id: Uuid) -> Option<Notification> {
        self.notifications.read().await.get(&id).cloned()
    }

    /// Notifications addressed to an organization, newest first
    pub async fn list_notifications_for_organization(&self, org_id: Uuid) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .read()
            .await
            .values()
            .filter(|n| n.organization_id == org_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.sent_at.cmp(&a.sent_at).then(a.id.cmp(&b.id)));
        notifications
    }

    /// Store a notification, assigning its id and `sent_at`
    pub async fn create_notification(&self, draft: NewNotification) -> Notification {
        let notification = draft.into_notification(Uuid::new_v4(), Utc::now());
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        notification
    }

    /// Store a batch of drafts under a single write lock, in order
    pub async fn create_notifications(&self, drafts: Vec<NewNotification>) -> Vec<Notification> {
        let sent_at = Utc::now();
        let mut table = self.notifications.write().await;
        drafts
            .into_iter()
            .map(|draft| {
                let notification = draft.into_notification(Uuid::new_v4(), sent_at);
                table.insert(notification.id, notification.clone());
                notification
            })
            .collect()
    }

    /// Set the read flag. `None` if the notification does not exist.
    pub async fn mark_notification_read(&self, id: Uuid) -> Option<Notification> {
        let mut notifications = self.notifications.write().await;
        let notification = notifications.get_mut(&id)?;
        notification.mark_read();
        Some(notification.clone())
    }

    // ========================================================================
    // Sensor Readings
    // ========================================================================

    pub async fn insert_sensor_reading(&self, reading: SensorReading) -> SensorReading {
        self.sensor_readings
            .write()
            .await
            .insert(reading.id, reading.clone());
        reading
    }

    /// Readings for a listing, newest first
    pub async fn list_sensor_readings(&self, listing_id: Uuid) -> Vec<SensorReading> {
        let mut readings: Vec<SensorReading> = self
            .sensor_readings
            .read()
            .await
            .values()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect();
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        readings
    }
}
