//! Supplier registration and safety rating service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::{analyze_supplier, compute_safety_rating, Supplier, SupplierAnalysis, VerificationStatus};

use super::resolve_coordinates;
use crate::error::{check, AppError, AppResult};
use crate::store::MemoryStore;

/// Supplier service for registration, updates and safety scoring
#[derive(Clone)]
pub struct SupplierService {
    store: Arc<MemoryStore>,
}

/// Input for registering a supplier
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSupplierInput {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
    #[validate(length(min = 1, max = 200, message = "Business name is required"))]
    pub business_name: String,
    #[validate(length(min = 1, max = 50, message = "Business type is required"))]
    pub business_type: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<DateTime<Utc>>,
    pub google_place_id: Option<String>,
    pub google_rating: Option<f64>,
    pub verification_status: Option<VerificationStatus>,
}

/// Admin update of a supplier; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierInput {
    #[validate(length(min = 1, max = 200))]
    pub business_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<DateTime<Utc>>,
    pub google_place_id: Option<String>,
    pub google_rating: Option<f64>,
    pub verification_status: Option<VerificationStatus>,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Register a supplier. Counters start at zero and the rating is
    /// computed from the submitted fields.
    pub async fn register(&self, input: RegisterSupplierInput) -> AppResult<Supplier> {
        input.validate()?;
        check("phone", shared::validate_phone(&input.phone))?;
        if let Some(rating) = input.google_rating {
            check("googleRating", shared::validate_rating(rating))?;
        }
        let coords = resolve_coordinates(input.latitude, input.longitude, &input.address)?;

        let now = Utc::now();
        let mut supplier = Supplier {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            business_name: input.business_name,
            business_type: input.business_type,
            email: input.email,
            phone: input.phone,
            address: input.address,
            latitude: coords.latitude,
            longitude: coords.longitude,
            license_number: input.license_number,
            license_expiry_date: input.license_expiry_date,
            google_place_id: input.google_place_id,
            google_rating: input.google_rating,
            total_listings: 0,
            successful_deliveries: 0,
            safety_rating: 0.0,
            verification_status: input.verification_status.unwrap_or_default(),
            created_at: now,
        };
        supplier.safety_rating = compute_safety_rating(&supplier, now);

        self.store
            .insert_supplier_unique(supplier)
            .await
            .ok_or_else(|| AppError::field("userId", "A supplier is already registered for this user"))
            .map(|supplier| {
                tracing::info!(
                    supplier_id = %supplier.id,
                    rating = supplier.safety_rating,
                    status = %supplier.verification_status,
                    "Registered supplier {}",
                    supplier.business_name
                );
                supplier
            })
    }

    /// Get a supplier by id
    pub async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        self.store
            .get_supplier(id)
            .await
            .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Get the supplier owned by a user account
    pub async fn get_by_user_id(&self, user_id: &str) -> AppResult<Supplier> {
        self.store
            .get_supplier_by_user_id(user_id)
            .await
            .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// List all suppliers, oldest first
    pub async fn list(&self) -> Vec<Supplier> {
        self.store.list_suppliers().await
    }

    /// Apply an admin update and recompute the rating
    pub async fn update(&self, id: Uuid, input: UpdateSupplierInput) -> AppResult<Supplier> {
        input.validate()?;
        if let Some(phone) = input.phone.as_deref() {
            check("phone", shared::validate_phone(phone))?;
        }
        if let Some(rating) = input.google_rating {
            check("googleRating", shared::validate_rating(rating))?;
        }

        let now = Utc::now();
        self.store
            .update_supplier(id, |s| {
                if let Some(v) = input.business_name {
                    s.business_name = v;
                }
                if let Some(v) = input.email {
                    s.email = v;
                }
                if let Some(v) = input.phone {
                    s.phone = v;
                }
                if let Some(v) = input.address {
                    s.address = v;
                }
                if let Some(v) = input.license_number {
                    s.license_number = Some(v);
                }
                if let Some(v) = input.license_expiry_date {
                    s.license_expiry_date = Some(v);
                }
                if let Some(v) = input.google_place_id {
                    s.google_place_id = Some(v);
                }
                if let Some(v) = input.google_rating {
                    s.google_rating = Some(v);
                }
                if let Some(v) = input.verification_status {
                    s.verification_status = v;
                }
                s.safety_rating = compute_safety_rating(s, now);
            })
            .await
            .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Recompute the stored rating as of now. Ratings drift as accounts age
    /// and licenses expire.
    pub async fn recalculate_rating(&self, id: Uuid) -> AppResult<Supplier> {
        let now = Utc::now();
        self.store
            .update_supplier(id, |s| s.safety_rating = compute_safety_rating(s, now))
            .await
            .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Count a newly posted listing against the supplier owning `user_id`.
    /// Donors without a supplier profile are ignored.
    pub async fn record_listing_posted(&self, user_id: &str) -> Option<Supplier> {
        let supplier = self.store.get_supplier_by_user_id(user_id).await?;
        let now = Utc::now();
        self.store
            .update_supplier(supplier.id, |s| {
                s.total_listings = s.total_listings.saturating_add(1);
                s.safety_rating = compute_safety_rating(s, now);
            })
            .await
    }

    /// Credit a completed delivery to the supplier owning `user_id`
    pub async fn record_successful_delivery(&self, user_id: &str) -> Option<Supplier> {
        let supplier = self.store.get_supplier_by_user_id(user_id).await?;
        let now = Utc::now();
        self.store
            .update_supplier(supplier.id, |s| {
                let delivered = s.successful_deliveries.saturating_add(1);
                if shared::validate_delivery_counts(s.total_listings, delivered).is_ok() {
                    s.successful_deliveries = delivered;
                }
                s.safety_rating = compute_safety_rating(s, now);
            })
            .await
    }

    /// Safety analysis report as of now
    pub async fn analyze(&self, id: Uuid) -> AppResult<SupplierAnalysis> {
        let supplier = self.get(id).await?;
        Ok(analyze_supplier(&supplier, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input() -> RegisterSupplierInput {
        RegisterSupplierInput {
            user_id: "user42".to_string(),
            business_name: "Spice Route Kitchen".to_string(),
            business_type: "restaurant".to_string(),
            email: "owner@spiceroute.in".to_string(),
            phone: "+91-555-0142".to_string(),
            address: "12 Park Street, Kolkata, India".to_string(),
            latitude: None,
            longitude: None,
            license_number: None,
            license_expiry_date: None,
            google_place_id: None,
            google_rating: None,
            verification_status: None,
        }
    }

    fn service() -> SupplierService {
        SupplierService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_register_defaults() {
        let supplier = service().register(input()).await.unwrap();

        assert_eq!(supplier.total_listings, 0);
        assert_eq!(supplier.successful_deliveries, 0);
        assert_eq!(supplier.verification_status, VerificationStatus::Pending);
        // Kolkata resolved from the address
        assert_eq!(supplier.latitude, 22.5726);
        // No license, rating or history, brand new, pending
        assert_eq!(supplier.safety_rating, 1.5);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_rating() {
        let mut bad = input();
        bad.google_rating = Some(7.5);
        let err = service().register(bad).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "googleRating"));
    }

    #[tokio::test]
    async fn test_update_recomputes_rating() {
        let service = service();
        let supplier = service.register(input()).await.unwrap();

        let updated = service
            .update(
                supplier.id,
                UpdateSupplierInput {
                    license_number: Some("FSSAI-11112222333".to_string()),
                    license_expiry_date: Some(Utc::now() + Duration::days(365)),
                    verification_status: Some(VerificationStatus::Verified),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // 30 + 10 + 10 + 0 + 10 = 60 -> 3.0
        assert_eq!(updated.safety_rating, 3.0);
    }

    #[tokio::test]
    async fn test_delivery_counters() {
        let service = service();
        let supplier = service.register(input()).await.unwrap();

        // Delivery without a listing is not counted
        let s = service.record_successful_delivery("user42").await.unwrap();
        assert_eq!(s.successful_deliveries, 0);

        service.record_listing_posted("user42").await.unwrap();
        let s = service.record_successful_delivery("user42").await.unwrap();
        assert_eq!((s.total_listings, s.successful_deliveries), (1, 1));
        assert_eq!(s.id, supplier.id);

        assert!(service.record_listing_posted("nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_second_supplier_for_user() {
        let service = service();
        let first = service.register(input()).await.unwrap();

        let mut again = input();
        again.business_name = "Spice Route Express".to_string();
        let err = service.register(again).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "userId"));

        assert_eq!(service.list().await.len(), 1);
        assert_eq!(service.get_by_user_id("user42").await.unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_delivery_credit_capped_at_listings() {
        let service = service();
        service.register(input()).await.unwrap();
        service.record_listing_posted("user42").await.unwrap();

        service.record_successful_delivery("user42").await.unwrap();
        let s = service.record_successful_delivery("user42").await.unwrap();
        assert_eq!((s.total_listings, s.successful_deliveries), (1, 1));
        assert!(shared::validate_delivery_counts(s.total_listings, s.successful_deliveries).is_ok());
    }

    #[tokio::test]
    async fn test_get_missing_supplier() {
        let err = service().get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
