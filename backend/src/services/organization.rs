//! Receiving organization service

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::{Organization, OrganizationPreferences, OrganizationType};

use super::resolve_coordinates;
use crate::error::{check, AppError, AppResult};
use crate::store::MemoryStore;

/// Organization service for registration and profile updates
#[derive(Clone)]
pub struct OrganizationService {
    store: Arc<MemoryStore>,
}

/// Input for registering an organization
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganizationInput {
    #[validate(length(min = 1, max = 200, message = "Organization name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub organization_type: OrganizationType,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub license_number: Option<String>,
    pub preferences: Option<OrganizationPreferences>,
}

/// Profile update; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub license_number: Option<String>,
    pub is_verified: Option<bool>,
    pub preferences: Option<OrganizationPreferences>,
}

fn check_preferences(preferences: Option<&OrganizationPreferences>) -> AppResult<()> {
    if let Some(radius) = preferences.and_then(|p| p.max_radius) {
        check("preferences.maxRadius", shared::validate_radius(radius))?;
    }
    Ok(())
}

impl OrganizationService {
    /// Create a new OrganizationService instance
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Register an organization. New organizations start unverified.
    pub async fn register(&self, input: RegisterOrganizationInput) -> AppResult<Organization> {
        input.validate()?;
        check("phone", shared::validate_phone(&input.phone))?;
        check_preferences(input.preferences.as_ref())?;
        let coords = resolve_coordinates(input.latitude, input.longitude, &input.address)?;

        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            name: input.name,
            organization_type: input.organization_type,
            email: input.email,
            phone: input.phone,
            address: input.address,
            latitude: coords.latitude,
            longitude: coords.longitude,
            license_number: input.license_number,
            is_verified: false,
            registration_date: now,
            preferences: input.preferences,
            created_at: now,
        };

        tracing::info!(
            organization_id = %org.id,
            "Registered {} organization {}",
            org.organization_type,
            org.name
        );

        Ok(self.store.insert_organization(org).await)
    }

    /// Get an organization by id
    pub async fn get(&self, id: Uuid) -> AppResult<Organization> {
        self.store
            .get_organization(id)
            .await
            .ok_or_else(|| AppError::NotFound("Organization".to_string()))
    }

    /// List organizations, optionally restricted to one type
    pub async fn list(&self, org_type: Option<OrganizationType>) -> Vec<Organization> {
        match org_type {
            Some(t) => self.store.list_organizations_by_type(t).await,
            None => self.store.list_all_organizations().await,
        }
    }

    /// Update an organization profile
    pub async fn update(&self, id: Uuid, input: UpdateOrganizationInput) -> AppResult<Organization> {
        input.validate()?;
        if let Some(phone) = input.phone.as_deref() {
            check("phone", shared::validate_phone(phone))?;
        }
        check_preferences(input.preferences.as_ref())?;

        let existing = self.get(id).await?;
        let coords = match (input.latitude, input.longitude, input.address.as_deref()) {
            (None, None, None) => None,
            (None, None, Some(address)) => Some(resolve_coordinates(None, None, address)?),
            (lat, lon, address) => Some(resolve_coordinates(
                lat.or(Some(existing.latitude)),
                lon.or(Some(existing.longitude)),
                address.unwrap_or(&existing.address),
            )?),
        };

        self.store
            .update_organization(id, |o| {
                if let Some(v) = input.name {
                    o.name = v;
                }
                if let Some(v) = input.phone {
                    o.phone = v;
                }
                if let Some(v) = input.address {
                    o.address = v;
                }
                if let Some(c) = coords {
                    o.latitude = c.latitude;
                    o.longitude = c.longitude;
                }
                if let Some(v) = input.license_number {
                    o.license_number = Some(v);
                }
                if let Some(v) = input.is_verified {
                    o.is_verified = v;
                }
                if let Some(v) = input.preferences {
                    o.preferences = Some(v);
                }
            })
            .await
            .ok_or_else(|| AppError::NotFound("Organization".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(address: &str) -> RegisterOrganizationInput {
        RegisterOrganizationInput {
            name: "Chennai Meals Trust".to_string(),
            organization_type: OrganizationType::Ngo,
            email: "hello@chennaimeals.org".to_string(),
            phone: "+91-44-555-0110".to_string(),
            address: address.to_string(),
            latitude: None,
            longitude: None,
            license_number: None,
            preferences: None,
        }
    }

    fn service() -> OrganizationService {
        OrganizationService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_register_geocodes_address() {
        let org = service().register(input("5 Marina Rd, Chennai")).await.unwrap();
        assert_eq!((org.latitude, org.longitude), (13.0827, 80.2707));
        assert!(!org.is_verified);
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_city_without_coordinates() {
        let err = service().register(input("1 Unknown Road")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_non_positive_radius() {
        let mut bad = input("5 Marina Rd, Chennai");
        bad.preferences = Some(OrganizationPreferences {
            max_radius: Some(0.0),
            ..Default::default()
        });
        assert!(service().register(bad).await.is_err());
    }

    #[tokio::test]
    async fn test_list_by_type() {
        let service = service();
        service.register(input("5 Marina Rd, Chennai")).await.unwrap();
        let mut bank = input("9 Food St, Delhi");
        bank.organization_type = OrganizationType::FoodBank;
        bank.email = "bank@example.org".to_string();
        service.register(bank).await.unwrap();

        assert_eq!(service.list(None).await.len(), 2);
        assert_eq!(service.list(Some(OrganizationType::FoodBank)).await.len(), 1);
        assert!(service.list(Some(OrganizationType::HomeCare)).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_address_moves_organization() {
        let service = service();
        let org = service.register(input("5 Marina Rd, Chennai")).await.unwrap();

        let updated = service
            .update(
                org.id,
                UpdateOrganizationInput {
                    address: Some("22 Lake Rd, Kolkata".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!((updated.latitude, updated.longitude), (22.5726, 88.3639));
    }

    #[tokio::test]
    async fn test_update_rejects_unresolvable_address() {
        let service = service();
        let org = service.register(input("5 Marina Rd, Chennai")).await.unwrap();

        let err = service
            .update(
                org.id,
                UpdateOrganizationInput {
                    address: Some("10 Downing Street, London".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "address"));

        let unchanged = service.get(org.id).await.unwrap();
        assert_eq!(unchanged.address, "5 Marina Rd, Chennai");
        assert_eq!((unchanged.latitude, unchanged.longitude), (org.latitude, org.longitude));
    }
}
