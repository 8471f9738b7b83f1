//! Demo fixture data
//!
//! Three sample organizations and three sample suppliers, one pair per metro.
//! Ids are fixed so the demo front end can link to them directly.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use shared::{
    Organization, OrganizationPreferences, OrganizationType, Supplier, VerificationStatus,
};

use crate::store::MemoryStore;

pub const FOOD_FOR_ALL_ID: Uuid = Uuid::from_u128(0x0f00_0000_0000_4000_8000_0000_0000_0001);
pub const ELDER_CARE_ID: Uuid = Uuid::from_u128(0x0f00_0000_0000_4000_8000_0000_0000_0002);
pub const COMMUNITY_FOOD_BANK_ID: Uuid = Uuid::from_u128(0x0f00_0000_0000_4000_8000_0000_0000_0003);

pub const GOLDEN_PALACE_ID: Uuid = Uuid::from_u128(0x05f0_0000_0000_4000_8000_0000_0000_0001);
pub const FRESH_MART_ID: Uuid = Uuid::from_u128(0x05f0_0000_0000_4000_8000_0000_0000_0002);
pub const SWEET_TREATS_ID: Uuid = Uuid::from_u128(0x05f0_0000_0000_4000_8000_0000_0000_0003);

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn preferences(food_types: &[&str], max_radius: f64, times: &[&str]) -> Option<OrganizationPreferences> {
    Some(OrganizationPreferences {
        food_types: food_types.iter().map(|s| s.to_string()).collect(),
        max_radius: Some(max_radius),
        preferred_pickup_times: times.iter().map(|s| s.to_string()).collect(),
    })
}

pub fn sample_organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: FOOD_FOR_ALL_ID,
            name: "Food for All NGO".to_string(),
            organization_type: OrganizationType::Ngo,
            email: "contact@foodforall.org".to_string(),
            phone: "+1-555-0101".to_string(),
            address: "123 Charity St, Delhi, India".to_string(),
            latitude: 28.6139,
            longitude: 77.2090,
            license_number: Some("NGO-2023-001".to_string()),
            is_verified: true,
            registration_date: date(2023, 1, 15),
            preferences: preferences(&["cooked", "packaged", "fresh"], 10.0, &["morning", "evening"]),
            created_at: date(2023, 1, 15),
        },
        Organization {
            id: ELDER_CARE_ID,
            name: "Elder Care Home".to_string(),
            organization_type: OrganizationType::HomeCare,
            email: "admin@eldercare.com".to_string(),
            phone: "+1-555-0102".to_string(),
            address: "456 Senior Blvd, Mumbai, India".to_string(),
            latitude: 19.0760,
            longitude: 72.8777,
            license_number: Some("HC-2022-045".to_string()),
            is_verified: true,
            registration_date: date(2022, 8, 20),
            preferences: preferences(&["cooked", "soft"], 5.0, &["morning"]),
            created_at: date(2022, 8, 20),
        },
        Organization {
            id: COMMUNITY_FOOD_BANK_ID,
            name: "Community Food Bank".to_string(),
            organization_type: OrganizationType::FoodBank,
            email: "info@communityfoodbank.org".to_string(),
            phone: "+1-555-0103".to_string(),
            address: "789 Distribution Ave, Bangalore, India".to_string(),
            latitude: 12.9716,
            longitude: 77.5946,
            license_number: Some("FB-2023-012".to_string()),
            is_verified: true,
            registration_date: date(2023, 3, 10),
            preferences: preferences(&["packaged", "canned", "dry"], 15.0, &["morning", "afternoon"]),
            created_at: date(2023, 3, 10),
        },
    ]
}

/// Sample suppliers. `safety_rating` holds the stale value shown before the
/// first recomputation.
pub fn sample_suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: GOLDEN_PALACE_ID,
            user_id: "user1".to_string(),
            business_name: "Golden Palace Restaurant".to_string(),
            business_type: "restaurant".to_string(),
            email: "chef@goldenpalace.com".to_string(),
            phone: "+1-555-0201".to_string(),
            address: "321 Food Court, Delhi, India".to_string(),
            latitude: 28.6129,
            longitude: 77.2295,
            license_number: Some("FSSAI-12345678901".to_string()),
            license_expiry_date: Some(date(2025, 6, 30)),
            google_place_id: Some("ChIJd8BlQ2BZwokRAFUEcm_qrcQ".to_string()),
            google_rating: Some(4.5),
            total_listings: 45,
            successful_deliveries: 42,
            safety_rating: 4.3,
            verification_status: VerificationStatus::Verified,
            created_at: date(2023, 2, 15),
        },
        Supplier {
            id: FRESH_MART_ID,
            user_id: "user2".to_string(),
            business_name: "Fresh Mart Grocery".to_string(),
            business_type: "grocery".to_string(),
            email: "manager@freshmart.com".to_string(),
            phone: "+1-555-0202".to_string(),
            address: "654 Market St, Mumbai, India".to_string(),
            latitude: 19.0785,
            longitude: 72.8785,
            license_number: Some("FSSAI-98765432109".to_string()),
            license_expiry_date: Some(date(2024, 12, 31)),
            google_place_id: Some("ChIJwe1EZjDG5zsRaYxkjY_tpF0".to_string()),
            google_rating: Some(4.2),
            total_listings: 23,
            successful_deliveries: 20,
            safety_rating: 3.9,
            verification_status: VerificationStatus::Verified,
            created_at: date(2023, 5, 20),
        },
        Supplier {
            id: SWEET_TREATS_ID,
            user_id: "user3".to_string(),
            business_name: "Sweet Treats Bakery".to_string(),
            business_type: "bakery".to_string(),
            email: "baker@sweettreats.com".to_string(),
            phone: "+1-555-0203".to_string(),
            address: "987 Baker Lane, Bangalore, India".to_string(),
            latitude: 12.9762,
            longitude: 77.6033,
            license_number: Some("FSSAI-56789012345".to_string()),
            license_expiry_date: Some(date(2025, 3, 15)),
            google_place_id: Some("ChIJbU60yXAWrjsR4E9-4NKBSQI".to_string()),
            google_rating: Some(4.7),
            total_listings: 12,
            successful_deliveries: 11,
            safety_rating: 4.6,
            verification_status: VerificationStatus::Verified,
            created_at: date(2023, 8, 10),
        },
    ]
}

/// Insert the sample records and recompute supplier ratings as of `now`
pub async fn seed_demo_data(store: &MemoryStore, now: DateTime<Utc>) {
    for org in sample_organizations() {
        store.insert_organization(org).await;
    }

    for mut supplier in sample_suppliers() {
        supplier.safety_rating = shared::compute_safety_rating(&supplier, now);
        tracing::debug!(
            supplier = %supplier.business_name,
            rating = supplier.safety_rating,
            "Seeded supplier"
        );
        store.insert_supplier(supplier).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_store() {
        let store = MemoryStore::new();
        tokio_test::block_on(seed_demo_data(&store, date(2024, 6, 1)));

        let counts = tokio_test::block_on(store.counts());
        assert_eq!(counts.organizations, 3);
        assert_eq!(counts.suppliers, 3);
        assert_eq!(counts.notifications, 0);
    }

    #[test]
    fn test_seed_recomputes_ratings() {
        let store = MemoryStore::new();
        let now = date(2024, 6, 1);
        tokio_test::block_on(seed_demo_data(&store, now));

        // Licensed, 4.5 stars, 42/45 deliveries, over a year old, verified
        let golden = tokio_test::block_on(store.get_supplier(GOLDEN_PALACE_ID)).unwrap();
        assert_eq!(golden.safety_rating, 4.8);

        // Joined 2023-08-10, only 9 months old on 2024-06-01
        let sweet = tokio_test::block_on(store.get_supplier(SWEET_TREATS_ID)).unwrap();
        assert_eq!(sweet.safety_rating, shared::compute_safety_rating(&sweet, now));
    }

    #[test]
    fn test_sample_delivery_counts_are_consistent() {
        for s in sample_suppliers() {
            assert!(shared::validate_delivery_counts(s.total_listings, s.successful_deliveries).is_ok());
        }
    }
}
