//! Proximity matching between food listings and receiving organizations
//!
//! When a listing is posted, every organization whose notification radius
//! covers the listing's location receives exactly one `new_listing`
//! notification. Only the radius is enforced here; food type and pickup time
//! preferences are not used as filters.

use uuid::Uuid;

use crate::models::{FoodListing, NewNotification, NotificationType, Organization};
use crate::types::GpsCoordinates;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack applied to the radius comparison so a point sitting exactly on the
/// boundary is not lost to floating point noise
pub const RADIUS_TOLERANCE_KM: f64 = 1e-9;

const PICKUP_TIME_FORMAT: &str = "%H:%M";

/// Great-circle distance in kilometres between two points given in degrees
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometres between two coordinates
pub fn distance_km(from: GpsCoordinates, to: GpsCoordinates) -> f64 {
    haversine_km(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Inclusive radius check. A NaN distance never matches.
pub fn is_within_radius(distance_km: f64, radius_km: f64) -> bool {
    distance_km <= radius_km + RADIUS_TOLERANCE_KM
}

/// An organization whose radius covers a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityMatch {
    pub organization_id: Uuid,
    pub distance_km: f64,
    pub radius_km: f64,
}

/// Organizations within their own notification radius of `listing`.
///
/// `default_radius_km` applies to organizations without a configured radius.
/// The result follows the order of `organizations`; callers must not rely on it.
pub fn find_nearby(
    listing: &FoodListing,
    organizations: &[Organization],
    default_radius_km: f64,
) -> Vec<ProximityMatch> {
    let origin = listing.coordinates();

    organizations
        .iter()
        .filter_map(|org| {
            let distance = distance_km(origin, org.coordinates());
            let radius = org.max_radius_km(default_radius_km);
            is_within_radius(distance, radius).then(|| ProximityMatch {
                organization_id: org.id,
                distance_km: distance,
                radius_km: radius,
            })
        })
        .collect()
}

/// Notification drafts for every organization near `listing`, one per match
pub fn plan_new_listing_notifications(
    listing: &FoodListing,
    organizations: &[Organization],
    default_radius_km: f64,
) -> Vec<NewNotification> {
    find_nearby(listing, organizations, default_radius_km)
        .into_iter()
        .map(|m| new_listing_notification(listing, m.organization_id))
        .collect()
}

/// Draft of the `new_listing` notification sent to a nearby organization
pub fn new_listing_notification(listing: &FoodListing, organization_id: Uuid) -> NewNotification {
    NewNotification {
        organization_id,
        listing_id: listing.id,
        notification_type: NotificationType::NewListing,
        title: format!("New Food Available: {}", listing.title),
        message: format!(
            "{} of {} available at {}. Pickup time: {} - {}",
            listing.quantity,
            listing.category,
            listing.location,
            listing.pickup_time_start.format(PICKUP_TIME_FORMAT),
            listing.pickup_time_end.format(PICKUP_TIME_FORMAT),
        ),
        is_read: false,
    }
}

/// Draft of the confirmation sent to the organization that claimed a listing
pub fn listing_claimed_notification(listing: &FoodListing, organization_id: Uuid) -> NewNotification {
    NewNotification {
        organization_id,
        listing_id: listing.id,
        notification_type: NotificationType::ListingClaimed,
        title: format!("Listing Claimed: {}", listing.title),
        message: format!(
            "You claimed {} of {}. Pick up at {} between {} and {}",
            listing.quantity,
            listing.category,
            listing.location,
            listing.pickup_time_start.format(PICKUP_TIME_FORMAT),
            listing.pickup_time_end.format(PICKUP_TIME_FORMAT),
        ),
        is_read: false,
    }
}
