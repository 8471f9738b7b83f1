//! Business logic services for the FoodLoop platform

pub mod listing;
pub mod notification;
pub mod organization;
pub mod sensor;
pub mod supplier;

pub use listing::ListingService;
pub use notification::NotificationService;
pub use organization::OrganizationService;
pub use sensor::SensorService;
pub use supplier::SupplierService;

use shared::GpsCoordinates;

use crate::error::{check, AppError, AppResult};

/// Validate an explicit coordinate pair. `None` when neither half is given;
/// a lone latitude or longitude is rejected.
pub(crate) fn explicit_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> AppResult<Option<GpsCoordinates>> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => {
            check("latitude", shared::validate_coordinates(lat, lon))?;
            Ok(Some(GpsCoordinates::new(lat, lon)))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::field(
            "latitude",
            "Latitude and longitude must be provided together",
        )),
    }
}

/// Resolve registration coordinates.
///
/// Explicit coordinates win and must be valid. Without them the address is
/// run through the demo geocoder; an address naming no known city is rejected.
pub(crate) fn resolve_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
    address: &str,
) -> AppResult<GpsCoordinates> {
    match explicit_coordinates(latitude, longitude)? {
        Some(coords) => Ok(coords),
        None => shared::lookup_city(address).ok_or_else(|| {
            AppError::field(
                "address",
                "Location could not be resolved; include a known city name",
            )
        }),
    }
}
