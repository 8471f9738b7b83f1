//! Validation utilities for the FoodLoop platform

use chrono::{DateTime, Utc};

use crate::types::GpsCoordinates;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate a coordinate pair.
///
/// Rejects non-finite values, out-of-range values and the `(0, 0)`
/// placeholder left by an address that was never geocoded.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    if GpsCoordinates::new(latitude, longitude).is_unresolved() {
        return Err("Location could not be resolved");
    }
    Ok(())
}

/// Validate a notification radius in kilometres
pub fn validate_radius(radius_km: f64) -> Result<(), &'static str> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err("Radius must be a positive number of kilometres");
    }
    Ok(())
}

// ============================================================================
// Supplier Validations
// ============================================================================

/// Validate an external review rating (0-5 stars)
pub fn validate_rating(rating: f64) -> Result<(), &'static str> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err("Rating must be between 0 and 5");
    }
    Ok(())
}

/// Successful deliveries can never exceed listings posted
pub fn validate_delivery_counts(total_listings: u32, successful_deliveries: u32) -> Result<(), &'static str> {
    if successful_deliveries > total_listings {
        return Err("Successful deliveries cannot exceed total listings");
    }
    Ok(())
}

// ============================================================================
// Listing Validations
// ============================================================================

/// Pickup window must end after it starts
pub fn validate_pickup_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), &'static str> {
    if end <= start {
        return Err("Pickup end time must be after start time");
    }
    Ok(())
}

/// Validate a 0-100 freshness or quality score
pub fn validate_score(score: i32) -> Result<(), &'static str> {
    if !(0..=100).contains(&score) {
        return Err("Score must be between 0 and 100");
    }
    Ok(())
}

/// Validate relative humidity percentage
pub fn validate_humidity(humidity: f64) -> Result<(), &'static str> {
    if !humidity.is_finite() || !(0.0..=100.0).contains(&humidity) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

/// Validate a food storage temperature reading in Celsius
pub fn validate_temperature(celsius: f64) -> Result<(), &'static str> {
    if !celsius.is_finite() || !(-50.0..=100.0).contains(&celsius) {
        return Err("Temperature reading out of sensor range");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate phone number: 7-15 digits, optionally with `+`, spaces and dashes
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err("Phone number contains invalid characters");
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone number must have 7 to 15 digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // ========================================================================
    // Location Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(28.6139, 77.2090).is_ok());
        assert!(validate_coordinates(-33.8688, 151.2093).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        // Equator or prime meridian alone is fine
        assert!(validate_coordinates(0.0, 77.2).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(validate_coordinates(0.0, 0.0).is_err());
        assert!(validate_coordinates(91.0, 10.0).is_err());
        assert!(validate_coordinates(10.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 10.0).is_err());
        assert!(validate_coordinates(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius(10.0).is_ok());
        assert!(validate_radius(0.5).is_ok());
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(-5.0).is_err());
    }

    // ========================================================================
    // Supplier Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());
    }

    #[test]
    fn test_validate_delivery_counts() {
        assert!(validate_delivery_counts(0, 0).is_ok());
        assert!(validate_delivery_counts(45, 42).is_ok());
        assert!(validate_delivery_counts(3, 3).is_ok());
        assert!(validate_delivery_counts(3, 4).is_err());
    }

    // ========================================================================
    // Listing Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_pickup_window() {
        let start = Utc::now();
        assert!(validate_pickup_window(start, start + Duration::hours(2)).is_ok());
        assert!(validate_pickup_window(start, start).is_err());
        assert!(validate_pickup_window(start, start - Duration::minutes(1)).is_err());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(100).is_ok());
        assert!(validate_score(101).is_err());
        assert!(validate_score(-1).is_err());
    }

    #[test]
    fn test_validate_sensor_values() {
        assert!(validate_humidity(55.0).is_ok());
        assert!(validate_humidity(120.0).is_err());
        assert!(validate_temperature(4.0).is_ok());
        assert!(validate_temperature(-18.0).is_ok());
        assert!(validate_temperature(250.0).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+1-555-0101").is_ok());
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
    }
}
