//! Demo geocoder
//!
//! Resolves free-text addresses against a fixed table of Indian metros. An
//! address matches when it contains the city name, ignoring case. This stands
//! in for a real geocoding service.

use crate::types::GpsCoordinates;

/// Known cities and their centre coordinates, checked in order
pub const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("bangalore", 12.9716, 77.5946),
    ("chennai", 13.0827, 80.2707),
    ("kolkata", 22.5726, 88.3639),
];

/// City used for listings whose location cannot be resolved
pub const FALLBACK_CITY: &str = "delhi";

/// Coordinates of the first known city mentioned in `address`
pub fn lookup_city(address: &str) -> Option<GpsCoordinates> {
    let address = address.to_lowercase();
    CITY_COORDINATES
        .iter()
        .find(|(city, _, _)| address.contains(city))
        .map(|(_, lat, lon)| GpsCoordinates::new(*lat, *lon))
}

/// Like [`lookup_city`], falling back to the centre of Delhi
pub fn lookup_city_or_fallback(address: &str) -> GpsCoordinates {
    lookup_city(address).unwrap_or_else(fallback_coordinates)
}

fn fallback_coordinates() -> GpsCoordinates {
    CITY_COORDINATES
        .iter()
        .find(|(city, _, _)| *city == FALLBACK_CITY)
        .map(|(_, lat, lon)| GpsCoordinates::new(*lat, *lon))
        .unwrap_or(GpsCoordinates {
            latitude: 28.6139,
            longitude: 77.2090,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_substring() {
        let coords = lookup_city("456 Senior Blvd, MUMBAI, India").unwrap();
        assert_eq!(coords, GpsCoordinates::new(19.0760, 72.8777));
    }

    #[test]
    fn test_unknown_city() {
        assert!(lookup_city("10 Downing Street, London").is_none());
    }

    #[test]
    fn test_fallback_is_delhi() {
        let coords = lookup_city_or_fallback("somewhere unknown");
        assert_eq!(coords, GpsCoordinates::new(28.6139, 77.2090));
    }

    #[test]
    fn test_first_listed_city_wins() {
        // Both names appear; table order decides
        let coords = lookup_city("Mumbai office, ships from Delhi").unwrap();
        assert_eq!(coords, GpsCoordinates::new(28.6139, 77.2090));
    }
}
