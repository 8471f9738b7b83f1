//! WebAssembly module for FoodLoop
//!
//! Provides client-side computation for:
//! - Supplier safety ratings and bands
//! - Distance and radius checks for the listing map
//! - City lookup for address previews

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{GpsCoordinates, SafetyBand, Supplier};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RatingResult {
    rating: f64,
    band: SafetyBand,
    breakdown: shared::SafetyBreakdown,
}

fn parse_supplier(supplier_json: &str) -> Result<Supplier, String> {
    serde_json::from_str(supplier_json).map_err(|e| format!("Invalid supplier JSON: {}", e))
}

fn timestamp(now_ms: f64) -> Result<DateTime<Utc>, String> {
    if !now_ms.is_finite() {
        return Err("Timestamp must be a finite number of milliseconds".to_string());
    }
    Utc.timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| format!("Timestamp out of range: {}", now_ms))
}

fn rating_json(supplier_json: &str, now_ms: f64) -> Result<String, String> {
    let supplier = parse_supplier(supplier_json)?;
    let breakdown = shared::score_breakdown(&supplier, timestamp(now_ms)?);
    let rating = breakdown.rating();
    serde_json::to_string(&RatingResult {
        rating,
        band: SafetyBand::from_rating(rating),
        breakdown,
    })
    .map_err(|e| e.to_string())
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Safety rating of a supplier (JSON, camelCase fields) as of the browser clock.
/// Returns `{ rating, band, breakdown }` as JSON.
#[wasm_bindgen]
pub fn compute_safety_rating(supplier_json: &str) -> Result<String, JsValue> {
    rating_json(supplier_json, js_sys::Date::now()).map_err(to_js_error)
}

/// Same as [`compute_safety_rating`] with an explicit epoch-millisecond clock
#[wasm_bindgen]
pub fn compute_safety_rating_at(supplier_json: &str, now_ms: f64) -> Result<String, JsValue> {
    rating_json(supplier_json, now_ms).map_err(to_js_error)
}

/// Band label for a rating, e.g. "Highly Recommended"
#[wasm_bindgen]
pub fn safety_band(rating: f64) -> String {
    SafetyBand::from_rating(rating).to_string()
}

/// Great-circle distance in km
#[wasm_bindgen]
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    shared::haversine_km(lat1, lon1, lat2, lon2)
}

/// Whether two points are within `radius_km` of each other, boundary included
#[wasm_bindgen]
pub fn is_within_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> bool {
    let distance = shared::distance_km(
        GpsCoordinates::new(lat1, lon1),
        GpsCoordinates::new(lat2, lon2),
    );
    shared::is_within_radius(distance, radius_km)
}

/// Resolve a known city named in `address` to `[latitude, longitude]`.
/// Empty when no known city matches.
#[wasm_bindgen]
pub fn geocode_city(address: &str) -> Vec<f64> {
    shared::lookup_city(address)
        .map(|c| vec![c.latitude, c.longitude])
        .unwrap_or_default()
}
