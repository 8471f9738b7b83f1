//! Route definitions for the FoodLoop API

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/food-listings", listing_routes())
        .nest("/organizations", organization_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/notifications", notification_routes())
}

/// Food listing routes
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_listings).post(handlers::create_listing),
        )
        .route("/available", get(handlers::list_available_listings))
        .route(
            "/:listing_id",
            get(handlers::get_listing)
                .patch(handlers::update_listing)
                .delete(handlers::delete_listing),
        )
        .route("/:listing_id/claim", post(handlers::claim_listing))
        .route("/:listing_id/complete", post(handlers::complete_listing))
        .route(
            "/:listing_id/sensor-data",
            get(handlers::get_sensor_readings).post(handlers::record_sensor_reading),
        )
}

/// Receiving organization routes
fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_organizations).post(handlers::register_organization),
        )
        .route(
            "/:organization_id",
            get(handlers::get_organization).patch(handlers::update_organization),
        )
}

/// Supplier routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::register_supplier),
        )
        .route("/user/:user_id", get(handlers::get_supplier_by_user))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier).patch(handlers::update_supplier),
        )
        .route("/:supplier_id/analysis", get(handlers::get_supplier_analysis))
        .route("/:supplier_id/rating", post(handlers::recalculate_supplier_rating))
}

/// Notification routes, keyed by organization except for the read flag
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(handlers::get_notifications))
        .route("/:id/unread-count", get(handlers::get_unread_count))
        .route("/:id/read", patch(handlers::mark_notification_read))
}
