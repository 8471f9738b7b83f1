//! HTTP handlers for food listing endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::FoodListing;

use crate::error::AppResult;
use crate::services::listing::{
    ClaimListingInput, CreateListingInput, CreatedListing, ListingService, UpdateListingInput,
};
use crate::AppState;

fn service(state: &AppState) -> ListingService {
    ListingService::new(
        state.store.clone(),
        state.config.notifications.default_radius_km,
    )
}

/// Post a listing; nearby organizations are notified
pub async fn create_listing(
    State(state): State<AppState>,
    Json(input): Json<CreateListingInput>,
) -> AppResult<(StatusCode, Json<CreatedListing>)> {
    let created = service(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all listings
pub async fn list_listings(State(state): State<AppState>) -> Json<Vec<FoodListing>> {
    Json(service(&state).list().await)
}

/// List listings still open for claiming
pub async fn list_available_listings(State(state): State<AppState>) -> Json<Vec<FoodListing>> {
    Json(service(&state).list_available().await)
}

/// Get a listing by ID
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<Json<FoodListing>> {
    let listing = service(&state).get(listing_id).await?;
    Ok(Json(listing))
}

/// Update a listing
pub async fn update_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(input): Json<UpdateListingInput>,
) -> AppResult<Json<FoodListing>> {
    let listing = service(&state).update(listing_id, input).await?;
    Ok(Json(listing))
}

/// Delete a listing
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    service(&state).delete(listing_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Claim a listing for an organization
pub async fn claim_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(input): Json<ClaimListingInput>,
) -> AppResult<Json<FoodListing>> {
    let listing = service(&state).claim(listing_id, input).await?;
    Ok(Json(listing))
}

/// Mark a claimed listing as picked up
pub async fn complete_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> AppResult<Json<FoodListing>> {
    let listing = service(&state).complete(listing_id).await?;
    Ok(Json(listing))
}
