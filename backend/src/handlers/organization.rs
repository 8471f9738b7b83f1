//! HTTP handlers for receiving organization endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::{Organization, OrganizationType};

use crate::error::AppResult;
use crate::services::organization::{
    OrganizationService, RegisterOrganizationInput, UpdateOrganizationInput,
};
use crate::AppState;

/// Query parameters for listing organizations
#[derive(Debug, Deserialize)]
pub struct OrganizationQuery {
    #[serde(rename = "type")]
    pub organization_type: Option<OrganizationType>,
}

/// Register an organization
pub async fn register_organization(
    State(state): State<AppState>,
    Json(input): Json<RegisterOrganizationInput>,
) -> AppResult<(StatusCode, Json<Organization>)> {
    let service = OrganizationService::new(state.store);
    let org = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(org)))
}

/// List organizations, optionally filtered by type
pub async fn list_organizations(
    State(state): State<AppState>,
    Query(query): Query<OrganizationQuery>,
) -> Json<Vec<Organization>> {
    let service = OrganizationService::new(state.store);
    Json(service.list(query.organization_type).await)
}

/// Get an organization by ID
pub async fn get_organization(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
) -> AppResult<Json<Organization>> {
    let service = OrganizationService::new(state.store);
    let org = service.get(organization_id).await?;
    Ok(Json(org))
}

/// Update an organization
pub async fn update_organization(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
    Json(input): Json<UpdateOrganizationInput>,
) -> AppResult<Json<Organization>> {
    let service = OrganizationService::new(state.store);
    let org = service.update(organization_id, input).await?;
    Ok(Json(org))
}
