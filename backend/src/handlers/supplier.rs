//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{Supplier, SupplierAnalysis};

use crate::error::AppResult;
use crate::services::supplier::{RegisterSupplierInput, SupplierService, UpdateSupplierInput};
use crate::AppState;

/// Register a supplier
pub async fn register_supplier(
    State(state): State<AppState>,
    Json(input): Json<RegisterSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.store);
    let supplier = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// List suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> Json<Vec<Supplier>> {
    let service = SupplierService::new(state.store);
    Json(service.list().await)
}

/// Get a supplier by ID
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.store);
    let supplier = service.get(supplier_id).await?;
    Ok(Json(supplier))
}

/// Get the supplier profile of a user
pub async fn get_supplier_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.store);
    let supplier = service.get_by_user_id(&user_id).await?;
    Ok(Json(supplier))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.store);
    let supplier = service.update(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Recompute a supplier's safety rating
pub async fn recalculate_supplier_rating(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.store);
    let supplier = service.recalculate_rating(supplier_id).await?;
    Ok(Json(supplier))
}

/// Get the safety analysis of a supplier
pub async fn get_supplier_analysis(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierAnalysis>> {
    let service = SupplierService::new(state.store);
    let analysis = service.analyze(supplier_id).await?;
    Ok(Json(analysis))
}
