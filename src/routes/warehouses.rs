//! Warehouse catalog routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::error::ApiError;
use crate::services::query::{ListQuery, Page};
use crate::services::warehouse::{self, Warehouse, WarehouseInput};
use crate::state::AppState;

/// `GET /api/warehouses` — paginated list; `search` matches name or location.
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Json<Page<Warehouse>> {
    Json(warehouse::list_warehouses(&state, &q).await)
}

/// `POST /api/warehouses` — create a warehouse.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<WarehouseInput>,
) -> Result<(StatusCode, Json<Warehouse>), ApiError> {
    let row = warehouse::create_warehouse(&state, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /api/warehouses/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Warehouse>, ApiError> {
    Ok(Json(warehouse::get_warehouse(&state, &id).await?))
}

/// `PUT /api/warehouses/{id}` — replace editable fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<WarehouseInput>,
) -> Result<Json<Warehouse>, ApiError> {
    Ok(Json(warehouse::update_warehouse(&state, &id, body).await?))
}

/// `DELETE /api/warehouses/{id}` — stock held there returns to product pools.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    warehouse::delete_warehouse(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
