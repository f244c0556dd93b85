//! Inventory ledger routes.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::routes::error::ApiError;
use crate::services::inventory::{
    self, AdjustRequest, InventoryItem, InventorySummary, RestockRecommendation, StockChange, StockMovement,
    StockRequest,
};
use crate::services::query::ListQuery;
use crate::services::report;
use crate::state::AppState;

pub(crate) const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// CSV download response with an attachment filename.
pub(crate) fn csv_response(filename: &str, body: String) -> Response {
    (
        [(CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()), (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\""))],
        body,
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct MovementsQuery {
    pub product_id: Option<String>,
}

/// `GET /api/inventory` — one row per product with its warehouse distribution.
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Json<Vec<InventoryItem>> {
    Json(inventory::list_inventory(&state, &q).await)
}

/// `GET /api/inventory/summary`
pub async fn summary(State(state): State<AppState>) -> Json<InventorySummary> {
    Json(inventory::inventory_summary(&state).await)
}

/// `GET /api/inventory/restock`
pub async fn restock(State(state): State<AppState>) -> Json<Vec<RestockRecommendation>> {
    Json(inventory::restock_recommendations(&state).await)
}

/// `GET /api/inventory/movements?product_id=` — ledger, oldest first.
pub async fn movements(State(state): State<AppState>, Query(q): Query<MovementsQuery>) -> Json<Vec<StockMovement>> {
    Json(inventory::list_movements(&state, q.product_id.as_deref()).await)
}

/// `POST /api/inventory/assign` — pool → warehouse.
pub async fn assign(State(state): State<AppState>, Json(body): Json<StockRequest>) -> Result<Json<StockChange>, ApiError> {
    Ok(Json(inventory::assign_stock(&state, &body).await?))
}

/// `POST /api/inventory/release` — warehouse → pool.
pub async fn release(
    State(state): State<AppState>,
    Json(body): Json<StockRequest>,
) -> Result<Json<StockChange>, ApiError> {
    Ok(Json(inventory::release_stock(&state, &body).await?))
}

/// `POST /api/inventory/adjust` — signed correction, clamped at zero.
pub async fn adjust(
    State(state): State<AppState>,
    Json(body): Json<AdjustRequest>,
) -> Result<Json<StockChange>, ApiError> {
    Ok(Json(inventory::adjust_stock(&state, &body).await?))
}

/// `GET /api/inventory/export.csv` — same filters as the list.
pub async fn export_csv(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Response {
    let items = inventory::list_inventory(&state, &q).await;
    csv_response("inventory.csv", report::inventory_csv(&items))
}
