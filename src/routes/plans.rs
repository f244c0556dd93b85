//! Loading plan routes.

use axum::extract::{Query, State};
use axum::response::{Json, Response};
use serde::Deserialize;

use crate::routes::error::ApiError;
use crate::routes::inventory::csv_response;
use crate::services::allocator::Item;
use crate::services::loading::{self, LoadItem, PlanReport};
use crate::services::report;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AllocateBody {
    #[serde(default)]
    pub items: Vec<Item>,
    pub capacity: Option<f64>,
}

#[derive(Deserialize)]
pub struct LoadingQuery {
    pub warehouse_id: Option<String>,
    pub capacity: Option<f64>,
}

/// `POST /api/plans/allocate` — allocate the posted items.
pub async fn allocate(State(state): State<AppState>, Json(body): Json<AllocateBody>) -> Json<PlanReport<Item>> {
    Json(loading::plan_items(&state, body.items, body.capacity))
}

/// `GET /api/plans/loading?warehouse_id=&capacity=` — plan over the catalog.
pub async fn loading(
    State(state): State<AppState>,
    Query(q): Query<LoadingQuery>,
) -> Result<Json<PlanReport<LoadItem>>, ApiError> {
    Ok(Json(loading::plan_from_catalog(&state, q.warehouse_id.as_deref(), q.capacity).await?))
}

/// `GET /api/plans/loading.csv` — the same plan as CSV.
pub async fn loading_csv(State(state): State<AppState>, Query(q): Query<LoadingQuery>) -> Result<Response, ApiError> {
    let report = loading::plan_from_catalog(&state, q.warehouse_id.as_deref(), q.capacity).await?;
    Ok(csv_response("loading-plan.csv", report::plan_csv(&report)))
}
