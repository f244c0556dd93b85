//! Order board routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::routes::error::ApiError;
use crate::services::order::{self, Order, OrderInput};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// `GET /api/orders?status=` — orders by id, optionally one status.
pub async fn list(State(state): State<AppState>, Query(q): Query<OrdersQuery>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(order::list_orders(&state, q.status.as_deref()).await?))
}

/// `POST /api/orders` — new orders start Pending.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<OrderInput>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let row = order::create_order(&state, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /api/orders/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>, ApiError> {
    Ok(Json(order::get_order(&state, &id).await?))
}

/// `POST /api/orders/{id}/advance` — one step along the pipeline.
pub async fn advance(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>, ApiError> {
    Ok(Json(order::advance_order(&state, &id).await?))
}
