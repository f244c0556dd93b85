//! Courier routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::error::ApiError;
use crate::services::courier::{self, Courier, CourierInput};
use crate::services::query::{ListQuery, Page};
use crate::state::AppState;

/// `GET /api/couriers` — `search` matches name or vehicle; `status` filters.
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Json<Page<Courier>> {
    Json(courier::list_couriers(&state, &q).await)
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CourierInput>,
) -> Result<(StatusCode, Json<Courier>), ApiError> {
    let row = courier::create_courier(&state, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Courier>, ApiError> {
    Ok(Json(courier::get_courier(&state, &id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CourierInput>,
) -> Result<Json<Courier>, ApiError> {
    Ok(Json(courier::update_courier(&state, &id, body).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    courier::delete_courier(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
