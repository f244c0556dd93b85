//! Storage bin routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::error::ApiError;
use crate::services::bin::{self, Bin, BinInput};
use crate::state::AppState;

/// `GET /api/bins`
pub async fn list(State(state): State<AppState>) -> Json<Vec<Bin>> {
    Json(bin::list_bins(&state).await)
}

/// `POST /api/bins` — name and location are both required.
pub async fn create(State(state): State<AppState>, Json(body): Json<BinInput>) -> Result<(StatusCode, Json<Bin>), ApiError> {
    let row = bin::create_bin(&state, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
