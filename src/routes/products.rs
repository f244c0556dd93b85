//! Product catalog routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::error::ApiError;
use crate::services::product::{self, Product, ProductInput};
use crate::services::query::{ListQuery, Page};
use crate::state::AppState;

/// `GET /api/products` — paginated list filtered by `search`, `category`, `location`.
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Json<Page<Product>> {
    Json(product::list_products(&state, &q).await)
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let row = product::create_product(&state, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /api/products/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    Ok(Json(product::get_product(&state, &id).await?))
}

/// `PUT /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(product::update_product(&state, &id, body).await?))
}

/// `DELETE /api/products/{id}` — also drops the product's stock levels.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    product::delete_product(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
