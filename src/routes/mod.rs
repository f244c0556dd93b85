//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/auth/*` and `/healthz` are public. Everything under `/api` sits behind
//! the auth cookie guard. CORS allows any origin and every request is traced.

pub mod auth;
pub mod bins;
pub mod couriers;
pub mod error;
pub mod inventory;
pub mod labels;
pub mod orders;
pub mod plans;
pub mod products;
pub mod warehouses;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/warehouses", get(warehouses::list).post(warehouses::create))
        .route(
            "/api/warehouses/{id}",
            get(warehouses::get).put(warehouses::update).delete(warehouses::delete),
        )
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/api/couriers", get(couriers::list).post(couriers::create))
        .route(
            "/api/couriers/{id}",
            get(couriers::get).put(couriers::update).delete(couriers::delete),
        )
        .route("/api/inventory", get(inventory::list))
        .route("/api/inventory/summary", get(inventory::summary))
        .route("/api/inventory/restock", get(inventory::restock))
        .route("/api/inventory/movements", get(inventory::movements))
        .route("/api/inventory/assign", post(inventory::assign))
        .route("/api/inventory/release", post(inventory::release))
        .route("/api/inventory/adjust", post(inventory::adjust))
        .route("/api/inventory/export.csv", get(inventory::export_csv))
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/{id}", get(orders::get))
        .route("/api/orders/{id}/advance", post(orders::advance))
        .route("/api/bins", get(bins::list).post(bins::create))
        .route("/api/labels", post(labels::create))
        .route("/api/plans/allocate", post(plans::allocate))
        .route("/api/plans/loading", get(plans::loading))
        .route("/api/plans/loading.csv", get(plans::loading_csv))
        .route_layer(middleware::from_fn_with_state(state, auth::require_auth))
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/healthz", get(healthz))
        .merge(api_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
