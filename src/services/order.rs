//! Order board — orders advance Pending → Processing → Shipped → Delivered.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::error::ErrorCode;
use crate::services::catalog;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order not found: {0}")]
    NotFound(String),
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("warehouse not found: {0}")]
    WarehouseNotFound(String),
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("unknown order status: {0}")]
    InvalidStatus(String),
}

impl ErrorCode for OrderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_ORDER_NOT_FOUND",
            Self::ProductNotFound(_) => "E_PRODUCT_NOT_FOUND",
            Self::WarehouseNotFound(_) => "E_WAREHOUSE_NOT_FOUND",
            Self::InvalidQuantity => "E_INVALID_QUANTITY",
            Self::InvalidStatus(_) => "E_INVALID_STATUS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Next status in the pipeline. `Delivered` is terminal.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Pending => Self::Processing,
            Self::Processing => Self::Shipped,
            Self::Shipped | Self::Delivered => Self::Delivered,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub warehouse_id: String,
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderInput {
    pub product_id: String,
    pub quantity: u32,
    pub warehouse_id: String,
}

/// # Errors
///
/// `InvalidQuantity` for zero, `ProductNotFound`/`WarehouseNotFound` when the
/// order references unknown records.
pub async fn create_order(state: &AppState, input: OrderInput) -> Result<Order, OrderError> {
    if input.quantity == 0 {
        return Err(OrderError::InvalidQuantity);
    }
    let mut store = state.store.write().await;
    if !store.products.contains_key(&input.product_id) {
        return Err(OrderError::ProductNotFound(input.product_id));
    }
    if !store.warehouses.contains_key(&input.warehouse_id) {
        return Err(OrderError::WarehouseNotFound(input.warehouse_id));
    }

    let id = catalog::next_id(&mut store.sequences.order, "ORD");
    let order = Order {
        id,
        product_id: input.product_id,
        quantity: input.quantity,
        warehouse_id: input.warehouse_id,
        status: OrderStatus::Pending,
        updated_at: OffsetDateTime::now_utc(),
    };
    store.orders.insert(order.id.clone(), order.clone());
    info!(id = %order.id, product_id = %order.product_id, quantity = order.quantity, "order created");
    Ok(order)
}

/// Move an order one step along the pipeline. Delivered orders are returned
/// unchanged.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id.
pub async fn advance_order(state: &AppState, id: &str) -> Result<Order, OrderError> {
    let mut store = state.store.write().await;
    let order = store
        .orders
        .get_mut(id)
        .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

    let next = order.status.next();
    if next != order.status {
        info!(%id, from = ?order.status, to = ?next, "order advanced");
        order.status = next;
        order.updated_at = OffsetDateTime::now_utc();
    }
    Ok(order.clone())
}

/// # Errors
///
/// Returns `NotFound` for an unknown id.
pub async fn get_order(state: &AppState, id: &str) -> Result<Order, OrderError> {
    let store = state.store.read().await;
    store
        .orders
        .get(id)
        .cloned()
        .ok_or_else(|| OrderError::NotFound(id.to_string()))
}

/// Orders ordered by id, optionally restricted to one status.
///
/// # Errors
///
/// Returns `InvalidStatus` when `status` names no known status.
pub async fn list_orders(state: &AppState, status: Option<&str>) -> Result<Vec<Order>, OrderError> {
    let wanted = match status.map(str::trim) {
        None | Some("" | "all") => None,
        Some(raw) => Some(OrderStatus::parse(raw).ok_or_else(|| OrderError::InvalidStatus(raw.to_string()))?),
    };
    let store = state.store.read().await;
    Ok(store
        .orders
        .values()
        .filter(|o| wanted.is_none_or(|s| o.status == s))
        .cloned()
        .collect())
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
