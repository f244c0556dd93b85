//! Inventory ledger — per-warehouse stock levels with a movement log.
//!
//! DESIGN
//! ======
//! Each product owns an unassigned pool (`Product::quantity`). Assigning
//! moves units from the pool into a warehouse; releasing moves them back.
//! Adjustments change a warehouse level directly (counts, damage, found
//! stock) and clamp at zero. Every change appends a `StockMovement` carrying
//! the delta actually applied, so the log replays to the current levels.
//!
//! All checks happen under the store write lock before anything is mutated:
//! a rejected operation leaves levels, pools and the log untouched.
//!
//! Levels and pools never exceed `MAX_UNITS` (`i64::MAX`), so every movement
//! quantity is exact as an `i64`. Deleting a product records the units it
//! drops as `adjust` movements, so replay holds for deleted products too.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::services::order::OrderStatus;
use crate::services::query::{self, ListQuery, SortDirection};
use crate::state::{AppState, Store};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("warehouse not found: {0}")]
    WarehouseNotFound(String),
    #[error("quantity must be non-zero")]
    InvalidQuantity,
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u64 },
    #[error("quantity exceeds the supported maximum of {max} units")]
    QuantityOverflow { max: u64 },
}

impl ErrorCode for InventoryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ProductNotFound(_) => "E_PRODUCT_NOT_FOUND",
            Self::WarehouseNotFound(_) => "E_WAREHOUSE_NOT_FOUND",
            Self::InvalidQuantity => "E_INVALID_QUANTITY",
            Self::InsufficientStock { .. } => "E_INSUFFICIENT_STOCK",
            Self::QuantityOverflow { .. } => "E_QUANTITY_OVERFLOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Assign,
    Release,
    Adjust,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: String,
    pub warehouse_id: String,
    pub kind: MovementKind,
    /// Signed change to the warehouse level.
    pub quantity: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

/// Body for assign and release.
#[derive(Debug, Clone, Deserialize)]
pub struct StockRequest {
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustRequest {
    pub product_id: String,
    pub warehouse_id: String,
    pub delta: i64,
}

/// Result of a ledger operation: the movement plus the levels it left behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockChange {
    pub movement: StockMovement,
    pub warehouse_quantity: u64,
    pub unassigned_quantity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
}

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub total_stock: u64,
    pub unassigned: u64,
    /// Warehouse id -> units held there.
    pub distribution: BTreeMap<String, u64>,
    pub status: StockStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_updated: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub total_skus: usize,
    pub low_stock: usize,
    pub total_units: u64,
    pub unassigned_units: u64,
    pub active_orders: usize,
    pub processing_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestockRecommendation {
    pub product_id: String,
    pub product: String,
    pub stock: u64,
    pub recommended_quantity: u64,
    pub reason: String,
}

// =============================================================================
// LEDGER
// =============================================================================

/// Upper bound for any stock level or pool.
pub const MAX_UNITS: u64 = i64::MAX.unsigned_abs();

fn overflow() -> InventoryError {
    InventoryError::QuantityOverflow { max: MAX_UNITS }
}

/// `a + b`, rejected when the result would pass `MAX_UNITS`.
fn add_units(a: u64, b: u64) -> Result<u64, InventoryError> {
    a.checked_add(b).filter(|sum| *sum <= MAX_UNITS).ok_or_else(overflow)
}

fn signed(quantity: u64) -> Result<i64, InventoryError> {
    i64::try_from(quantity).map_err(|_| overflow())
}

fn record(store: &mut Store, product_id: &str, warehouse_id: &str, kind: MovementKind, quantity: i64) -> StockMovement {
    let movement = StockMovement {
        id: Uuid::new_v4(),
        product_id: product_id.to_string(),
        warehouse_id: warehouse_id.to_string(),
        kind,
        quantity,
        at: OffsetDateTime::now_utc(),
    };
    store.movements.push(movement.clone());
    movement
}

fn ensure_warehouse(store: &Store, warehouse_id: &str) -> Result<(), InventoryError> {
    if store.warehouses.contains_key(warehouse_id) {
        Ok(())
    } else {
        Err(InventoryError::WarehouseNotFound(warehouse_id.to_string()))
    }
}

fn level(store: &Store, product_id: &str, warehouse_id: &str) -> u64 {
    store
        .stock
        .get(product_id)
        .and_then(|levels| levels.get(warehouse_id))
        .copied()
        .unwrap_or(0)
}

fn set_level(store: &mut Store, product_id: &str, warehouse_id: &str, quantity: u64) {
    if quantity == 0 {
        if let Some(levels) = store.stock.get_mut(product_id) {
            levels.remove(warehouse_id);
            if levels.is_empty() {
                store.stock.remove(product_id);
            }
        }
    } else {
        store
            .stock
            .entry(product_id.to_string())
            .or_default()
            .insert(warehouse_id.to_string(), quantity);
    }
}

/// Move units from a product's unassigned pool into a warehouse.
///
/// # Errors
///
/// `InvalidQuantity` for zero, `ProductNotFound`/`WarehouseNotFound` for
/// unknown ids, `InsufficientStock` when the pool holds fewer units,
/// `QuantityOverflow` when the warehouse level would pass `MAX_UNITS`.
pub async fn assign_stock(state: &AppState, req: &StockRequest) -> Result<StockChange, InventoryError> {
    if req.quantity == 0 {
        return Err(InventoryError::InvalidQuantity);
    }
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    ensure_warehouse(store, &req.warehouse_id)?;

    let available = store
        .products
        .get(&req.product_id)
        .map(|p| p.quantity)
        .ok_or_else(|| InventoryError::ProductNotFound(req.product_id.clone()))?;
    if available < req.quantity {
        warn!(product_id = %req.product_id, requested = req.quantity, available, "assign rejected");
        return Err(InventoryError::InsufficientStock { requested: req.quantity, available });
    }
    let warehouse_quantity = add_units(level(store, &req.product_id, &req.warehouse_id), req.quantity)?;
    let delta = signed(req.quantity)?;

    let unassigned_quantity = available - req.quantity;
    if let Some(product) = store.products.get_mut(&req.product_id) {
        product.quantity = unassigned_quantity;
    }
    set_level(store, &req.product_id, &req.warehouse_id, warehouse_quantity);
    let movement = record(store, &req.product_id, &req.warehouse_id, MovementKind::Assign, delta);

    info!(product_id = %req.product_id, warehouse_id = %req.warehouse_id, quantity = req.quantity, "stock assigned");
    Ok(StockChange { movement, warehouse_quantity, unassigned_quantity })
}

/// Move units from a warehouse back into the product's unassigned pool.
///
/// # Errors
///
/// `InvalidQuantity` for zero, `ProductNotFound`/`WarehouseNotFound` for
/// unknown ids, `InsufficientStock` when the warehouse holds fewer units,
/// `QuantityOverflow` when the pool would pass `MAX_UNITS`.
pub async fn release_stock(state: &AppState, req: &StockRequest) -> Result<StockChange, InventoryError> {
    if req.quantity == 0 {
        return Err(InventoryError::InvalidQuantity);
    }
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    ensure_warehouse(store, &req.warehouse_id)?;
    let pool = store
        .products
        .get(&req.product_id)
        .map(|p| p.quantity)
        .ok_or_else(|| InventoryError::ProductNotFound(req.product_id.clone()))?;

    let held = level(store, &req.product_id, &req.warehouse_id);
    if held < req.quantity {
        return Err(InventoryError::InsufficientStock { requested: req.quantity, available: held });
    }
    let unassigned_quantity = add_units(pool, req.quantity)?;
    let delta = signed(req.quantity)?;

    let warehouse_quantity = held - req.quantity;
    set_level(store, &req.product_id, &req.warehouse_id, warehouse_quantity);
    if let Some(product) = store.products.get_mut(&req.product_id) {
        product.quantity = unassigned_quantity;
    }
    let movement = record(store, &req.product_id, &req.warehouse_id, MovementKind::Release, -delta);

    info!(product_id = %req.product_id, warehouse_id = %req.warehouse_id, quantity = req.quantity, "stock released");
    Ok(StockChange { movement, warehouse_quantity, unassigned_quantity })
}

/// Apply a signed correction to a warehouse level, clamping at zero. The
/// recorded movement holds the delta actually applied.
///
/// # Errors
///
/// `InvalidQuantity` for a zero delta, `ProductNotFound`/`WarehouseNotFound`
/// for unknown ids, `QuantityOverflow` when the level would pass `MAX_UNITS`.
pub async fn adjust_stock(state: &AppState, req: &AdjustRequest) -> Result<StockChange, InventoryError> {
    if req.delta == 0 {
        return Err(InventoryError::InvalidQuantity);
    }
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    ensure_warehouse(store, &req.warehouse_id)?;
    let unassigned_quantity = store
        .products
        .get(&req.product_id)
        .map(|p| p.quantity)
        .ok_or_else(|| InventoryError::ProductNotFound(req.product_id.clone()))?;

    let held = level(store, &req.product_id, &req.warehouse_id);
    let warehouse_quantity = if req.delta < 0 {
        held.saturating_sub(req.delta.unsigned_abs())
    } else {
        add_units(held, req.delta.unsigned_abs())?
    };
    // Both sides are within MAX_UNITS, so the difference fits an i64.
    let applied = signed(warehouse_quantity)? - signed(held)?;
    set_level(store, &req.product_id, &req.warehouse_id, warehouse_quantity);

    let movement = record(store, &req.product_id, &req.warehouse_id, MovementKind::Adjust, applied);

    info!(product_id = %req.product_id, warehouse_id = %req.warehouse_id, requested = req.delta, applied, "stock adjusted");
    Ok(StockChange { movement, warehouse_quantity, unassigned_quantity })
}

/// Return every unit held at `warehouse_id` to its product's pool. Used when
/// a warehouse is deleted. Returns the number of units moved.
///
/// # Errors
///
/// `QuantityOverflow` when any pool would pass `MAX_UNITS`; nothing is
/// changed in that case.
pub(crate) fn release_all_at_warehouse(store: &mut Store, warehouse_id: &str) -> Result<u64, InventoryError> {
    let mut moves = Vec::new();
    for (product_id, levels) in &store.stock {
        let Some(&held) = levels.get(warehouse_id) else {
            continue;
        };
        let pool = store.products.get(product_id).map_or(0, |p| p.quantity);
        moves.push((product_id.clone(), held, add_units(pool, held)?, signed(held)?));
    }

    let mut total: u64 = 0;
    for (product_id, held, new_pool, delta) in moves {
        set_level(store, &product_id, warehouse_id, 0);
        if let Some(product) = store.products.get_mut(&product_id) {
            product.quantity = new_pool;
        }
        record(store, &product_id, warehouse_id, MovementKind::Release, -delta);
        total = total.saturating_add(held);
    }
    Ok(total)
}

/// Drop every level held for `product_id`, recording each as an `adjust`
/// down to zero. Used when a product is deleted. Returns the units dropped.
pub(crate) fn drop_all_for_product(store: &mut Store, product_id: &str) -> u64 {
    let Some(levels) = store.stock.remove(product_id) else {
        return 0;
    };
    let mut total: u64 = 0;
    for (warehouse_id, held) in levels {
        // Levels never pass MAX_UNITS, so the conversion is exact.
        let delta = i64::try_from(held).unwrap_or(i64::MAX);
        record(store, product_id, &warehouse_id, MovementKind::Adjust, -delta);
        total = total.saturating_add(held);
    }
    total
}

/// Movement log, oldest first, optionally for one product.
pub async fn list_movements(state: &AppState, product_id: Option<&str>) -> Vec<StockMovement> {
    let store = state.store.read().await;
    store
        .movements
        .iter()
        .filter(|m| product_id.is_none_or(|id| m.product_id == id))
        .cloned()
        .collect()
}

// =============================================================================
// READ MODELS
// =============================================================================

fn build_items(store: &Store, low_stock_threshold: u64) -> Vec<InventoryItem> {
    store
        .products
        .values()
        .map(|product| {
            let distribution = store.stock.get(&product.id).cloned().unwrap_or_default();
            let total_stock = distribution.values().fold(0, |acc: u64, q| acc.saturating_add(*q));
            let last_updated = store
                .movements
                .iter()
                .rev()
                .find(|m| m.product_id == product.id)
                .map(|m| m.at);
            InventoryItem {
                sku: product.id.clone(),
                name: product.name.clone(),
                category: product.category.clone(),
                total_stock,
                unassigned: product.quantity,
                distribution,
                status: if total_stock < low_stock_threshold { StockStatus::LowStock } else { StockStatus::InStock },
                last_updated,
            }
        })
        .collect()
}

fn compare(a: &InventoryItem, b: &InventoryItem, key: &str) -> Ordering {
    match key {
        "name" => a.name.cmp(&b.name),
        "total_stock" => a.total_stock.cmp(&b.total_stock),
        _ => a.sku.cmp(&b.sku),
    }
}

/// Inventory table: search by sku or name, filter by `category` and by
/// `warehouse` (items with stock there), sort by `id`, `name` or
/// `total_stock`.
pub async fn list_inventory(state: &AppState, q: &ListQuery) -> Vec<InventoryItem> {
    let store = state.store.read().await;
    let mut items: Vec<InventoryItem> = build_items(&store, state.config.low_stock_threshold)
        .into_iter()
        .filter(|i| query::matches_search(q.search.as_deref(), &[&i.name, &i.sku]))
        .filter(|i| query::matches_filter(q.category.as_deref(), &i.category))
        .filter(|i| match q.warehouse.as_deref().map(str::trim) {
            None | Some("" | "all") => true,
            Some(w) => i.distribution.get(w).is_some_and(|units| *units > 0),
        })
        .collect();

    if let Some(key) = q.sort.as_deref() {
        let direction = q.direction.unwrap_or_default();
        items.sort_by(|a, b| {
            let ord = compare(a, b, key);
            if direction == SortDirection::Desc { ord.reverse() } else { ord }
        });
    }
    items
}

pub async fn inventory_summary(state: &AppState) -> InventorySummary {
    let store = state.store.read().await;
    let items = build_items(&store, state.config.low_stock_threshold);

    InventorySummary {
        total_skus: items.len(),
        low_stock: items.iter().filter(|i| i.status == StockStatus::LowStock).count(),
        total_units: items.iter().fold(0, |acc: u64, i| acc.saturating_add(i.total_stock)),
        unassigned_units: items.iter().fold(0, |acc: u64, i| acc.saturating_add(i.unassigned)),
        active_orders: store.orders.values().filter(|o| o.status != OrderStatus::Delivered).count(),
        processing_orders: store.orders.values().filter(|o| o.status == OrderStatus::Processing).count(),
    }
}

/// Products whose warehouse stock has fallen below the restock threshold,
/// with the quantity needed to reach the restock target.
pub async fn restock_recommendations(state: &AppState) -> Vec<RestockRecommendation> {
    let store = state.store.read().await;
    let threshold = state.config.restock_threshold;
    let target = state.config.restock_target;

    build_items(&store, state.config.low_stock_threshold)
        .into_iter()
        .filter(|i| i.total_stock < threshold)
        .map(|i| RestockRecommendation {
            recommended_quantity: target.saturating_sub(i.total_stock),
            reason: format!("Only {} left. Restock at least {} units.", i.total_stock, target.saturating_sub(i.total_stock)),
            product_id: i.sku,
            product: i.name,
            stock: i.total_stock,
        })
        .collect()
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
