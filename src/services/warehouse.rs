//! Warehouse catalog — validated CRUD, search and pagination.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::catalog::{self, CatalogError, ValidationError};
use crate::services::inventory;
use crate::services::query::{self, ListQuery, Page};
use crate::state::AppState;

/// Used when a warehouse is created without coordinates (central London).
pub const DEFAULT_COORDINATES: [f64; 2] = [51.5074, -0.1278];

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseStatus {
    Active,
    Maintenance,
}

impl WarehouseStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "active" => Some(Self::Active),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub location: String,
    /// `[latitude, longitude]`.
    pub coordinates: [f64; 2],
    pub capacity: u64,
    /// Percent of capacity in use, 0..=100.
    pub utilization: u8,
    pub revenue: u64,
    /// Distinct products stocked, as reported by the site.
    pub products: u64,
    pub manager: String,
    pub contact: String,
    pub status: WarehouseStatus,
}

/// Create/update body. Numeric fields are signed so out-of-range input is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WarehouseInput {
    pub name: String,
    pub location: String,
    pub coordinates: Option<[f64; 2]>,
    pub capacity: i64,
    pub utilization: i64,
    pub revenue: Option<u64>,
    pub products: Option<u64>,
    pub manager: String,
    pub contact: String,
    pub status: Option<String>,
}

// =============================================================================
// VALIDATION
// =============================================================================

fn build(id: String, input: WarehouseInput, existing: Option<&Warehouse>) -> Result<Warehouse, ValidationError> {
    let name = catalog::min_len("name", &input.name, 2, "Name must be at least 2 characters")?;
    let location = catalog::min_len("location", &input.location, 2, "Location is required")?;
    let capacity =
        u64::try_from(input.capacity).map_err(|_| ValidationError::new("capacity", "must be zero or greater"))?;
    let utilization = u8::try_from(input.utilization)
        .ok()
        .filter(|u| *u <= 100)
        .ok_or_else(|| ValidationError::new("utilization", "must be between 0 and 100"))?;
    let manager = catalog::min_len("manager", &input.manager, 2, "Manager name is required")?;
    let contact = catalog::min_len("contact", &input.contact, 10, "Contact number must be at least 10 characters")?;
    let status = match input.status.as_deref() {
        None => existing.map_or(WarehouseStatus::Active, |w| w.status),
        Some(raw) => WarehouseStatus::parse(raw)
            .ok_or_else(|| ValidationError::new("status", "must be 'active' or 'maintenance'"))?,
    };

    let coordinates = input
        .coordinates
        .or_else(|| existing.map(|w| w.coordinates))
        .unwrap_or(DEFAULT_COORDINATES);

    Ok(Warehouse {
        id,
        name,
        location,
        coordinates,
        capacity,
        utilization,
        revenue: input.revenue.or_else(|| existing.map(|w| w.revenue)).unwrap_or(0),
        products: input.products.or_else(|| existing.map(|w| w.products)).unwrap_or(0),
        manager,
        contact,
        status,
    })
}

fn not_found(id: &str) -> CatalogError {
    CatalogError::NotFound { kind: "warehouse", id: id.to_string() }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// List warehouses matching `search` (name or location), ordered by id.
pub async fn list_warehouses(state: &AppState, q: &ListQuery) -> Page<Warehouse> {
    let store = state.store.read().await;
    let rows: Vec<Warehouse> = store
        .warehouses
        .values()
        .filter(|w| query::matches_search(q.search.as_deref(), &[&w.name, &w.location]))
        .filter(|w| query::matches_filter(q.status.as_deref(), w.status.as_str()))
        .cloned()
        .collect();

    query::paginate(rows, q.page, q.page_size.unwrap_or(state.config.page_size))
}

/// # Errors
///
/// Returns `NotFound` if no warehouse has this id.
pub async fn get_warehouse(state: &AppState, id: &str) -> Result<Warehouse, CatalogError> {
    let store = state.store.read().await;
    store.warehouses.get(id).cloned().ok_or_else(|| not_found(id))
}

/// # Errors
///
/// Returns `Invalid` if the input fails validation.
pub async fn create_warehouse(state: &AppState, input: WarehouseInput) -> Result<Warehouse, CatalogError> {
    let mut store = state.store.write().await;
    // Validate before consuming an id so rejected input leaves no gap.
    let mut next_seq = store.sequences.warehouse;
    let id = catalog::next_id(&mut next_seq, "W");
    let warehouse = build(id, input, None)?;

    store.sequences.warehouse = next_seq;
    store.warehouses.insert(warehouse.id.clone(), warehouse.clone());
    info!(id = %warehouse.id, name = %warehouse.name, "warehouse created");
    Ok(warehouse)
}

/// # Errors
///
/// Returns `NotFound` for an unknown id, `Invalid` if the input fails validation.
pub async fn update_warehouse(state: &AppState, id: &str, input: WarehouseInput) -> Result<Warehouse, CatalogError> {
    let mut store = state.store.write().await;
    let existing = store.warehouses.get(id).ok_or_else(|| not_found(id))?;
    let updated = build(id.to_string(), input, Some(existing))?;

    store.warehouses.insert(id.to_string(), updated.clone());
    info!(%id, "warehouse updated");
    Ok(updated)
}

/// Delete a warehouse. Stock held there returns to each product's
/// unassigned pool.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, `Stock` when a product pool cannot
/// take back its units.
pub async fn delete_warehouse(state: &AppState, id: &str) -> Result<(), CatalogError> {
    let mut store = state.store.write().await;
    if !store.warehouses.contains_key(id) {
        return Err(not_found(id));
    }
    let returned = inventory::release_all_at_warehouse(&mut store, id)?;
    store.warehouses.remove(id);
    info!(%id, returned_units = returned, "warehouse deleted");
    Ok(())
}

#[cfg(test)]
#[path = "warehouse_test.rs"]
mod tests;
