//! Courier roster — validated CRUD with status filter and search.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::services::catalog::{self, CatalogError, ValidationError};
use crate::services::query::{self, ListQuery, Page};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStatus {
    Active,
    Inactive,
}

impl CourierStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Map coordinates for a courier's current position, stops and destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierRoute {
    pub current: [f64; 2],
    pub destination: [f64; 2],
    #[serde(default)]
    pub stops: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub id: String,
    pub name: String,
    pub image: String,
    pub current_location: String,
    pub destination: String,
    pub stops: Vec<String>,
    pub route: Option<CourierRoute>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub eta: Option<OffsetDateTime>,
    pub status: CourierStatus,
    pub vehicle: String,
    pub phone: String,
    pub deliveries: u32,
    pub total_distance: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourierInput {
    pub name: String,
    pub image: String,
    pub current_location: String,
    pub destination: String,
    pub stops: Vec<String>,
    pub route: Option<CourierRoute>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub eta: Option<OffsetDateTime>,
    pub status: Option<String>,
    pub phone: String,
    pub vehicle: String,
    pub deliveries: Option<u32>,
    pub total_distance: Option<String>,
}

// =============================================================================
// VALIDATION
// =============================================================================

fn build(id: String, input: CourierInput, existing: Option<&Courier>) -> Result<Courier, ValidationError> {
    let name = catalog::min_len("name", &input.name, 2, "Name must be at least 2 characters")?;
    let image = catalog::http_url("image", &input.image)?;
    let current_location =
        catalog::min_len("current_location", &input.current_location, 2, "Current location is required")?;
    let destination = catalog::min_len("destination", &input.destination, 2, "Destination is required")?;
    let status = match input.status.as_deref() {
        None => existing.map_or(CourierStatus::Active, |c| c.status),
        Some(raw) => {
            CourierStatus::parse(raw).ok_or_else(|| ValidationError::new("status", "must be 'active' or 'inactive'"))?
        }
    };
    let phone = catalog::min_len("phone", &input.phone, 10, "Phone number must be at least 10 characters")?;
    let vehicle = catalog::min_len("vehicle", &input.vehicle, 2, "Vehicle information is required")?;

    Ok(Courier {
        id,
        name,
        image,
        current_location,
        destination,
        stops: input.stops.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
        route: input.route.or_else(|| existing.and_then(|c| c.route.clone())),
        eta: input.eta.or_else(|| existing.and_then(|c| c.eta)),
        status,
        vehicle,
        phone,
        deliveries: input.deliveries.or_else(|| existing.map(|c| c.deliveries)).unwrap_or(0),
        total_distance: input
            .total_distance
            .or_else(|| existing.map(|c| c.total_distance.clone()))
            .unwrap_or_default(),
        last_update: OffsetDateTime::now_utc(),
    })
}

fn not_found(id: &str) -> CatalogError {
    CatalogError::NotFound { kind: "courier", id: id.to_string() }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// List couriers matching `search` (name or vehicle) and `status`.
pub async fn list_couriers(state: &AppState, q: &ListQuery) -> Page<Courier> {
    let store = state.store.read().await;
    let rows: Vec<Courier> = store
        .couriers
        .values()
        .filter(|c| query::matches_search(q.search.as_deref(), &[&c.name, &c.vehicle]))
        .filter(|c| query::matches_filter(q.status.as_deref(), c.status.as_str()))
        .cloned()
        .collect();

    query::paginate(rows, q.page, q.page_size.unwrap_or(state.config.page_size))
}

/// # Errors
///
/// Returns `NotFound` if no courier has this id.
pub async fn get_courier(state: &AppState, id: &str) -> Result<Courier, CatalogError> {
    let store = state.store.read().await;
    store.couriers.get(id).cloned().ok_or_else(|| not_found(id))
}

/// # Errors
///
/// Returns `Invalid` if the input fails validation.
pub async fn create_courier(state: &AppState, input: CourierInput) -> Result<Courier, CatalogError> {
    let mut store = state.store.write().await;
    let mut next_seq = store.sequences.courier;
    let id = catalog::next_id(&mut next_seq, "C");
    let courier = build(id, input, None)?;

    store.sequences.courier = next_seq;
    store.couriers.insert(courier.id.clone(), courier.clone());
    info!(id = %courier.id, name = %courier.name, "courier created");
    Ok(courier)
}

/// # Errors
///
/// Returns `NotFound` for an unknown id, `Invalid` if the input fails validation.
pub async fn update_courier(state: &AppState, id: &str, input: CourierInput) -> Result<Courier, CatalogError> {
    let mut store = state.store.write().await;
    let existing = store.couriers.get(id).ok_or_else(|| not_found(id))?;
    let updated = build(id.to_string(), input, Some(existing))?;

    store.couriers.insert(id.to_string(), updated.clone());
    info!(%id, "courier updated");
    Ok(updated)
}

/// # Errors
///
/// Returns `NotFound` for an unknown id.
pub async fn delete_courier(state: &AppState, id: &str) -> Result<(), CatalogError> {
    let mut store = state.store.write().await;
    if store.couriers.remove(id).is_none() {
        return Err(not_found(id));
    }
    info!(%id, "courier deleted");
    Ok(())
}

#[cfg(test)]
#[path = "courier_test.rs"]
mod tests;
