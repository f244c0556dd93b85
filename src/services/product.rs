//! Product catalog — validated CRUD with search, filters and pagination.
//!
//! A product's `quantity` is its unassigned pool: units received but not yet
//! placed in any warehouse. The inventory ledger moves units between this
//! pool and per-warehouse stock levels.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::catalog::{self, CatalogError, ValidationError};
use crate::services::inventory;
use crate::services::query::{self, ListQuery, Page};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl ProductCondition {
    pub const ALL: [Self; 3] = [Self::New, Self::Used, Self::Refurbished];

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "New" => Some(Self::New),
            "Used" => Some(Self::Used),
            "Refurbished" => Some(Self::Refurbished),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Unassigned units.
    pub quantity: u64,
    pub location: String,
    pub condition: ProductCondition,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub location: String,
    pub condition: Option<String>,
    pub weight_kg: Option<f64>,
}

// =============================================================================
// VALIDATION
// =============================================================================

fn build(id: String, input: ProductInput, existing: Option<&Product>) -> Result<Product, ValidationError> {
    let name = catalog::min_len("name", &input.name, 2, "Name must be at least 2 characters")?;
    let category = catalog::min_len("category", &input.category, 1, "Category is required")?;
    let price = catalog::non_negative("price", input.price)?;
    let quantity =
        u64::try_from(input.quantity).map_err(|_| ValidationError::new("quantity", "must be zero or greater"))?;
    let weight_kg = match input.weight_kg {
        Some(w) => catalog::non_negative("weight_kg", w)?,
        None => existing.map_or(0.0, |p| p.weight_kg),
    };
    let condition = match input.condition.as_deref() {
        None => existing.map_or(ProductCondition::New, |p| p.condition),
        Some(raw) => ProductCondition::parse(raw)
            .ok_or_else(|| ValidationError::new("condition", "must be 'New', 'Used' or 'Refurbished'"))?,
    };

    Ok(Product { id, name, category, price, quantity, location: input.location.trim().to_string(), condition, weight_kg })
}

fn not_found(id: &str) -> CatalogError {
    CatalogError::NotFound { kind: "product", id: id.to_string() }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// List products matching `search` (name or id), `location` and `category`.
pub async fn list_products(state: &AppState, q: &ListQuery) -> Page<Product> {
    let store = state.store.read().await;
    let rows: Vec<Product> = store
        .products
        .values()
        .filter(|p| query::matches_search(q.search.as_deref(), &[&p.name, &p.id]))
        .filter(|p| query::matches_filter(q.location.as_deref(), &p.location))
        .filter(|p| query::matches_filter(q.category.as_deref(), &p.category))
        .cloned()
        .collect();

    query::paginate(rows, q.page, q.page_size.unwrap_or(state.config.page_size))
}

/// # Errors
///
/// Returns `NotFound` if no product has this id.
pub async fn get_product(state: &AppState, id: &str) -> Result<Product, CatalogError> {
    let store = state.store.read().await;
    store.products.get(id).cloned().ok_or_else(|| not_found(id))
}

/// # Errors
///
/// Returns `Invalid` if the input fails validation.
pub async fn create_product(state: &AppState, input: ProductInput) -> Result<Product, CatalogError> {
    let mut store = state.store.write().await;
    let mut next_seq = store.sequences.product;
    let id = catalog::next_id(&mut next_seq, "P");
    let product = build(id, input, None)?;

    store.sequences.product = next_seq;
    store.products.insert(product.id.clone(), product.clone());
    info!(id = %product.id, name = %product.name, "product created");
    Ok(product)
}

/// # Errors
///
/// Returns `NotFound` for an unknown id, `Invalid` if the input fails validation.
pub async fn update_product(state: &AppState, id: &str, input: ProductInput) -> Result<Product, CatalogError> {
    let mut store = state.store.write().await;
    let existing = store.products.get(id).ok_or_else(|| not_found(id))?;
    let updated = build(id.to_string(), input, Some(existing))?;

    store.products.insert(id.to_string(), updated.clone());
    info!(%id, "product updated");
    Ok(updated)
}

/// Delete a product and every stock level held for it. Dropped units are
/// logged as `adjust` movements.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id.
pub async fn delete_product(state: &AppState, id: &str) -> Result<(), CatalogError> {
    let mut store = state.store.write().await;
    if store.products.remove(id).is_none() {
        return Err(not_found(id));
    }
    let dropped = inventory::drop_all_for_product(&mut store, id);
    info!(%id, dropped_units = dropped, "product deleted");
    Ok(())
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
