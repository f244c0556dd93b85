//! Loading plans over posted items or the product catalog.

use serde::Serialize;
use tracing::info;

use crate::services::allocator::{self, Item, Plan, PlanSummary, Weighted};
use crate::services::inventory::InventoryError;
use crate::state::AppState;

/// A product as a loading candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadItem {
    pub id: String,
    pub name: String,
    pub weight: f64,
    /// Units held at the planned warehouse, when planning for one.
    pub units: Option<u64>,
}

impl Weighted for LoadItem {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// A plan with its summary, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport<T> {
    pub loaded: Vec<T>,
    pub unloaded: Vec<T>,
    pub summary: PlanSummary,
}

impl<T: Weighted> PlanReport<T> {
    #[must_use]
    pub fn new(plan: Plan<T>, capacity: f64) -> Self {
        let summary = plan.summary(capacity);
        Self { loaded: plan.loaded, unloaded: plan.unloaded, summary }
    }
}

fn resolve_capacity(state: &AppState, capacity: Option<f64>) -> f64 {
    capacity.unwrap_or(state.config.load_capacity_kg)
}

/// Allocate client-supplied items.
pub fn plan_items(state: &AppState, items: Vec<Item>, capacity: Option<f64>) -> PlanReport<Item> {
    let capacity = resolve_capacity(state, capacity);
    let report = PlanReport::new(allocator::allocate(items, capacity), capacity);
    info!(
        capacity,
        loaded = report.summary.loaded_count,
        unloaded = report.summary.unloaded_count,
        "allocated posted items"
    );
    report
}

/// Allocate one item per catalog product, weighted by `weight_kg`. With a
/// warehouse, only products stocked there are candidates.
///
/// # Errors
///
/// Returns `WarehouseNotFound` for an unknown warehouse id.
pub async fn plan_from_catalog(
    state: &AppState,
    warehouse_id: Option<&str>,
    capacity: Option<f64>,
) -> Result<PlanReport<LoadItem>, InventoryError> {
    let capacity = resolve_capacity(state, capacity);
    let items = {
        let store = state.store.read().await;
        if let Some(wid) = warehouse_id {
            if !store.warehouses.contains_key(wid) {
                return Err(InventoryError::WarehouseNotFound(wid.to_string()));
            }
        }

        store
            .products
            .values()
            .filter_map(|p| {
                let units = match warehouse_id {
                    Some(wid) => {
                        let held = store.stock.get(&p.id).and_then(|l| l.get(wid)).copied().unwrap_or(0);
                        if held == 0 {
                            return None;
                        }
                        Some(held)
                    }
                    None => None,
                };
                Some(LoadItem { id: p.id.clone(), name: p.name.clone(), weight: p.weight_kg, units })
            })
            .collect::<Vec<_>>()
    };

    let report = PlanReport::new(allocator::allocate(items, capacity), capacity);
    info!(
        warehouse_id = warehouse_id.unwrap_or("all"),
        capacity,
        loaded = report.summary.loaded_count,
        unloaded = report.summary.unloaded_count,
        "optimized loading plan"
    );
    Ok(report)
}
