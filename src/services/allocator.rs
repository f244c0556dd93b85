//! Capacity allocator — greedy loading/unloading plans.
//!
//! DESIGN
//! ======
//! Items are sorted heaviest first and walked once. An item joins the
//! loading plan when the running total stays within capacity, otherwise it
//! joins the unloading plan. A rejected heavy item never blocks lighter items
//! behind it. There is no backtracking and only one container, so the result
//! is a heuristic rather than an optimal packing.
//!
//! The sort is stable: items of equal weight keep their input order, which
//! makes plans deterministic for a given input.

use serde::{Deserialize, Serialize};

/// Max weight per pallet/container in kg.
pub const DEFAULT_CAPACITY_KG: f64 = 1000.0;

// =============================================================================
// TYPES
// =============================================================================

/// Anything the allocator can place.
pub trait Weighted {
    /// Raw weight. Negative and NaN values are treated as zero.
    fn weight(&self) -> f64;
}

/// Free-standing allocator input, as posted by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Missing or `null` weights count as zero.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Weighted for Item {
    fn weight(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }
}

/// Partition of the input into loaded and unloaded items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan<T> {
    pub loaded: Vec<T>,
    pub unloaded: Vec<T>,
}

impl<T> Default for Plan<T> {
    fn default() -> Self {
        Self { loaded: Vec::new(), unloaded: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanSummary {
    pub capacity: f64,
    pub loaded_count: usize,
    pub unloaded_count: usize,
    pub loaded_weight: f64,
    pub unloaded_weight: f64,
    pub utilization_percent: f64,
}

impl<T: Weighted> Plan<T> {
    #[must_use]
    pub fn loaded_weight(&self) -> f64 {
        self.loaded.iter().map(|i| effective_weight(i.weight())).sum()
    }

    #[must_use]
    pub fn unloaded_weight(&self) -> f64 {
        self.unloaded.iter().map(|i| effective_weight(i.weight())).sum()
    }

    /// Counts, weights and the share of `capacity` the loaded items use.
    #[must_use]
    pub fn summary(&self, capacity: f64) -> PlanSummary {
        let capacity = effective_weight(capacity);
        let loaded_weight = self.loaded_weight();
        let utilization_percent = if capacity > 0.0 { loaded_weight / capacity * 100.0 } else { 0.0 };

        PlanSummary {
            capacity,
            loaded_count: self.loaded.len(),
            unloaded_count: self.unloaded.len(),
            loaded_weight,
            unloaded_weight: self.unloaded_weight(),
            utilization_percent,
        }
    }
}

// =============================================================================
// ALLOCATION
// =============================================================================

/// Clamp a weight or capacity into the allocator's domain.
#[must_use]
pub fn effective_weight(raw: f64) -> f64 {
    if raw.is_nan() || raw < 0.0 { 0.0 } else { raw }
}

/// Greedily partition `items` so the loaded weight never exceeds `capacity`.
#[must_use]
pub fn allocate<T: Weighted>(mut items: Vec<T>, capacity: f64) -> Plan<T> {
    let capacity = effective_weight(capacity);
    items.sort_by(|a, b| effective_weight(b.weight()).total_cmp(&effective_weight(a.weight())));

    let mut plan = Plan { loaded: Vec::with_capacity(items.len()), unloaded: Vec::new() };
    let mut current = 0.0;

    for item in items {
        let weight = effective_weight(item.weight());
        if current + weight <= capacity {
            current += weight;
            plan.loaded.push(item);
        } else {
            plan.unloaded.push(item);
        }
    }

    plan
}

#[cfg(test)]
#[path = "allocator_test.rs"]
mod tests;
