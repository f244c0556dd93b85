//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Every record lives in a single in-memory `Store` behind one async
//! `RwLock`; a mutating operation holds the write lock for its whole
//! duration, so each operation is atomic with respect to other requests.
//! Nothing is persisted.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::services::bin::Bin;
use crate::services::courier::Courier;
use crate::services::inventory::StockMovement;
use crate::services::order::Order;
use crate::services::product::Product;
use crate::services::warehouse::Warehouse;

// =============================================================================
// STORE
// =============================================================================

/// Last issued number per display-id prefix.
#[derive(Debug, Default)]
pub struct Sequences {
    pub warehouse: u64,
    pub product: u64,
    pub courier: u64,
    pub order: u64,
}

/// All domain records. Maps keyed by display id are ordered, so listings
/// come out in id order.
#[derive(Debug, Default)]
pub struct Store {
    pub warehouses: BTreeMap<String, Warehouse>,
    pub products: BTreeMap<String, Product>,
    pub couriers: BTreeMap<String, Courier>,
    /// Product id -> warehouse id -> units held there. Zero levels are removed.
    pub stock: HashMap<String, BTreeMap<String, u64>>,
    /// Append-only ledger.
    pub movements: Vec<StockMovement>,
    pub orders: BTreeMap<String, Order>,
    pub bins: Vec<Bin>,
    pub sequences: Sequences,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<RwLock<Store>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config), store: Arc::new(RwLock::new(Store::default())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
