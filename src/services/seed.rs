//! Randomized demo data for local runs.

use rand::Rng;
use rand::seq::IndexedRandom;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::services::courier::{self, CourierInput, CourierRoute};
use crate::services::inventory::{self, StockRequest};
use crate::services::order::{self, OrderInput};
use crate::services::product::{self, ProductCondition, ProductInput};
use crate::services::warehouse::{self, WarehouseInput};
use crate::state::AppState;

const WAREHOUSE_COUNT: usize = 25;
const PRODUCT_COUNT: usize = 50;
const ORDER_COUNT: usize = 10;

const CITIES: [&str; 5] = ["London", "Manchester", "Birmingham", "Leeds", "Glasgow"];
const CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Books", "Home & Garden", "Sports"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedCounts {
    pub warehouses: usize,
    pub products: usize,
    pub couriers: usize,
    pub orders: usize,
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

/// Populate the store with demo warehouses, products, couriers, stock and
/// orders. Inputs are generated valid; anything the services still reject
/// is skipped and not counted.
pub async fn seed_demo_data(state: &AppState) -> SeedCounts {
    let mut counts = SeedCounts::default();
    let mut warehouse_ids = Vec::new();
    let mut product_ids = Vec::new();

    for i in 1..=WAREHOUSE_COUNT {
        let input = {
            let mut rng = rand::rng();
            WarehouseInput {
                name: format!("Warehouse {i}"),
                location: pick(&mut rng, &CITIES).to_string(),
                coordinates: Some([
                    51.5074 + (rng.random::<f64>() - 0.5) * 2.0,
                    -0.1278 + (rng.random::<f64>() - 0.5) * 2.0,
                ]),
                capacity: rng.random_range(10_000..60_000),
                utilization: rng.random_range(0..=100),
                revenue: Some(rng.random_range(0..100_000)),
                products: Some(rng.random_range(0..5_000)),
                manager: format!("Manager {i}"),
                contact: format!("+44 {:010}", rng.random_range(0..10_000_000_000_u64)),
                status: Some(if rng.random_bool(0.8) { "active" } else { "maintenance" }.to_string()),
            }
        };
        if let Ok(w) = warehouse::create_warehouse(state, input).await {
            warehouse_ids.push(w.id);
            counts.warehouses += 1;
        }
    }

    for i in 1..=PRODUCT_COUNT {
        let input = {
            let mut rng = rand::rng();
            let condition = ProductCondition::ALL.choose(&mut rng).copied().unwrap_or(ProductCondition::New);
            ProductInput {
                name: format!("Product {i}"),
                category: pick(&mut rng, &CATEGORIES).to_string(),
                price: f64::from(rng.random_range(0..1000_u32)),
                quantity: rng.random_range(100..1100),
                location: pick(&mut rng, &CITIES[..3]).to_string(),
                condition: Some(format!("{condition:?}")),
                weight_kg: Some(f64::from(rng.random_range(5..400_u32))),
            }
        };
        if let Ok(p) = product::create_product(state, input).await {
            product_ids.push(p.id);
            counts.products += 1;
        }
    }

    for (product_id, quantity, warehouse_id) in random_assignments(&product_ids, &warehouse_ids) {
        let req = StockRequest { product_id, warehouse_id, quantity };
        if let Err(e) = inventory::assign_stock(state, &req).await {
            warn!(error = %e, product_id = %req.product_id, warehouse_id = %req.warehouse_id, "seed assignment skipped");
        }
    }

    for input in demo_couriers() {
        if courier::create_courier(state, input).await.is_ok() {
            counts.couriers += 1;
        }
    }

    for _ in 0..ORDER_COUNT {
        let input = {
            let mut rng = rand::rng();
            let (Some(product_id), Some(warehouse_id)) = (product_ids.choose(&mut rng), warehouse_ids.choose(&mut rng))
            else {
                break;
            };
            OrderInput {
                product_id: product_id.clone(),
                quantity: rng.random_range(1..=50),
                warehouse_id: warehouse_id.clone(),
            }
        };
        let Ok(created) = order::create_order(state, input).await else {
            continue;
        };
        counts.orders += 1;
        let steps = rand::rng().random_range(0..4);
        for _ in 0..steps {
            if let Err(e) = order::advance_order(state, &created.id).await {
                warn!(error = %e, id = %created.id, "seed order advance failed");
                break;
            }
        }
    }

    info!(
        warehouses = counts.warehouses,
        products = counts.products,
        couriers = counts.couriers,
        orders = counts.orders,
        "seeded demo data"
    );
    counts
}

/// Spread each product's pool over up to three warehouses.
fn random_assignments(product_ids: &[String], warehouse_ids: &[String]) -> Vec<(String, u64, String)> {
    let mut rng = rand::rng();
    let mut out = Vec::new();
    if warehouse_ids.is_empty() {
        return out;
    }
    for product_id in product_ids {
        for warehouse_id in warehouse_ids.choose_multiple(&mut rng, 3) {
            out.push((product_id.clone(), rng.random_range(1..300), warehouse_id.clone()));
        }
    }
    out
}

fn demo_couriers() -> Vec<CourierInput> {
    let now = OffsetDateTime::now_utc();
    vec![
        CourierInput {
            name: "John Doe".into(),
            image: "https://images.unsplash.com/photo-1633332755192-727a05c4013d?w=400&h=400&fit=crop".into(),
            current_location: "Leicester, UK".into(),
            destination: "Manchester, UK".into(),
            stops: vec!["Derby, UK".into(), "Sheffield, UK".into()],
            route: Some(CourierRoute {
                current: [52.6369, -1.1398],
                destination: [53.4808, -2.2426],
                stops: vec![[52.9225, -1.4746], [53.3811, -1.4701]],
            }),
            eta: Some(now + Duration::minutes(120)),
            status: Some("active".into()),
            phone: "+44 7700 900123".into(),
            vehicle: "Van - LD21 XYZ".into(),
            deliveries: Some(5),
            total_distance: Some("127 miles".into()),
        },
        CourierInput {
            name: "Jane Smith".into(),
            image: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&h=400&fit=crop".into(),
            current_location: "London, UK".into(),
            destination: "Birmingham, UK".into(),
            stops: vec!["Watford, UK".into(), "Milton Keynes, UK".into()],
            route: Some(CourierRoute {
                current: [51.5074, -0.1278],
                destination: [52.4862, -1.8904],
                stops: vec![[51.6565, -0.3903], [52.0406, -0.7594]],
            }),
            eta: Some(now + Duration::minutes(180)),
            status: Some("active".into()),
            phone: "+44 7700 900456".into(),
            vehicle: "Van - LS21 ABC".into(),
            deliveries: Some(3),
            total_distance: Some("163 miles".into()),
        },
        CourierInput {
            name: "Michael Brown".into(),
            image: "https://images.unsplash.com/photo-1599566150163-29194dcaad36?w=400&h=400&fit=crop".into(),
            current_location: "Glasgow, UK".into(),
            destination: "Edinburgh, UK".into(),
            stops: vec!["Falkirk, UK".into()],
            route: Some(CourierRoute {
                current: [55.8642, -4.2518],
                destination: [55.9533, -3.1883],
                stops: vec![[56.0019, -3.7839]],
            }),
            eta: Some(now + Duration::minutes(60)),
            status: Some("inactive".into()),
            phone: "+44 7700 900789".into(),
            vehicle: "Van - GS21 XYZ".into(),
            deliveries: Some(0),
            total_distance: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::query::ListQuery;
    use crate::state::test_helpers;

    #[tokio::test]
    async fn seeding_fills_every_collection() {
        let state = test_helpers::test_app_state();
        let counts = seed_demo_data(&state).await;
        assert_eq!(counts.warehouses, WAREHOUSE_COUNT);
        assert_eq!(counts.products, PRODUCT_COUNT);
        assert_eq!(counts.couriers, 3);
        assert_eq!(counts.orders, ORDER_COUNT);

        let page = warehouse::list_warehouses(&state, &ListQuery::default()).await;
        assert_eq!(page.total, WAREHOUSE_COUNT);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn random_assignments_never_draw_zero() {
        let products: Vec<String> = (1..=20).map(|i| format!("P{i:05}")).collect();
        let warehouses: Vec<String> = (1..=5).map(|i| format!("W{i:05}")).collect();
        let rows = random_assignments(&products, &warehouses);
        assert_eq!(rows.len(), 60);
        assert!(rows.iter().all(|(_, quantity, _)| (1..300).contains(quantity)));
    }

    #[tokio::test]
    async fn seeded_stock_never_exceeds_initial_pools() {
        let state = test_helpers::test_app_state();
        seed_demo_data(&state).await;

        let store = state.store.read().await;
        for product in store.products.values() {
            let assigned: u64 = store.stock.get(&product.id).map_or(0, |l| l.values().sum());
            assert!(product.quantity + assigned >= 100);
            assert!(product.quantity + assigned < 1100);
        }
    }
}
