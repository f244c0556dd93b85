use super::*;
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::state::test_helpers;

async fn spawn_app(config: AppConfig) -> (String, AppState) {
    let state = test_helpers::test_app_state_with(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

async fn spawn_open() -> (String, AppState) {
    spawn_app(AppConfig { auth_required: false, ..AppConfig::default() }).await
}

// =============================================================================
// AUTH
// =============================================================================

#[tokio::test]
async fn api_requires_cookie_when_auth_is_on() {
    let (base, _state) = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let health = client.get(format!("{base}/healthz")).send().await.unwrap();
    assert_eq!(health.status(), 200);

    let denied = client.get(format!("{base}/api/warehouses")).send().await.unwrap();
    assert_eq!(denied.status(), 401);
    let body: Value = denied.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");

    let allowed = client
        .get(format!("{base}/api/warehouses"))
        .header("Cookie", "auth_token=demo")
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}

#[tokio::test]
async fn login_validates_and_sets_cookie() {
    let (base, _state) = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let bad = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": "admin@example.com", "password": "short" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);

    let ok = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": "admin@example.com", "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
    let set_cookie = ok.headers().get("set-cookie").unwrap().to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));

    let out = client.post(format!("{base}/auth/logout")).send().await.unwrap();
    assert_eq!(out.status(), 204);
}

#[tokio::test]
async fn signup_reports_field_errors_and_sets_no_cookie() {
    let (base, _state) = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();
    let form = json!({
        "name": "Jane Smith",
        "email": "jane@example.com",
        "phone": "+447700900123",
        "password": "password123",
        "confirmPassword": "password124",
    });

    let mismatch = client.post(format!("{base}/auth/signup")).json(&form).send().await.unwrap();
    assert_eq!(mismatch.status(), 400);
    let body: Value = mismatch.json().await.unwrap();
    assert_eq!(body["field"], "confirm_password");
    assert_eq!(body["error"], "Passwords do not match");

    let mut bad_phone = form.clone();
    bad_phone["phone"] = json!("555-0100");
    let res = client.post(format!("{base}/auth/signup")).json(&bad_phone).send().await.unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["field"], "phone");

    let mut ok_form = form;
    ok_form["confirmPassword"] = json!("password123");
    let ok = client.post(format!("{base}/auth/signup")).json(&ok_form).send().await.unwrap();
    assert_eq!(ok.status(), 201);
    assert!(ok.headers().get("set-cookie").is_none());
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

// =============================================================================
// CATALOG + LEDGER
// =============================================================================

#[tokio::test]
async fn warehouse_create_list_and_validation() {
    let (base, _state) = spawn_open().await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{base}/api/warehouses"))
        .json(&json!({
            "name": "London Central",
            "location": "London",
            "capacity": 20000,
            "utilization": 35,
            "manager": "Alex Manager",
            "contact": "+44 7700 900000"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let row: Value = created.json().await.unwrap();
    assert_eq!(row["id"], "W00001");

    let invalid = client
        .post(format!("{base}/api/warehouses"))
        .json(&json!({ "name": "L", "location": "London", "manager": "Alex", "contact": "+44 7700 900000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), 422);
    let err: Value = invalid.json().await.unwrap();
    assert_eq!(err["code"], "E_VALIDATION");

    let page: Value = client.get(format!("{base}/api/warehouses?search=lond")).send().await.unwrap().json().await.unwrap();
    assert_eq!(page["total"], 1);

    let missing = client.get(format!("{base}/api/warehouses/W00404")).send().await.unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn ledger_conflict_and_csv_export() {
    let (base, state) = spawn_open().await;
    let warehouse_id = test_helpers::seed_warehouse(&state, "Leeds North").await;
    let product_id = test_helpers::seed_product(&state, "Kettle", 5, 2.0).await;
    let client = reqwest::Client::new();

    let conflict = client
        .post(format!("{base}/api/inventory/assign"))
        .json(&json!({ "product_id": product_id, "warehouse_id": warehouse_id, "quantity": 6 }))
        .send()
        .await
        .unwrap();
    assert_eq!(conflict.status(), 409);

    let assigned: Value = client
        .post(format!("{base}/api/inventory/assign"))
        .json(&json!({ "product_id": product_id, "warehouse_id": warehouse_id, "quantity": 5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(assigned["warehouse_quantity"], 5);
    assert_eq!(assigned["unassigned_quantity"], 0);

    let csv = client.get(format!("{base}/api/inventory/export.csv")).send().await.unwrap();
    assert_eq!(csv.status(), 200);
    assert!(csv.headers()["content-type"].to_str().unwrap().starts_with("text/csv"));
    let text = csv.text().await.unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("sku,name,category,total_stock,status"));
    assert_eq!(lines.next(), Some("P00001,Kettle,Electronics,5,Low Stock"));
}

#[tokio::test]
async fn orders_advance_through_the_api() {
    let (base, state) = spawn_open().await;
    let warehouse_id = test_helpers::seed_warehouse(&state, "Leeds North").await;
    let product_id = test_helpers::seed_product(&state, "Kettle", 5, 2.0).await;
    let client = reqwest::Client::new();

    let order: Value = client
        .post(format!("{base}/api/orders"))
        .json(&json!({ "product_id": product_id, "warehouse_id": warehouse_id, "quantity": 2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = order["id"].as_str().unwrap().to_string();

    let advanced: Value = client
        .post(format!("{base}/api/orders/{id}/advance"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(advanced["status"], "Processing");

    let bad_filter = client.get(format!("{base}/api/orders?status=lost")).send().await.unwrap();
    assert_eq!(bad_filter.status(), 400);
}

// =============================================================================
// PLANS + MISC
// =============================================================================

#[tokio::test]
async fn allocate_endpoint_runs_the_greedy_plan() {
    let (base, _state) = spawn_open().await;
    let client = reqwest::Client::new();

    let plan: Value = client
        .post(format!("{base}/api/plans/allocate"))
        .json(&json!({
            "capacity": 1000,
            "items": [
                { "id": "a", "name": "A", "weight": 600 },
                { "id": "b", "name": "B", "weight": 500 },
                { "id": "c", "name": "C", "weight": 200 }
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids = |key: &str| -> Vec<String> {
        plan[key].as_array().unwrap().iter().map(|i| i["id"].as_str().unwrap().to_string()).collect()
    };
    assert_eq!(ids("loaded"), vec!["a", "c"]);
    assert_eq!(ids("unloaded"), vec!["b"]);
    assert_eq!(plan["summary"]["loaded_count"], 2);
}

#[tokio::test]
async fn loading_plan_for_unknown_warehouse_is_404() {
    let (base, _state) = spawn_open().await;
    let resp = reqwest::get(format!("{base}/api/plans/loading.csv?warehouse_id=W00404")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn bins_and_labels() {
    let (base, _state) = spawn_open().await;
    let client = reqwest::Client::new();

    let missing = client.post(format!("{base}/api/bins")).json(&json!({ "name": "A1" })).send().await.unwrap();
    assert_eq!(missing.status(), 400);
    let created = client
        .post(format!("{base}/api/bins"))
        .json(&json!({ "name": "A1", "location": "Aisle 1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);

    let label: Value = client
        .post(format!("{base}/api/labels"))
        .json(&json!({ "tracking_number": "abc12345" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(label["tracking_number"], "ABC12345");
    assert_eq!(label["qr_payload"], "ABC12345");
}
