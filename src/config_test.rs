use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = AppConfig::from_lookup(|_| None);
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.port, 3000);
    assert!((cfg.load_capacity_kg - 1000.0).abs() < f64::EPSILON);
    assert_eq!(cfg.page_size, 10);
    assert!(cfg.auth_required);
    assert!(!cfg.seed_demo_data);
}

#[test]
fn values_override_defaults() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        ("PORT", "8080"),
        ("LOAD_CAPACITY_KG", "2500.5"),
        ("PAGE_SIZE", "25"),
        ("LOW_STOCK_THRESHOLD", "50"),
        ("RESTOCK_THRESHOLD", "5"),
        ("RESTOCK_TARGET", "40"),
        ("SEED_DEMO_DATA", "yes"),
        ("AUTH_REQUIRED", "off"),
    ]));
    assert_eq!(cfg.port, 8080);
    assert!((cfg.load_capacity_kg - 2500.5).abs() < f64::EPSILON);
    assert_eq!(cfg.page_size, 25);
    assert_eq!(cfg.low_stock_threshold, 50);
    assert_eq!(cfg.restock_threshold, 5);
    assert_eq!(cfg.restock_target, 40);
    assert!(cfg.seed_demo_data);
    assert!(!cfg.auth_required);
}

#[test]
fn malformed_values_fall_back() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        ("PORT", "not-a-port"),
        ("PAGE_SIZE", "-3"),
        ("AUTH_REQUIRED", "maybe"),
    ]));
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
    assert!(cfg.auth_required);
}

#[test]
fn zero_page_size_uses_default() {
    let cfg = AppConfig::from_lookup(lookup_from(&[("PAGE_SIZE", "0")]));
    assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert_eq!(parse_bool("TRUE"), Some(true));
    assert_eq!(parse_bool(" 1 "), Some(true));
    assert_eq!(parse_bool("no"), Some(false));
    assert_eq!(parse_bool(""), None);
}
