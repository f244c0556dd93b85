//! Service configuration parsed from environment variables.
//!
//! Every knob has a default, and malformed values fall back to it rather
//! than aborting startup.

use crate::services::allocator::DEFAULT_CAPACITY_KG;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 100;
pub const DEFAULT_RESTOCK_THRESHOLD: u64 = 10;
pub const DEFAULT_RESTOCK_TARGET: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Capacity used for loading plans when a request does not name one.
    pub load_capacity_kg: f64,
    pub page_size: usize,
    /// Products whose total stock is below this are reported as low stock.
    pub low_stock_threshold: u64,
    /// Products whose total stock is below this get a restock recommendation.
    pub restock_threshold: u64,
    /// Recommended restock brings a product's total up to this level.
    pub restock_target: u64,
    pub seed_demo_data: bool,
    /// When set, `/api/*` requires the `auth_token` cookie.
    pub auth_required: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            load_capacity_kg: DEFAULT_CAPACITY_KG,
            page_size: DEFAULT_PAGE_SIZE,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            restock_threshold: DEFAULT_RESTOCK_THRESHOLD,
            restock_target: DEFAULT_RESTOCK_TARGET,
            seed_demo_data: false,
            auth_required: true,
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// - `PORT`: default 3000
    /// - `LOAD_CAPACITY_KG`: default 1000
    /// - `PAGE_SIZE`: default 10
    /// - `LOW_STOCK_THRESHOLD`: default 100
    /// - `RESTOCK_THRESHOLD`: default 10
    /// - `RESTOCK_TARGET`: default 30
    /// - `SEED_DEMO_DATA`: default off
    /// - `AUTH_REQUIRED`: default on
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let page_size = parse_or(&lookup, "PAGE_SIZE", defaults.page_size);

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            load_capacity_kg: parse_or(&lookup, "LOAD_CAPACITY_KG", defaults.load_capacity_kg),
            page_size: if page_size == 0 { defaults.page_size } else { page_size },
            low_stock_threshold: parse_or(&lookup, "LOW_STOCK_THRESHOLD", defaults.low_stock_threshold),
            restock_threshold: parse_or(&lookup, "RESTOCK_THRESHOLD", defaults.restock_threshold),
            restock_target: parse_or(&lookup, "RESTOCK_TARGET", defaults.restock_target),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(defaults.seed_demo_data),
            auth_required: lookup("AUTH_REQUIRED")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(defaults.auth_required),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
