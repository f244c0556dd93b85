//! CSV reports for loading plans and inventory.

use crate::services::allocator::Weighted;
use crate::services::inventory::{InventoryItem, StockStatus};
use crate::services::loading::{LoadItem, PlanReport};

/// Quote a field when it contains a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Loaded rows first, then unloaded rows.
#[must_use]
pub fn plan_csv(report: &PlanReport<LoadItem>) -> String {
    let mut out = String::new();
    push_row(&mut out, &["id", "name", "weight", "plan"]);

    let rows = report
        .loaded
        .iter()
        .map(|i| (i, "loaded"))
        .chain(report.unloaded.iter().map(|i| (i, "unloaded")));
    for (item, plan) in rows {
        push_row(&mut out, &[&item.id, &item.name, &item.weight().to_string(), plan]);
    }
    out
}

#[must_use]
pub fn inventory_csv(items: &[InventoryItem]) -> String {
    let mut out = String::new();
    push_row(&mut out, &["sku", "name", "category", "total_stock", "status"]);

    for item in items {
        let status = match item.status {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
        };
        push_row(&mut out, &[&item.sku, &item.name, &item.category, &item.total_stock.to_string(), status]);
    }
    out
}
