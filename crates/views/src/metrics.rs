//! Dashboard summary metrics.

use serde::Serialize;

use stockroom_catalog::Product;

/// How many records the dashboard lists as "recent".
pub const RECENT_LIMIT: usize = 5;

/// Summary of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMetrics {
    pub total_products: usize,
    /// Σ price × quantity.
    pub total_value: f64,
    /// Records below the low-stock threshold.
    pub low_stock_count: usize,
    /// Value-weighted unit price: `total_value / Σ quantity`, 0 without stock.
    pub average_price: f64,
}

pub fn aggregate(products: &[Product]) -> InventoryMetrics {
    let mut metrics = InventoryMetrics {
        total_products: products.len(),
        ..InventoryMetrics::default()
    };
    let mut total_quantity: u64 = 0;

    for product in products {
        metrics.total_value += product.line_value();
        total_quantity = total_quantity.saturating_add(product.quantity());
        if product.is_low_stock() {
            metrics.low_stock_count += 1;
        }
    }

    if total_quantity > 0 {
        metrics.average_price = metrics.total_value / total_quantity as f64;
    }
    metrics
}

/// The first `limit` records in snapshot order.
pub fn recent(products: &[Product], limit: usize) -> &[Product] {
    &products[..products.len().min(limit)]
}
