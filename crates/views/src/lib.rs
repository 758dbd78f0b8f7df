//! Derived views over a product snapshot.
//!
//! Everything here is a pure function of a slice of products: callers recompute
//! on every new snapshot.

pub mod metrics;
pub mod query;

pub use metrics::{InventoryMetrics, RECENT_LIMIT, aggregate, recent};
pub use query::{CategoryFilter, CategoryGroup, GroupedView, category_options, query};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use stockroom_catalog::{NewProduct, Product};
    use stockroom_core::ProductId;

    pub fn product(id: &str, name: &str, category: &str, price: f64, quantity: u64) -> Product {
        let fields =
            NewProduct::new(name, category, price, quantity, &format!("About {name}")).unwrap();
        Product::new(
            ProductId::from(id),
            fields,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }
}
