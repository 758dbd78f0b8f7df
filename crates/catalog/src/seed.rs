//! Fixed seed collection loaded by the store on first initialization.

use chrono::NaiveDate;

use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::product::{NewProduct, Product};

struct SeedRow {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    price: f64,
    quantity: u64,
    description: &'static str,
    last_updated: (i32, u32, u32),
}

const SEED: [SeedRow; 5] = [
    SeedRow {
        id: "1",
        name: "Premium Coffee Beans",
        category: "Beverages",
        price: 24.99,
        quantity: 150,
        description: "High-quality arabica coffee beans from Colombia",
        last_updated: (2024, 6, 3),
    },
    SeedRow {
        id: "2",
        name: "Organic Quinoa",
        category: "Grains",
        price: 12.50,
        quantity: 75,
        description: "Certified organic quinoa from Bolivia",
        last_updated: (2024, 6, 2),
    },
    SeedRow {
        id: "3",
        name: "Extra Virgin Olive Oil",
        category: "Oils",
        price: 18.75,
        quantity: 200,
        description: "Cold-pressed olive oil from Mediterranean olives",
        last_updated: (2024, 6, 1),
    },
    SeedRow {
        id: "4",
        name: "Wild-Caught Salmon",
        category: "Seafood",
        price: 32.00,
        quantity: 45,
        description: "Fresh Atlantic salmon, sustainably sourced",
        last_updated: (2024, 6, 4),
    },
    SeedRow {
        id: "5",
        name: "Himalayan Pink Salt",
        category: "Seasonings",
        price: 8.99,
        quantity: 300,
        description: "Pure rock salt from the Himalayan mountains",
        last_updated: (2024, 6, 3),
    },
];

/// The seed records, in insertion order.
///
/// Built through the same constructors as user input, so a broken seed row
/// surfaces as an error instead of an invalid record.
pub fn seed_products() -> DomainResult<Vec<Product>> {
    SEED.iter()
        .map(|row| {
            let (y, m, d) = row.last_updated;
            let date = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
                DomainError::invalid_value(format!("seed date {y}-{m}-{d}"))
            })?;
            let fields = NewProduct::new(
                row.name,
                row.category,
                row.price,
                row.quantity,
                row.description,
            )?;
            Ok(Product::new(ProductId::from(row.id), fields, date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use stockroom_core::Entity;

    #[test]
    fn seed_has_five_unique_records_in_order() {
        let products = seed_products().unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn salmon_is_the_only_low_stock_seed() {
        let products = seed_products().unwrap();
        let low: Vec<_> = products
            .iter()
            .filter(|p| p.is_low_stock())
            .map(|p| p.name())
            .collect();
        assert_eq!(low, vec!["Wild-Caught Salmon"]);
    }
}
