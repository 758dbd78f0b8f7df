//! Catalog domain module.
//!
//! Product records, their field rules and the seed collection, implemented as
//! deterministic domain logic (no IO, no async, no storage).

pub mod product;
pub mod seed;
pub mod validation;

pub use product::{
    Category, LOW_STOCK_THRESHOLD, NewProduct, Product, ProductPatch, StockStatus,
};
pub use seed::seed_products;
pub use validation::{ProductDraft, validate};
