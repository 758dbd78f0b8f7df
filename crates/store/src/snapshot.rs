//! Immutable, versioned views of the product collection.

use serde::Serialize;

use stockroom_catalog::Product;
use stockroom_core::{ProductId, entity::position_of};

/// The full collection at one point in time.
///
/// A snapshot is never modified after it is published; every committed change
/// produces a new one with `version + 1`. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    version: u64,
    products: Vec<Product>,
}

impl Snapshot {
    /// The empty, not-yet-loaded collection (version 0).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.position(id).map(|idx| &self.products[idx])
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub(crate) fn position(&self, id: &ProductId) -> Option<usize> {
        position_of(&self.products, id)
    }

    /// Successor snapshot with `products` as its contents.
    pub(crate) fn next(&self, products: Vec<Product>) -> Self {
        Self {
            version: self.version + 1,
            products,
        }
    }

    pub(crate) fn with_appended(&self, product: Product) -> Self {
        let mut products = self.products.clone();
        products.push(product);
        self.next(products)
    }

    pub(crate) fn with_replaced(&self, idx: usize, product: Product) -> Self {
        let mut products = self.products.clone();
        products[idx] = product;
        self.next(products)
    }

    pub(crate) fn without(&self, idx: usize) -> Self {
        let mut products = self.products.clone();
        products.remove(idx);
        self.next(products)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl AsRef<[Product]> for Snapshot {
    fn as_ref(&self) -> &[Product] {
        &self.products
    }
}
