//! Text keys handed to the i18n collaborator.
//!
//! The domain never renders user-facing strings. It emits dotted keys and the
//! presentation layer resolves them through a [`TextLookup`].

/// Resolves a dotted key into localized display text.
pub trait TextLookup {
    fn text(&self, key: &str) -> Option<String>;

    /// Resolve `key`, falling back to the key itself when it is unknown.
    fn text_or_key(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|| key.to_string())
    }
}

pub const PRODUCT_ADDED: &str = "products.productAdded";
pub const PRODUCT_ADDED_DESC: &str = "products.productAddedDesc";
pub const PRODUCT_UPDATED: &str = "products.productUpdated";
pub const PRODUCT_UPDATED_DESC: &str = "products.productUpdatedDesc";
pub const PRODUCT_DELETED: &str = "products.productDeleted";
pub const PRODUCT_DELETED_DESC: &str = "products.productDeletedDesc";
pub const ERROR: &str = "products.error";
pub const FAILED_TO_SAVE: &str = "products.failedToSave";
pub const FAILED_TO_DELETE: &str = "products.failedToDelete";
pub const FAILED_TO_LOAD: &str = "products.failedToLoad";

pub const LOW_STOCK: &str = "products.lowStock";
pub const IN_STOCK: &str = "products.inStock";

pub const ALL_CATEGORIES: &str = "products.allCategories";

/// Key for a category label (`categories.<label>`).
pub fn category_key(label: &str) -> String {
    format!("categories.{label}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLookup(HashMap<&'static str, &'static str>);

    impl TextLookup for MapLookup {
        fn text(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|s| s.to_string())
        }
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key() {
        let lookup = MapLookup(HashMap::from([(LOW_STOCK, "Low Stock")]));
        assert_eq!(lookup.text_or_key(LOW_STOCK), "Low Stock");
        assert_eq!(lookup.text_or_key(IN_STOCK), IN_STOCK);
    }

    #[test]
    fn category_keys_are_namespaced() {
        assert_eq!(category_key("Seafood"), "categories.Seafood");
    }
}
