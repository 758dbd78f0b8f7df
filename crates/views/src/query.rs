//! Search, category filter and group-by-category.

use std::collections::HashMap;

use stockroom_catalog::{Category, Product};
use stockroom_core::text;

/// Category selector of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// The `"all"` sentinel.
    #[default]
    All,
    /// Exact label match.
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = Category::ALL_SENTINEL;

    /// `"all"` selects everything; any other value is an exact label. Records
    /// can never carry the `"all"` label, so the two cannot collide.
    pub fn parse(raw: &str) -> Self {
        if raw == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }

    /// Value as carried by the selector widget.
    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL,
            CategoryFilter::Only(label) => label,
        }
    }

    pub fn text_key(&self) -> String {
        match self {
            CategoryFilter::All => text::ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(label) => text::category_key(label),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => product.category().as_str() == label,
        }
    }
}

/// Matching records of one category, in snapshot order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    category: &'a Category,
    products: Vec<&'a Product>,
}

impl<'a> CategoryGroup<'a> {
    pub fn category(&self) -> &'a Category {
        self.category
    }

    pub fn products(&self) -> &[&'a Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Result of [`query`]: non-empty groups in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedView<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

impl<'a> GroupedView<'a> {
    pub fn groups(&self) -> &[CategoryGroup<'a>] {
        &self.groups
    }

    pub fn group(&self, category: &str) -> Option<&CategoryGroup<'a>> {
        self.groups.iter().find(|g| g.category.as_str() == category)
    }

    pub fn total_matches(&self) -> usize {
        self.groups.iter().map(CategoryGroup::len).sum()
    }

    /// Nothing matched ("no products found").
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All matches flattened, grouped order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.groups.iter().flat_map(|g| g.products.iter().copied())
    }
}

/// Filter `products` by search term and category, then group by category.
///
/// The search term matches case-insensitively as a substring of the name or
/// the description; an empty term matches every record. Both predicates must
/// hold.
pub fn query<'a>(
    products: &'a [Product],
    search_term: &str,
    category_filter: &CategoryFilter,
) -> GroupedView<'a> {
    let needle = search_term.to_lowercase();
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    let mut index: HashMap<&'a Category, usize> = HashMap::new();

    for product in products {
        if !category_filter.matches(product) || !product.matches_lowercase(&needle) {
            continue;
        }
        let slot = *index.entry(product.category()).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: product.category(),
                products: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].products.push(product);
    }

    GroupedView { groups }
}

/// Options for the category selector: `All` first, then every category present
/// in `products` in first-seen order, without duplicates.
pub fn category_options(products: &[Product]) -> Vec<CategoryFilter> {
    let mut options = vec![CategoryFilter::All];
    for product in products {
        let label = product.category().as_str();
        let seen = options.iter().any(|o| o.value() == label);
        if !seen {
            options.push(CategoryFilter::Only(label.to_string()));
        }
    }
    options
}
