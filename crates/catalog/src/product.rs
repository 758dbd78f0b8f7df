use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{
    DomainError, DomainResult, Entity, FieldErrors, Price, ProductId, ValueObject, text,
};

use crate::validation::{
    FIELD_DESCRIPTION, FIELD_NAME, check_category, check_price, check_required,
};

/// Records with fewer units than this are low on stock.
pub const LOW_STOCK_THRESHOLD: u64 = 50;

/// Category label.
///
/// Categories form an open set: any non-blank label other than
/// [`Category::ALL_SENTINEL`] is accepted, and the set of categories in use is
/// derived from the data. [`Category::SUGGESTED`] is what entry forms offer by
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl ValueObject for Category {}

impl Category {
    pub const SUGGESTED: [&'static str; 9] = [
        "Beverages",
        "Grains",
        "Oils",
        "Seafood",
        "Seasonings",
        "Dairy",
        "Meat",
        "Vegetables",
        "Fruits",
    ];

    /// Selector value meaning "every category"; never a label of its own.
    pub const ALL_SENTINEL: &'static str = "all";

    /// Build a category from an untrimmed label. Blank labels and the
    /// selector sentinel are rejected.
    pub fn new(label: impl Into<String>) -> DomainResult<Self> {
        let label = label.into();
        let mut errors = FieldErrors::new();
        check_category(&mut errors, &label);
        errors.into_result()?;
        Ok(Self(label.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text key for this label (`categories.<label>`).
    pub fn text_key(&self) -> String {
        text::category_key(&self.0)
    }
}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Category::new(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stock badge shown next to each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Low,
    InStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: u64) -> Self {
        if quantity < LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    pub fn text_key(&self) -> &'static str {
        match self {
            StockStatus::Low => text::LOW_STOCK,
            StockStatus::InStock => text::IN_STOCK,
        }
    }
}

/// A commodity record in the live collection.
///
/// Records are created and modified only by the store; `id` and `last_updated`
/// are never supplied by callers. Deserializing applies the same field rules
/// as construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    price: Price,
    quantity: u64,
    description: String,
    last_updated: NaiveDate,
}

impl Product {
    /// Materialize a record from validated fields.
    pub fn new(id: ProductId, fields: NewProduct, last_updated: NaiveDate) -> Self {
        let NewProduct {
            name,
            category,
            price,
            quantity,
            description,
        } = fields;
        Self {
            id,
            name,
            category,
            price,
            quantity,
            description,
            last_updated,
        }
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn last_updated(&self) -> NaiveDate {
        self.last_updated
    }

    /// Value held in stock: price × quantity.
    pub fn line_value(&self) -> f64 {
        self.price.amount() * self.quantity as f64
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_status() == StockStatus::Low
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.quantity)
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Merge `patch` onto this record and stamp `today`.
    ///
    /// `id` never changes; fields absent from the patch keep their value.
    pub fn apply(&mut self, patch: &ProductPatch, today: NaiveDate) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        self.last_updated = today;
    }
}

/// Wire shape of a [`Product`] before the text rules are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: ProductId,
    name: String,
    category: Category,
    price: Price,
    quantity: u64,
    description: String,
    last_updated: NaiveDate,
}

impl ProductRecord {
    fn into_product(self) -> DomainResult<Product> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, FIELD_NAME, &self.name);
        check_required(&mut errors, FIELD_DESCRIPTION, &self.description);
        errors.into_result()?;

        Ok(Product {
            id: self.id,
            name: self.name.trim().to_string(),
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            description: self.description.trim().to_string(),
            last_updated: self.last_updated,
        })
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ProductRecord::deserialize(deserializer)?
            .into_product()
            .map_err(serde::de::Error::custom)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated field set for a record that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    category: Category,
    price: Price,
    quantity: u64,
    description: String,
}

impl NewProduct {
    /// Build from typed values, applying the same field rules as
    /// [`crate::validate`]. Text fields are trimmed.
    pub fn new(
        name: &str,
        category: &str,
        price: f64,
        quantity: u64,
        description: &str,
    ) -> DomainResult<Self> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, FIELD_NAME, name);
        check_category(&mut errors, category);
        check_price(&mut errors, price);
        check_required(&mut errors, FIELD_DESCRIPTION, description);
        errors.into_result()?;

        Ok(Self {
            name: name.trim().to_string(),
            category: Category(category.trim().to_string()),
            price: Price::new(price)?,
            quantity,
            description: description.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Partial update. Unset fields are left untouched by [`Product::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    name: Option<String>,
    category: Option<Category>,
    price: Option<Price>,
    quantity: Option<u64>,
    description: Option<String>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into().trim().to_string());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into().trim().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Rules for the fields present in the patch.
    ///
    /// Typed fields (`category`, `price`, `quantity`) are valid by
    /// construction, including when deserialized; only free text can still
    /// be blank.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_required(&mut errors, FIELD_NAME, name);
        }
        if let Some(description) = &self.description {
            check_required(&mut errors, FIELD_DESCRIPTION, description);
        }
        errors
    }
}

impl From<NewProduct> for ProductPatch {
    fn from(fields: NewProduct) -> Self {
        Self {
            name: Some(fields.name),
            category: Some(fields.category),
            price: Some(fields.price),
            quantity: Some(fields.quantity),
            description: Some(fields.description),
        }
    }
}
