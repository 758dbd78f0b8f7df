//! Field validation for product candidates.
//!
//! `validate` is a pure function over raw form input. The typed constructors in
//! [`crate::product`] call the same rule helpers, so a record built through
//! either path obeys the same constraints.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ErrorCode, FieldErrors, Price};

use crate::product::{Category, NewProduct, Product, ProductPatch};

pub const FIELD_NAME: &str = "name";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_DESCRIPTION: &str = "description";

/// Raw, unvalidated field values as typed into an entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
}

/// Check a candidate against the field rules.
///
/// Returns one entry per failing field; an empty map means the draft is valid.
pub fn validate(candidate: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, FIELD_NAME, &candidate.name);
    check_category(&mut errors, &candidate.category);
    if parse_price(&candidate.price).is_none() {
        errors.insert(FIELD_PRICE, ErrorCode::Invalid);
    }
    if parse_quantity(&candidate.quantity).is_none() {
        errors.insert(FIELD_QUANTITY, ErrorCode::Invalid);
    }
    check_required(&mut errors, FIELD_DESCRIPTION, &candidate.description);
    errors
}

impl ProductDraft {
    /// Pre-fill a draft from an existing record (edit form).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            category: product.category().as_str().to_string(),
            price: product.price().amount().to_string(),
            quantity: product.quantity().to_string(),
            description: product.description().to_string(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        validate(self)
    }

    /// Validate and convert into a typed, trimmed `NewProduct`.
    pub fn parse(&self) -> DomainResult<NewProduct> {
        validate(self).into_result()?;

        // Validation passed, so every parse below succeeds.
        let price = parse_price(&self.price)
            .ok_or_else(|| DomainError::invalid_value("price"))?;
        let quantity = parse_quantity(&self.quantity)
            .ok_or_else(|| DomainError::invalid_value("quantity"))?;

        NewProduct::new(
            self.name.trim(),
            self.category.trim(),
            price.amount(),
            quantity,
            self.description.trim(),
        )
    }

    /// Validate and convert into a patch that overwrites every editable field.
    pub fn into_patch(&self) -> DomainResult<ProductPatch> {
        let fields = self.parse()?;
        Ok(ProductPatch::from(fields))
    }
}

pub(crate) fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, ErrorCode::Required);
    }
}

pub(crate) fn check_price(errors: &mut FieldErrors, amount: f64) {
    if Price::new(amount).is_err() {
        errors.insert(FIELD_PRICE, ErrorCode::Invalid);
    }
}

/// Non-blank, and not the "every category" selector value.
pub(crate) fn check_category(errors: &mut FieldErrors, label: &str) {
    check_required(errors, FIELD_CATEGORY, label);
    if label.trim() == Category::ALL_SENTINEL {
        errors.insert(FIELD_CATEGORY, ErrorCode::Invalid);
    }
}

fn parse_price(raw: &str) -> Option<Price> {
    let amount: f64 = raw.trim().parse().ok()?;
    Price::new(amount).ok()
}

fn parse_quantity(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
