//! Domain error model.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every mutating store call either fully succeeds or fails with one of these;
/// a failed call never leaves a partially applied change behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// One or more candidate fields failed validation. Raised before the store
    /// is ever invoked.
    #[error("validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// Update/delete referenced an id that is not in the live collection.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The underlying effect did not complete; the store rolled back.
    #[error("operation failed: {0}")]
    OperationFailed(String),

    /// A value object was constructed from an out-of-range value.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl DomainError {
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }

    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::OperationFailed(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    /// Field-level errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCode {
    /// Field is empty (or whitespace only).
    Required,
    /// Field is present but not an acceptable value.
    Invalid,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "required",
            ErrorCode::Invalid => "invalid",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field failure: machine code plus the text key the i18n layer
/// resolves into a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: ErrorCode,
    pub message_key: String,
}

impl FieldError {
    pub fn new(field: &str, code: ErrorCode) -> Self {
        Self {
            code,
            message_key: format!("validation.{field}.{code}"),
        }
    }
}

/// Mapping from field name to its error. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, code: ErrorCode) {
        self.0.insert(field, FieldError::new(field, code));
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names with errors, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Drop the error for one field (forms clear it as the user edits).
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// `Ok(())` when empty, otherwise the errors wrapped as a domain error.
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed(self))
        }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, err) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {}", err.code)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_key_combines_field_and_code() {
        let err = FieldError::new("price", ErrorCode::Invalid);
        assert_eq!(err.message_key, "validation.price.invalid");
    }

    #[test]
    fn empty_field_errors_are_ok() {
        assert_eq!(FieldErrors::new().into_result(), Ok(()));
    }

    #[test]
    fn non_empty_field_errors_become_validation_failure() {
        let mut errors = FieldErrors::new();
        errors.insert("name", ErrorCode::Required);
        let err = errors.clone().into_result().unwrap_err();
        assert_eq!(err.field_errors(), Some(&errors));
        assert_eq!(err.to_string(), "validation failed: name: required");
    }

    #[test]
    fn clear_removes_single_field() {
        let mut errors = FieldErrors::new();
        errors.insert("name", ErrorCode::Required);
        errors.insert("price", ErrorCode::Invalid);
        errors.clear("name");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["price"]);
    }

    #[test]
    fn field_errors_serialize_as_object() {
        let mut errors = FieldErrors::new();
        errors.insert("quantity", ErrorCode::Invalid);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["quantity"]["code"], "invalid");
        assert_eq!(json["quantity"]["message_key"], "validation.quantity.invalid");
    }
}
