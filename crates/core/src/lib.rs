//! `stockroom-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, the
//! store and the derived views (no IO, no async).

pub mod entity;
pub mod error;
pub mod id;
pub mod text;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ErrorCode, FieldError, FieldErrors};
pub use id::ProductId;
pub use value_object::{Price, ValueObject};
