//! `shopseed-core` — shared domain primitives.
//!
//! Identifiers, value objects and the domain error model used by the catalog,
//! inventory and setup crates. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AttributeSetId, CategoryId, PatchName, ProductEntityId, Sku, SourceCode};
pub use value_object::{Price, ValueObject};
