//! Catalog domain module.
//!
//! Product records, category references and attribute sets as seen by setup
//! steps. Pure data and rules (no IO, no storage).

pub mod attribute_set;
pub mod category;
pub mod product;

pub use attribute_set::{AttributeSet, EntityType, DEFAULT_ATTRIBUTE_SET_NAME};
pub use category::CategoryReference;
pub use product::{ProductRecord, ProductStatus, ProductType, StockData, Visibility};
