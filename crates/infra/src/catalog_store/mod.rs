//! Catalog storage boundary: products, categories and attribute sets.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{
    DEFAULT_CATEGORY_ID, InMemoryAttributeSetStore, InMemoryCategoryStore, InMemoryProductStore,
    ROOT_CATEGORY_ID,
};
pub use r#trait::{AttributeSetRepository, CategoryRepository, InsertOutcome, ProductRepository};
