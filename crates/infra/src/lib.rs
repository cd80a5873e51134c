//! Infrastructure layer: storage ports for the catalog, inventory and patch
//! history, plus in-memory adapters for tests and the demo installer.

pub mod catalog_store;
pub mod error;
pub mod inventory_store;
pub mod patch_history;

pub use catalog_store::{
    AttributeSetRepository, CategoryRepository, DEFAULT_CATEGORY_ID, InMemoryAttributeSetStore,
    InMemoryCategoryStore, InMemoryProductStore, InsertOutcome, ProductRepository, ROOT_CATEGORY_ID,
};
pub use error::StoreError;
pub use inventory_store::{InMemorySourceItemStore, SourceItemRepository};
pub use patch_history::{AppliedPatch, InMemoryPatchHistory, PatchHistory};
