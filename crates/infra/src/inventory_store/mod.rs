//! Inventory storage boundary: per-source stock entries.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemorySourceItemStore;
pub use r#trait::SourceItemRepository;
