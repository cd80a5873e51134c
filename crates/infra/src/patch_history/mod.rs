//! Record of data patches that have already been applied.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryPatchHistory;
pub use r#trait::{AppliedPatch, PatchHistory};
