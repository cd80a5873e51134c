//! Inventory domain module.
//!
//! Per-source stock entries (source items) linked to catalog SKUs. Pure data
//! (no IO, no storage).

pub mod source_item;

pub use source_item::{SourceItem, SourceItemStatus, DEFAULT_SOURCE_CODE};
