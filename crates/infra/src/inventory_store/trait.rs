use std::sync::Arc;

use shopseed_auth::ExecutionContext;
use shopseed_core::{Sku, SourceCode};
use shopseed_inventory::SourceItem;

use crate::StoreError;

/// Source-item repository.
pub trait SourceItemRepository: Send + Sync {
    /// Save a batch of source items (insert or replace per source + SKU).
    ///
    /// The batch is all-or-nothing: if any item is rejected nothing is stored.
    fn save_source_items(
        &self,
        ctx: &ExecutionContext,
        items: &[SourceItem],
    ) -> Result<(), StoreError>;

    fn get(&self, source_code: &SourceCode, sku: &Sku) -> Result<Option<SourceItem>, StoreError>;

    fn list_by_sku(&self, sku: &Sku) -> Result<Vec<SourceItem>, StoreError>;
}

impl<S> SourceItemRepository for Arc<S>
where
    S: SourceItemRepository + ?Sized,
{
    fn save_source_items(
        &self,
        ctx: &ExecutionContext,
        items: &[SourceItem],
    ) -> Result<(), StoreError> {
        (**self).save_source_items(ctx, items)
    }

    fn get(&self, source_code: &SourceCode, sku: &Sku) -> Result<Option<SourceItem>, StoreError> {
        (**self).get(source_code, sku)
    }

    fn list_by_sku(&self, sku: &Sku) -> Result<Vec<SourceItem>, StoreError> {
        (**self).list_by_sku(sku)
    }
}
