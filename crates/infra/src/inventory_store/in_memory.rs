use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use shopseed_auth::{ExecutionContext, Permission};
use shopseed_core::{Sku, SourceCode};
use shopseed_inventory::SourceItem;

use super::r#trait::SourceItemRepository;
use crate::{ProductRepository, StoreError};

/// In-memory source-item repository.
///
/// When linked to a product repository, items for SKUs the catalog does not
/// know are rejected.
#[derive(Default)]
pub struct InMemorySourceItemStore {
    items: RwLock<BTreeMap<(SourceCode, Sku), SourceItem>>,
    catalog: Option<Arc<dyn ProductRepository>>,
    writes: AtomicUsize,
}

impl InMemorySourceItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that checks every SKU against `catalog` before saving.
    pub fn linked_to(catalog: Arc<dyn ProductRepository>) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::default()
        }
    }

    /// Number of successful batch saves.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn list(&self) -> Result<Vec<SourceItem>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::poisoned())?;
        Ok(items.values().cloned().collect())
    }

    fn check_linked(&self, items: &[SourceItem]) -> Result<(), StoreError> {
        let Some(catalog) = &self.catalog else {
            return Ok(());
        };
        for item in items {
            if catalog.find_by_sku(&item.sku)?.is_none() {
                return Err(StoreError::InvalidRecord(format!(
                    "source item references unknown sku '{}'",
                    item.sku
                )));
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for InMemorySourceItemStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemorySourceItemStore")
            .field("items", &self.items)
            .field("linked", &self.catalog.is_some())
            .field("writes", &self.writes)
            .finish()
    }
}

impl SourceItemRepository for InMemorySourceItemStore {
    fn save_source_items(
        &self,
        ctx: &ExecutionContext,
        items: &[SourceItem],
    ) -> Result<(), StoreError> {
        ctx.authorize(&Permission::INVENTORY_SOURCE_ITEM_WRITE)?;
        if items.is_empty() {
            return Ok(());
        }
        self.check_linked(items)?;

        let mut map = self.items.write().map_err(|_| StoreError::poisoned())?;
        for item in items {
            map.insert(item.key(), item.clone());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(count = items.len(), "source items saved");
        Ok(())
    }

    fn get(&self, source_code: &SourceCode, sku: &Sku) -> Result<Option<SourceItem>, StoreError> {
        let map = self.items.read().map_err(|_| StoreError::poisoned())?;
        Ok(map.get(&(source_code.clone(), sku.clone())).cloned())
    }

    fn list_by_sku(&self, sku: &Sku) -> Result<Vec<SourceItem>, StoreError> {
        let map = self.items.read().map_err(|_| StoreError::poisoned())?;
        Ok(map.values().filter(|i| &i.sku == sku).cloned().collect())
    }
}
