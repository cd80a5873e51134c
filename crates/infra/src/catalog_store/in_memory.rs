use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use shopseed_auth::{ExecutionContext, Permission};
use shopseed_catalog::{
    AttributeSet, CategoryReference, EntityType, ProductRecord, DEFAULT_ATTRIBUTE_SET_NAME,
};
use shopseed_core::{AttributeSetId, CategoryId, Entity, ProductEntityId, Sku};

use super::r#trait::{AttributeSetRepository, CategoryRepository, InsertOutcome, ProductRepository};
use crate::StoreError;

/// Root of the category tree in a fresh install.
pub const ROOT_CATEGORY_ID: CategoryId = CategoryId::new(1);
/// "Default Category" in a fresh install.
pub const DEFAULT_CATEGORY_ID: CategoryId = CategoryId::new(2);

#[derive(Debug, Default)]
struct ProductTable {
    by_sku: BTreeMap<Sku, ProductRecord>,
    last_entity_id: u64,
}

impl ProductTable {
    fn insert_new(&mut self, mut record: ProductRecord) -> ProductRecord {
        let now = Utc::now();
        self.last_entity_id += 1;
        record.entity_id = Some(ProductEntityId::new(self.last_entity_id));
        record.created_at = Some(now);
        record.updated_at = Some(now);
        self.by_sku.insert(record.key(), record.clone());
        record
    }
}

/// In-memory product repository.
///
/// SKUs are unique; entity ids are assigned sequentially from 1. Counts
/// successful writes so tests can assert that a run wrote nothing.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    table: RwLock<ProductTable>,
    writes: AtomicUsize,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records` (not counted as writes).
    pub fn with_products(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let mut table = ProductTable::default();
        for record in records {
            table.insert_new(record);
        }
        Self {
            table: RwLock::new(table),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful writes (insert, update, delete).
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::poisoned())?;
        Ok(table.by_sku.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub fn list(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::poisoned())?;
        Ok(table.by_sku.values().cloned().collect())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl ProductRepository for InMemoryProductStore {
    fn find_by_sku(&self, sku: &Sku) -> Result<Option<ProductRecord>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::poisoned())?;
        Ok(table.by_sku.get(sku).cloned())
    }

    fn save(
        &self,
        ctx: &ExecutionContext,
        mut record: ProductRecord,
    ) -> Result<ProductRecord, StoreError> {
        ctx.authorize(&Permission::CATALOG_PRODUCT_WRITE)?;
        let mut table = self.table.write().map_err(|_| StoreError::poisoned())?;

        let existing = table
            .by_sku
            .get(&record.sku)
            .map(|e| (e.entity_id, e.created_at));
        let saved = match existing {
            Some((entity_id, created_at)) => {
                record.entity_id = entity_id;
                record.created_at = created_at;
                record.updated_at = Some(Utc::now());
                table.by_sku.insert(record.key(), record.clone());
                record
            }
            None => table.insert_new(record),
        };
        self.record_write();
        tracing::debug!(sku = %saved.sku, entity_id = ?saved.entity_id, "product saved");
        Ok(saved)
    }

    fn insert_if_absent(
        &self,
        ctx: &ExecutionContext,
        record: ProductRecord,
    ) -> Result<InsertOutcome, StoreError> {
        ctx.authorize(&Permission::CATALOG_PRODUCT_WRITE)?;
        let mut table = self.table.write().map_err(|_| StoreError::poisoned())?;

        if let Some(existing) = table.by_sku.get(&record.sku) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        let saved = table.insert_new(record);
        self.record_write();
        Ok(InsertOutcome::Inserted(saved))
    }

    fn delete_by_sku(&self, ctx: &ExecutionContext, sku: &Sku) -> Result<bool, StoreError> {
        ctx.authorize(&Permission::CATALOG_PRODUCT_WRITE)?;
        let mut table = self.table.write().map_err(|_| StoreError::poisoned())?;
        let removed = table.by_sku.remove(sku).is_some();
        if removed {
            self.record_write();
        }
        Ok(removed)
    }
}

/// In-memory category lookup.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    categories: RwLock<HashMap<CategoryId, CategoryReference>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two categories every fresh install has.
    pub fn with_defaults() -> Self {
        let categories = [
            CategoryReference::new(ROOT_CATEGORY_ID, "Root Catalog", None),
            CategoryReference::new(DEFAULT_CATEGORY_ID, "Default Category", Some(ROOT_CATEGORY_ID)),
        ];
        Self {
            categories: RwLock::new(categories.into_iter().map(|c| (c.key(), c)).collect()),
        }
    }

    pub fn insert(&self, category: CategoryReference) -> Result<(), StoreError> {
        let mut map = self.categories.write().map_err(|_| StoreError::poisoned())?;
        map.insert(category.key(), category);
        Ok(())
    }
}

impl CategoryRepository for InMemoryCategoryStore {
    fn load_by_id(&self, id: CategoryId) -> Result<CategoryReference, StoreError> {
        let map = self.categories.read().map_err(|_| StoreError::poisoned())?;
        map.get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("category {id}")))
    }
}

/// In-memory attribute-set registry.
#[derive(Debug, Default)]
pub struct InMemoryAttributeSetStore {
    sets: RwLock<Vec<AttributeSet>>,
}

impl InMemoryAttributeSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Default` sets for categories (3) and products (4).
    pub fn with_defaults() -> Self {
        Self {
            sets: RwLock::new(vec![
                AttributeSet::new(
                    AttributeSetId::new(3),
                    EntityType::CatalogCategory,
                    DEFAULT_ATTRIBUTE_SET_NAME,
                ),
                AttributeSet::new(
                    AttributeSetId::new(4),
                    EntityType::CatalogProduct,
                    DEFAULT_ATTRIBUTE_SET_NAME,
                ),
            ]),
        }
    }

    /// Add `set`, replacing any set with the same id.
    pub fn insert(&self, set: AttributeSet) -> Result<(), StoreError> {
        let mut sets = self.sets.write().map_err(|_| StoreError::poisoned())?;
        sets.retain(|s| s.id != set.id);
        sets.push(set);
        Ok(())
    }
}

impl AttributeSetRepository for InMemoryAttributeSetStore {
    fn attribute_set_id_by_name(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<AttributeSetId, StoreError> {
        let sets = self.sets.read().map_err(|_| StoreError::poisoned())?;
        sets.iter()
            .find(|s| s.entity_type == entity_type && s.name == name)
            .map(|s| s.id)
            .ok_or_else(|| StoreError::NotFound(format!("attribute set '{name}' for {entity_type}")))
    }
}
