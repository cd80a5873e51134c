use std::sync::Arc;

use shopseed_auth::ExecutionContext;
use shopseed_catalog::{CategoryReference, EntityType, ProductRecord};
use shopseed_core::{AttributeSetId, CategoryId, Sku};

use crate::StoreError;

/// Result of a conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored; carries the persisted record.
    Inserted(ProductRecord),
    /// A record with the same SKU already existed and was left untouched.
    AlreadyExists(ProductRecord),
}

/// Product repository.
///
/// Lookups need no context; every write is checked against the caller's
/// [`ExecutionContext`].
pub trait ProductRepository: Send + Sync {
    /// `Ok(None)` when no product carries `sku`.
    fn find_by_sku(&self, sku: &Sku) -> Result<Option<ProductRecord>, StoreError>;

    /// Insert or update by SKU; returns the record with store-assigned fields.
    fn save(&self, ctx: &ExecutionContext, record: ProductRecord)
        -> Result<ProductRecord, StoreError>;

    /// Insert only if the SKU is unused.
    ///
    /// The default is a plain lookup followed by `save`, which is not atomic.
    /// Stores with a uniqueness constraint should override it.
    fn insert_if_absent(
        &self,
        ctx: &ExecutionContext,
        record: ProductRecord,
    ) -> Result<InsertOutcome, StoreError> {
        if let Some(existing) = self.find_by_sku(&record.sku)? {
            return Ok(InsertOutcome::AlreadyExists(existing));
        }
        self.save(ctx, record).map(InsertOutcome::Inserted)
    }

    /// Remove a product; `Ok(false)` if it did not exist.
    fn delete_by_sku(&self, ctx: &ExecutionContext, sku: &Sku) -> Result<bool, StoreError>;
}

/// Read-only category lookup.
pub trait CategoryRepository: Send + Sync {
    fn load_by_id(&self, id: CategoryId) -> Result<CategoryReference, StoreError>;
}

/// Attribute-set resolution.
pub trait AttributeSetRepository: Send + Sync {
    fn attribute_set_id_by_name(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<AttributeSetId, StoreError>;
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn find_by_sku(&self, sku: &Sku) -> Result<Option<ProductRecord>, StoreError> {
        (**self).find_by_sku(sku)
    }

    fn save(
        &self,
        ctx: &ExecutionContext,
        record: ProductRecord,
    ) -> Result<ProductRecord, StoreError> {
        (**self).save(ctx, record)
    }

    fn insert_if_absent(
        &self,
        ctx: &ExecutionContext,
        record: ProductRecord,
    ) -> Result<InsertOutcome, StoreError> {
        (**self).insert_if_absent(ctx, record)
    }

    fn delete_by_sku(&self, ctx: &ExecutionContext, sku: &Sku) -> Result<bool, StoreError> {
        (**self).delete_by_sku(ctx, sku)
    }
}

impl<S> CategoryRepository for Arc<S>
where
    S: CategoryRepository + ?Sized,
{
    fn load_by_id(&self, id: CategoryId) -> Result<CategoryReference, StoreError> {
        (**self).load_by_id(id)
    }
}

impl<S> AttributeSetRepository for Arc<S>
where
    S: AttributeSetRepository + ?Sized,
{
    fn attribute_set_id_by_name(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<AttributeSetId, StoreError> {
        (**self).attribute_set_id_by_name(entity_type, name)
    }
}
