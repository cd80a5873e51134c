//! Seed task for the demo product.
//!
//! ```text
//! enter admin context
//!   ↓
//! 1. look the SKU up            (found → done, nothing written)
//!   ↓
//! 2. resolve attribute set, load category
//!   ↓
//! 3. insert product if absent   (lost a race → done)
//!   ↓
//! 4. save one source item for the saved SKU
//!      (failure → delete the product again when compensation is on)
//! ```

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use shopseed_auth::{Area, AreaState, ContextError, ExecutionContext};
use shopseed_catalog::{EntityType, ProductRecord, ProductStatus, StockData, Visibility};
use shopseed_core::{AttributeSetId, PatchName, ProductEntityId, Sku};
use shopseed_infra::{
    AttributeSetRepository, CategoryRepository, InsertOutcome, ProductRepository,
    SourceItemRepository,
};
use shopseed_inventory::SourceItem;

use crate::config::{AttributeSetSource, ContextMode, SeedProductConfig};
use crate::error::{Compensation, SeedStep, SetupError};
use crate::patch::{DataPatch, PatchOutcome};

/// Patch-history name of [`SeedProductTask`].
pub const SEED_PRODUCT_PATCH: &str = "seed_simple_product";

/// Result of one seed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SeedOutcome {
    Created {
        sku: Sku,
        entity_id: Option<ProductEntityId>,
    },
    AlreadyExists {
        sku: Sku,
        entity_id: Option<ProductEntityId>,
    },
}

impl From<SeedOutcome> for PatchOutcome {
    fn from(value: SeedOutcome) -> Self {
        match value {
            SeedOutcome::Created { sku, entity_id } => PatchOutcome::Changed {
                summary: match entity_id {
                    Some(id) => format!("created product '{sku}' (entity {id})"),
                    None => format!("created product '{sku}'"),
                },
            },
            SeedOutcome::AlreadyExists { sku, .. } => PatchOutcome::Unchanged {
                summary: format!("product '{sku}' already exists"),
            },
        }
    }
}

/// Makes sure the configured demo product and its source item exist.
pub struct SeedProductTask<P, C, A, I> {
    config: SeedProductConfig,
    products: P,
    categories: C,
    attribute_sets: A,
    source_items: I,
}

impl<P, C, A, I> SeedProductTask<P, C, A, I>
where
    P: ProductRepository,
    C: CategoryRepository,
    A: AttributeSetRepository,
    I: SourceItemRepository,
{
    pub fn new(
        config: SeedProductConfig,
        products: P,
        categories: C,
        attribute_sets: A,
        source_items: I,
    ) -> Self {
        Self {
            config,
            products,
            categories,
            attribute_sets,
            source_items,
        }
    }

    pub fn config(&self) -> &SeedProductConfig {
        &self.config
    }

    /// Run the seed inside the admin area.
    ///
    /// In [`ContextMode::Emulate`] the area is switched for this call only. In
    /// [`ContextMode::SetAreaCode`] an area that is already set is kept (and
    /// writes then run with whatever it grants).
    pub fn run(&self, state: &AreaState) -> Result<SeedOutcome, SetupError> {
        match self.config.context_mode {
            ContextMode::Emulate => state.emulate(Area::Adminhtml, |ctx| self.execute(ctx)),
            ContextMode::SetAreaCode => {
                match state.set_area_code(Area::Adminhtml) {
                    Ok(()) => {}
                    Err(ContextError::AreaAlreadySet(area)) => {
                        debug!(area = %area, "area code already set; keeping it");
                    }
                    Err(e) => return Err(e.into()),
                }
                let ctx = state.context()?;
                self.execute(&ctx)
            }
        }
    }

    /// The seed itself; `ctx` must allow catalog and inventory writes.
    pub fn execute(&self, ctx: &ExecutionContext) -> Result<SeedOutcome, SetupError> {
        let cfg = &self.config;
        let span = info_span!("seed_product", sku = %cfg.sku, context_id = %ctx.id());
        let _enter = span.enter();

        if let Some(existing) = self
            .products
            .find_by_sku(&cfg.sku)
            .map_err(SetupError::dependency(SeedStep::LookupProduct))?
        {
            info!(entity_id = ?existing.entity_id, "product already exists; skipping");
            return Ok(SeedOutcome::AlreadyExists {
                sku: existing.sku,
                entity_id: existing.entity_id,
            });
        }

        let record = self.build_record()?;
        let saved = match self
            .products
            .insert_if_absent(ctx, record)
            .map_err(SetupError::dependency(SeedStep::SaveProduct))?
        {
            InsertOutcome::Inserted(saved) => saved,
            InsertOutcome::AlreadyExists(existing) => {
                warn!("product appeared between lookup and insert; skipping");
                return Ok(SeedOutcome::AlreadyExists {
                    sku: existing.sku,
                    entity_id: existing.entity_id,
                });
            }
        };
        info!(entity_id = ?saved.entity_id, "product created");

        let item = SourceItem::in_stock(
            saved.sku.clone(),
            cfg.source_code.clone(),
            cfg.source_quantity(),
        );
        if let Err(source) = self
            .source_items
            .save_source_items(ctx, std::slice::from_ref(&item))
        {
            let compensation = self.compensate(ctx, &saved.sku);
            return Err(SetupError::InventoryWrite {
                sku: saved.sku,
                source,
                compensation,
            });
        }
        info!(
            source_code = %item.source_code,
            quantity = item.quantity,
            "source item saved"
        );

        Ok(SeedOutcome::Created {
            sku: saved.sku,
            entity_id: saved.entity_id,
        })
    }

    fn build_record(&self) -> Result<ProductRecord, SetupError> {
        let cfg = &self.config;
        let attribute_set_id = self.resolve_attribute_set()?;
        let category = self
            .categories
            .load_by_id(cfg.category_id)
            .map_err(SetupError::dependency(SeedStep::LoadCategory))?;

        Ok(ProductRecord::new(
            cfg.sku.clone(),
            cfg.name.clone(),
            cfg.price,
            attribute_set_id,
        )
        .with_status(ProductStatus::Enabled)
        .with_visibility(Visibility::CatalogAndSearch)
        .with_categories([category.id])
        .with_stock(StockData::in_stock(cfg.stock_quantity)))
    }

    fn resolve_attribute_set(&self) -> Result<AttributeSetId, SetupError> {
        match &self.config.attribute_set {
            AttributeSetSource::Fixed(id) => Ok(*id),
            AttributeSetSource::ByName(name) => self
                .attribute_sets
                .attribute_set_id_by_name(EntityType::CatalogProduct, name)
                .map_err(SetupError::dependency(SeedStep::ResolveAttributeSet)),
        }
    }

    fn compensate(&self, ctx: &ExecutionContext, sku: &Sku) -> Compensation {
        if !self.config.compensate_on_inventory_failure {
            warn!("source item save failed; product left without stock entry");
            return Compensation::Disabled;
        }
        match self.products.delete_by_sku(ctx, sku) {
            Ok(true) => {
                warn!("source item save failed; product rolled back");
                Compensation::RolledBack
            }
            Ok(false) => {
                warn!("source item save failed; product was already removed");
                Compensation::AlreadyGone
            }
            Err(e) => {
                tracing::error!(error = %e, "source item save failed and rollback failed");
                Compensation::Failed(e.to_string())
            }
        }
    }
}

impl<P, C, A, I> DataPatch for SeedProductTask<P, C, A, I>
where
    P: ProductRepository,
    C: CategoryRepository,
    A: AttributeSetRepository,
    I: SourceItemRepository,
{
    fn name(&self) -> PatchName {
        PatchName::from_static(SEED_PRODUCT_PATCH)
    }

    fn apply(&self, state: &AreaState) -> Result<PatchOutcome, SetupError> {
        self.run(state).map(PatchOutcome::from)
    }
}
