use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopseed_core::{AttributeSetId, CategoryId, Entity, Price, ProductEntityId, Sku};

/// Product enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Enabled,
    Disabled,
}

impl ProductStatus {
    /// Numeric code used by catalog storage.
    pub fn code(&self) -> u8 {
        match self {
            ProductStatus::Enabled => 1,
            ProductStatus::Disabled => 2,
        }
    }
}

/// Where a product is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    NotVisibleIndividually,
    Catalog,
    Search,
    CatalogAndSearch,
}

impl Visibility {
    pub fn code(&self) -> u8 {
        match self {
            Visibility::NotVisibleIndividually => 1,
            Visibility::Catalog => 2,
            Visibility::Search => 3,
            Visibility::CatalogAndSearch => 4,
        }
    }

    pub fn in_catalog(&self) -> bool {
        matches!(self, Visibility::Catalog | Visibility::CatalogAndSearch)
    }

    pub fn in_search(&self) -> bool {
        matches!(self, Visibility::Search | Visibility::CatalogAndSearch)
    }
}

/// Product type. Only simple products (no options, no variants) are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Simple,
}

impl ProductType {
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
        }
    }
}

/// Legacy single-source stock attached to the product itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockData {
    pub qty: u32,
    pub is_in_stock: bool,
}

impl StockData {
    pub fn in_stock(qty: u32) -> Self {
        Self {
            qty,
            is_in_stock: true,
        }
    }
}

/// Catalog product record.
///
/// `entity_id`, `created_at` and `updated_at` are assigned by the catalog on
/// save; a freshly built record has none of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub entity_id: Option<ProductEntityId>,
    pub sku: Sku,
    pub name: String,
    pub price: Price,
    pub status: ProductStatus,
    pub visibility: Visibility,
    pub type_id: ProductType,
    pub attribute_set_id: AttributeSetId,
    pub category_ids: BTreeSet<CategoryId>,
    pub stock_data: Option<StockData>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// New, unsaved simple product: enabled, visible in catalog and search,
    /// no categories and no stock data.
    pub fn new(
        sku: Sku,
        name: impl Into<String>,
        price: Price,
        attribute_set_id: AttributeSetId,
    ) -> Self {
        Self {
            entity_id: None,
            sku,
            name: name.into(),
            price,
            status: ProductStatus::Enabled,
            visibility: Visibility::CatalogAndSearch,
            type_id: ProductType::Simple,
            attribute_set_id,
            category_ids: BTreeSet::new(),
            stock_data: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn with_stock(mut self, stock: StockData) -> Self {
        self.stock_data = Some(stock);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.entity_id.is_some()
    }

    pub fn in_category(&self, id: CategoryId) -> bool {
        self.category_ids.contains(&id)
    }
}

impl Entity for ProductRecord {
    type Id = Sku;

    fn id(&self) -> &Self::Id {
        &self.sku
    }
}
