use serde::{Deserialize, Serialize};

use shopseed_core::AttributeSetId;

/// Name of the attribute set every catalog install ships with.
pub const DEFAULT_ATTRIBUTE_SET_NAME: &str = "Default";

/// Entity types that carry attribute sets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    CatalogProduct,
    CatalogCategory,
}

impl EntityType {
    pub fn code(&self) -> &'static str {
        match self {
            EntityType::CatalogProduct => "catalog_product",
            EntityType::CatalogCategory => "catalog_category",
        }
    }
}

impl core::fmt::Display for EntityType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Named grouping of attributes for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    pub id: AttributeSetId,
    pub entity_type: EntityType,
    pub name: String,
}

impl AttributeSet {
    pub fn new(id: AttributeSetId, entity_type: EntityType, name: impl Into<String>) -> Self {
        Self {
            id,
            entity_type,
            name: name.into(),
        }
    }
}
