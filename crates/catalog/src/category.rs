use serde::{Deserialize, Serialize};

use shopseed_core::{CategoryId, Entity};

/// Read-only view of an existing catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReference {
    pub id: CategoryId,
    pub name: String,
    /// Parent category; `None` for the tree root.
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
}

impl CategoryReference {
    pub fn new(id: CategoryId, name: impl Into<String>, parent_id: Option<CategoryId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            is_active: true,
        }
    }
}

impl Entity for CategoryReference {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
