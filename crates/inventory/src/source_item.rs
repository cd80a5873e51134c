use serde::{Deserialize, Serialize};

use shopseed_core::{Sku, SourceCode};

/// Code of the source every single-source install has.
pub const DEFAULT_SOURCE_CODE: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceItemStatus {
    OutOfStock,
    InStock,
}

impl SourceItemStatus {
    pub fn code(&self) -> u8 {
        match self {
            SourceItemStatus::OutOfStock => 0,
            SourceItemStatus::InStock => 1,
        }
    }
}

/// Stock of one SKU at one source.
///
/// The SKU must belong to a product that has already been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub sku: Sku,
    pub source_code: SourceCode,
    pub quantity: u32,
    pub status: SourceItemStatus,
}

impl SourceItem {
    pub fn new(sku: Sku, source_code: SourceCode, quantity: u32, status: SourceItemStatus) -> Self {
        Self {
            sku,
            source_code,
            quantity,
            status,
        }
    }

    pub fn in_stock(sku: Sku, source_code: SourceCode, quantity: u32) -> Self {
        Self::new(sku, source_code, quantity, SourceItemStatus::InStock)
    }

    /// Storage key: one entry per (source, SKU).
    pub fn key(&self) -> (SourceCode, Sku) {
        (self.source_code.clone(), self.sku.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_stock_constructor_sets_status() {
        let item = SourceItem::in_stock(
            Sku::new("simple-product").unwrap(),
            SourceCode::new(DEFAULT_SOURCE_CODE).unwrap(),
            100,
        );
        assert_eq!(item.status, SourceItemStatus::InStock);
        assert_eq!(item.status.code(), 1);
        assert_eq!(item.key().0.as_str(), "default");
    }

    #[test]
    fn serializes_status_as_snake_case() {
        let item = SourceItem::new(
            Sku::new("a").unwrap(),
            SourceCode::new("warehouse").unwrap(),
            0,
            SourceItemStatus::OutOfStock,
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "out_of_stock");
        assert_eq!(json["quantity"], 0);
    }
}
