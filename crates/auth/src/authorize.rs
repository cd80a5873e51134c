use thiserror::Error;

use crate::{Area, ExecutionContext, Permission};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: area '{area}' does not grant '{permission}'")]
    Forbidden { area: Area, permission: String },
}

/// Authorize an execution context for a single permission.
///
/// - No IO
/// - No panics
pub fn authorize(ctx: &ExecutionContext, required: &Permission) -> Result<(), AuthzError> {
    let granted = ctx.area().granted_permissions();
    if granted
        .iter()
        .any(|p| p.is_wildcard() || p.as_str() == required.as_str())
    {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            area: ctx.area(),
            permission: required.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_context_may_write_catalog() {
        let ctx = ExecutionContext::new(Area::Adminhtml);
        assert!(authorize(&ctx, &Permission::CATALOG_PRODUCT_WRITE).is_ok());
        assert!(authorize(&ctx, &Permission::INVENTORY_SOURCE_ITEM_WRITE).is_ok());
    }

    #[test]
    fn frontend_context_is_read_only() {
        let ctx = ExecutionContext::new(Area::Frontend);
        assert!(authorize(&ctx, &Permission::CATALOG_PRODUCT_READ).is_ok());
        let err = authorize(&ctx, &Permission::CATALOG_PRODUCT_WRITE).unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                area: Area::Frontend,
                permission: "catalog.product.write".to_string(),
            }
        );
    }

    #[test]
    fn crontab_may_write_inventory_but_not_catalog() {
        let ctx = ExecutionContext::new(Area::Crontab);
        assert!(authorize(&ctx, &Permission::INVENTORY_SOURCE_ITEM_WRITE).is_ok());
        assert!(authorize(&ctx, &Permission::CATALOG_PRODUCT_WRITE).is_err());
    }
}
