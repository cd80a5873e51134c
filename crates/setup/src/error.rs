use serde::Serialize;
use thiserror::Error;

use shopseed_auth::ContextError;
use shopseed_core::{DomainError, Sku};
use shopseed_infra::StoreError;

/// Collaborator call that failed during a seed run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStep {
    LookupProduct,
    ResolveAttributeSet,
    LoadCategory,
    SaveProduct,
    SaveSourceItems,
}

impl core::fmt::Display for SeedStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            SeedStep::LookupProduct => "product lookup",
            SeedStep::ResolveAttributeSet => "attribute set resolution",
            SeedStep::LoadCategory => "category lookup",
            SeedStep::SaveProduct => "product save",
            SeedStep::SaveSourceItems => "source item save",
        })
    }
}

/// What happened to the saved product after its source item failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum Compensation {
    /// Compensation is switched off; the product stays in the catalog.
    Disabled,
    /// The product was deleted again.
    RolledBack,
    /// The product was no longer in the catalog when the rollback ran.
    AlreadyGone,
    /// Deleting the product failed too.
    Failed(String),
}

impl core::fmt::Display for Compensation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Compensation::Disabled => f.write_str("disabled"),
            Compensation::RolledBack => f.write_str("product rolled back"),
            Compensation::AlreadyGone => f.write_str("product already gone"),
            Compensation::Failed(reason) => write!(f, "rollback failed: {reason}"),
        }
    }
}

/// Failure of a setup step.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("execution context: {0}")]
    Context(#[from] ContextError),

    /// A catalog or inventory collaborator was unreachable or rejected the call.
    #[error("{step} failed: {source}")]
    Dependency {
        step: SeedStep,
        #[source]
        source: StoreError,
    },

    /// The product was saved but its source item was not.
    #[error("source item save failed for '{sku}': {source} ({compensation})")]
    InventoryWrite {
        sku: Sku,
        #[source]
        source: StoreError,
        compensation: Compensation,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SetupError {
    pub(crate) fn dependency(step: SeedStep) -> impl FnOnce(StoreError) -> Self {
        move |source| SetupError::Dependency { step, source }
    }
}
