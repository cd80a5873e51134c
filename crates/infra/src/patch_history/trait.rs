use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopseed_core::PatchName;

use crate::StoreError;

/// One applied patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPatch {
    pub name: PatchName,
    pub applied_at: DateTime<Utc>,
}

/// Patch history.
pub trait PatchHistory: Send + Sync {
    fn is_applied(&self, name: &PatchName) -> Result<bool, StoreError>;

    /// Record `name` as applied. Recording an already-recorded name is a
    /// no-op and keeps the original timestamp.
    fn record(&self, name: &PatchName, applied_at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Applied patches in application order.
    fn list(&self) -> Result<Vec<AppliedPatch>, StoreError>;
}

impl<S> PatchHistory for Arc<S>
where
    S: PatchHistory + ?Sized,
{
    fn is_applied(&self, name: &PatchName) -> Result<bool, StoreError> {
        (**self).is_applied(name)
    }

    fn record(&self, name: &PatchName, applied_at: DateTime<Utc>) -> Result<(), StoreError> {
        (**self).record(name, applied_at)
    }

    fn list(&self) -> Result<Vec<AppliedPatch>, StoreError> {
        (**self).list()
    }
}
