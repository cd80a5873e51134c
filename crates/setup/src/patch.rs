use serde::Serialize;

use shopseed_auth::AreaState;
use shopseed_core::PatchName;

use crate::SetupError;

/// Result of applying one patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum PatchOutcome {
    /// Data was written.
    Changed { summary: String },
    /// The target state already held; nothing was written.
    Unchanged { summary: String },
}

/// One named, run-once installation step.
pub trait DataPatch: Send + Sync {
    /// Stable name recorded in the patch history.
    fn name(&self) -> PatchName;

    /// Patches that must be applied before this one.
    fn dependencies(&self) -> Vec<PatchName> {
        Vec::new()
    }

    /// Former names of this patch; any of them in the history counts as applied.
    fn aliases(&self) -> Vec<PatchName> {
        Vec::new()
    }

    fn apply(&self, state: &AreaState) -> Result<PatchOutcome, SetupError>;
}
