use std::sync::RwLock;

use chrono::{DateTime, Utc};

use shopseed_core::PatchName;

use super::r#trait::{AppliedPatch, PatchHistory};
use crate::StoreError;

/// In-memory patch history for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPatchHistory {
    applied: RwLock<Vec<AppliedPatch>>,
}

impl InMemoryPatchHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatchHistory for InMemoryPatchHistory {
    fn is_applied(&self, name: &PatchName) -> Result<bool, StoreError> {
        let applied = self.applied.read().map_err(|_| StoreError::poisoned())?;
        Ok(applied.iter().any(|p| &p.name == name))
    }

    fn record(&self, name: &PatchName, applied_at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut applied = self.applied.write().map_err(|_| StoreError::poisoned())?;
        if !applied.iter().any(|p| &p.name == name) {
            applied.push(AppliedPatch {
                name: name.clone(),
                applied_at,
            });
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<AppliedPatch>, StoreError> {
        let applied = self.applied.read().map_err(|_| StoreError::poisoned())?;
        Ok(applied.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_is_idempotent_and_keeps_first_timestamp() {
        let history = InMemoryPatchHistory::new();
        let name = PatchName::new("AddSimpleProduct").unwrap();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        assert!(!history.is_applied(&name).unwrap());
        history.record(&name, first).unwrap();
        history.record(&name, later).unwrap();

        let list = history.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].applied_at, first);
        assert!(history.is_applied(&name).unwrap());
    }

    #[test]
    fn list_preserves_application_order() {
        let history = InMemoryPatchHistory::new();
        for name in ["B", "A", "C"] {
            history
                .record(&PatchName::new(name).unwrap(), Utc::now())
                .unwrap();
        }
        let names: Vec<String> = history
            .list()
            .unwrap()
            .into_iter()
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(names, ["B", "A", "C"]);
    }
}
