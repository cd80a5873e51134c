//! Installation sequence.
//!
//! Patches are applied in dependency order (registration order breaks ties).
//! A patch whose name or alias is already in the history is skipped. The first
//! failure stops the sequence; patches applied before it stay recorded.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, warn};

use shopseed_auth::AreaState;
use shopseed_core::PatchName;
use shopseed_infra::{PatchHistory, StoreError};

use crate::patch::{DataPatch, PatchOutcome};
use crate::SetupError;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("patch '{0}' is registered twice")]
    DuplicatePatch(PatchName),

    #[error("patch '{patch}' depends on unknown patch '{dependency}'")]
    UnknownDependency {
        patch: PatchName,
        dependency: PatchName,
    },

    #[error("dependency cycle between patches: {0:?}")]
    DependencyCycle(Vec<PatchName>),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// A patch failed; `applied` lists the patches that succeeded before it.
    #[error("patch '{patch}' failed: {source}")]
    PatchFailed {
        patch: PatchName,
        applied: Vec<PatchName>,
        #[source]
        source: SetupError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum PatchStatus {
    Applied { outcome: PatchOutcome },
    /// Skipped because the history already lists the patch or an alias.
    AlreadyRecorded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub name: PatchName,
    pub status: PatchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub patches: Vec<PatchReport>,
}

impl InstallReport {
    pub fn applied(&self) -> impl Iterator<Item = &PatchName> {
        self.patches
            .iter()
            .filter(|p| matches!(p.status, PatchStatus::Applied { .. }))
            .map(|p| &p.name)
    }
}

/// Runs registered data patches once each.
pub struct Installer<H> {
    history: H,
    patches: Vec<Box<dyn DataPatch>>,
}

impl<H: PatchHistory> Installer<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            patches: Vec::new(),
        }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn register<P>(&mut self, patch: P) -> Result<&mut Self, InstallError>
    where
        P: DataPatch + 'static,
    {
        let name = patch.name();
        if self.patches.iter().any(|p| p.name() == name) {
            return Err(InstallError::DuplicatePatch(name));
        }
        self.patches.push(Box::new(patch));
        Ok(self)
    }

    /// Apply every pending patch in dependency order.
    pub fn run(&self, state: &AreaState) -> Result<InstallReport, InstallError> {
        let started_at = Utc::now();
        let order = self.ordered()?;
        let mut reports = Vec::with_capacity(order.len());
        let mut applied = Vec::new();

        for idx in order {
            let patch = &self.patches[idx];
            let name = patch.name();
            let span = info_span!("data_patch", patch = %name);
            let _enter = span.enter();

            if self.already_recorded(&**patch)? {
                info!("patch already applied; skipping");
                reports.push(PatchReport {
                    name,
                    status: PatchStatus::AlreadyRecorded,
                });
                continue;
            }

            match patch.apply(state) {
                Ok(outcome) => {
                    self.history.record(&name, Utc::now())?;
                    info!(?outcome, "patch applied");
                    applied.push(name.clone());
                    reports.push(PatchReport {
                        name,
                        status: PatchStatus::Applied { outcome },
                    });
                }
                Err(source) => {
                    warn!(error = %source, "patch failed; halting installation");
                    return Err(InstallError::PatchFailed {
                        patch: name,
                        applied,
                        source,
                    });
                }
            }
        }

        Ok(InstallReport {
            started_at,
            finished_at: Utc::now(),
            patches: reports,
        })
    }

    fn already_recorded(&self, patch: &dyn DataPatch) -> Result<bool, StoreError> {
        if self.history.is_applied(&patch.name())? {
            return Ok(true);
        }
        for alias in patch.aliases() {
            if self.history.is_applied(&alias)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Indices of `self.patches` in a dependency-respecting order.
    fn ordered(&self) -> Result<Vec<usize>, InstallError> {
        let mut index_of: HashMap<PatchName, usize> = HashMap::new();
        for (idx, patch) in self.patches.iter().enumerate() {
            index_of.insert(patch.name(), idx);
            for alias in patch.aliases() {
                index_of.entry(alias).or_insert(idx);
            }
        }

        let mut deps: Vec<HashSet<usize>> = Vec::with_capacity(self.patches.len());
        for (idx, patch) in self.patches.iter().enumerate() {
            let mut set = HashSet::new();
            for dependency in patch.dependencies() {
                match index_of.get(&dependency) {
                    Some(&dep_idx) if dep_idx != idx => {
                        set.insert(dep_idx);
                    }
                    Some(_) => {
                        return Err(InstallError::DependencyCycle(vec![patch.name()]));
                    }
                    None => {
                        // Satisfied by an earlier installation.
                        if !self.history.is_applied(&dependency)? {
                            return Err(InstallError::UnknownDependency {
                                patch: patch.name(),
                                dependency,
                            });
                        }
                    }
                }
            }
            deps.push(set);
        }

        let mut order = Vec::with_capacity(self.patches.len());
        let mut placed = vec![false; self.patches.len()];
        while order.len() < self.patches.len() {
            let next = (0..self.patches.len())
                .find(|&idx| !placed[idx] && deps[idx].iter().all(|&d| placed[d]));
            match next {
                Some(idx) => {
                    placed[idx] = true;
                    order.push(idx);
                }
                None => {
                    let stuck = (0..self.patches.len())
                        .filter(|&idx| !placed[idx])
                        .map(|idx| self.patches[idx].name())
                        .collect();
                    return Err(InstallError::DependencyCycle(stuck));
                }
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use shopseed_infra::InMemoryPatchHistory;

    use super::*;

    /// Patch that appends its name to a shared log when applied.
    struct Recording {
        name: &'static str,
        deps: Vec<&'static str>,
        aliases: Vec<&'static str>,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Recording {
        fn new(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
            Self {
                name,
                deps: vec![],
                aliases: vec![],
                fail: false,
                log: log.clone(),
            }
        }

        fn after(mut self, deps: &[&'static str]) -> Self {
            self.deps = deps.to_vec();
            self
        }

        fn aka(mut self, aliases: &[&'static str]) -> Self {
            self.aliases = aliases.to_vec();
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }
    }

    impl DataPatch for Recording {
        fn name(&self) -> PatchName {
            PatchName::from_static(self.name)
        }

        fn dependencies(&self) -> Vec<PatchName> {
            self.deps.iter().copied().map(PatchName::from_static).collect()
        }

        fn aliases(&self) -> Vec<PatchName> {
            self.aliases.iter().copied().map(PatchName::from_static).collect()
        }

        fn apply(&self, _state: &AreaState) -> Result<PatchOutcome, SetupError> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(SetupError::Domain(shopseed_core::DomainError::validation(
                    "boom",
                )));
            }
            Ok(PatchOutcome::Changed {
                summary: self.name.to_string(),
            })
        }
    }

    fn name(s: &'static str) -> PatchName {
        PatchName::from_static(s)
    }

    #[test]
    fn applies_in_dependency_order() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut installer = Installer::new(InMemoryPatchHistory::new());
        installer
            .register(Recording::new("c", &log).after(&["b"]))
            .unwrap()
            .register(Recording::new("a", &log))
            .unwrap()
            .register(Recording::new("b", &log).after(&["a"]))
            .unwrap();

        let report = installer.run(&AreaState::new()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(report.applied().count(), 3);
        assert_eq!(installer.history().list().unwrap().len(), 3);
    }

    #[test]
    fn second_run_skips_recorded_patches() {
        let log = Arc::new(Mutex::new(vec![]));
        let history = Arc::new(InMemoryPatchHistory::new());
        let mut installer = Installer::new(history.clone());
        installer.register(Recording::new("a", &log)).unwrap();

        installer.run(&AreaState::new()).unwrap();
        let report = installer.run(&AreaState::new()).unwrap();

        assert_eq!(log.lock().unwrap().len(), 1);
        assert_eq!(report.patches[0].status, PatchStatus::AlreadyRecorded);
        assert!(history.is_applied(&name("a")).unwrap());
    }

    #[test]
    fn recorded_alias_counts_as_applied() {
        let log = Arc::new(Mutex::new(vec![]));
        let history = InMemoryPatchHistory::new();
        history.record(&name("old_name"), Utc::now()).unwrap();
        let mut installer = Installer::new(history);
        installer
            .register(Recording::new("new_name", &log).aka(&["old_name"]))
            .unwrap();

        let report = installer.run(&AreaState::new()).unwrap();
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(report.applied().count(), 0);
    }

    #[test]
    fn failure_halts_later_patches_and_keeps_earlier_ones() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut installer = Installer::new(InMemoryPatchHistory::new());
        installer
            .register(Recording::new("a", &log))
            .unwrap()
            .register(Recording::new("b", &log).failing())
            .unwrap()
            .register(Recording::new("c", &log))
            .unwrap();

        let err = installer.run(&AreaState::new()).unwrap_err();
        match err {
            InstallError::PatchFailed { patch, applied, .. } => {
                assert_eq!(patch, name("b"));
                assert_eq!(applied, vec![name("a")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
        assert!(installer.history().is_applied(&name("a")).unwrap());
        assert!(!installer.history().is_applied(&name("b")).unwrap());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut installer = Installer::new(InMemoryPatchHistory::new());
        installer.register(Recording::new("a", &log)).unwrap();
        assert!(matches!(
            installer.register(Recording::new("a", &log)),
            Err(InstallError::DuplicatePatch(_))
        ));
    }

    #[test]
    fn unknown_dependency_is_rejected_unless_recorded() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut installer = Installer::new(InMemoryPatchHistory::new());
        installer
            .register(Recording::new("a", &log).after(&["missing"]))
            .unwrap();
        assert!(matches!(
            installer.run(&AreaState::new()),
            Err(InstallError::UnknownDependency { .. })
        ));

        let history = InMemoryPatchHistory::new();
        history.record(&name("missing"), Utc::now()).unwrap();
        let mut installer = Installer::new(history);
        installer
            .register(Recording::new("a", &log).after(&["missing"]))
            .unwrap();
        installer.run(&AreaState::new()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a"]);
    }

    #[test]
    fn cycles_are_rejected_before_anything_runs() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut installer = Installer::new(InMemoryPatchHistory::new());
        installer
            .register(Recording::new("a", &log).after(&["b"]))
            .unwrap()
            .register(Recording::new("b", &log).after(&["a"]))
            .unwrap();

        let err = installer.run(&AreaState::new()).unwrap_err();
        match err {
            InstallError::DependencyCycle(names) => assert_eq!(names.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let log = Arc::new(Mutex::new(vec![]));
        let mut installer = Installer::new(InMemoryPatchHistory::new());
        installer.register(Recording::new("a", &log)).unwrap();
        let report = installer.run(&AreaState::new()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["patches"][0]["name"], "a");
        assert_eq!(json["patches"][0]["status"]["state"], "applied");
        assert_eq!(json["patches"][0]["status"]["outcome"]["result"], "changed");
    }
}
