//! Scoped execution context.
//!
//! `AreaState` holds the process-level area code. Writers never read it
//! directly: they receive an [`ExecutionContext`] value produced by
//! [`AreaState::emulate`] or [`AreaState::context`], and the area is restored
//! when the scope ends.

use std::sync::RwLock;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{authorize, Area, AuthzError, Permission};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// `set_area_code` was called while an area is already active.
    #[error("area code is already set to '{0}'")]
    AreaAlreadySet(Area),

    #[error("area code is not set")]
    AreaNotSet,

    #[error("area state lock poisoned")]
    Poisoned,
}

/// Authorization scope handed to catalog/inventory writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionContext {
    id: Uuid,
    area: Area,
}

impl ExecutionContext {
    pub fn new(area: Area) -> Self {
        Self {
            id: Uuid::now_v7(),
            area,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn authorize(&self, required: &Permission) -> Result<(), AuthzError> {
        authorize(self, required)
    }
}

/// Process-level area state.
#[derive(Debug, Default)]
pub struct AreaState {
    current: RwLock<Option<Area>>,
}

impl AreaState {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// State with an area already active (as if a previous step set it).
    pub fn with_area(area: Area) -> Self {
        Self {
            current: RwLock::new(Some(area)),
        }
    }

    pub fn area_code(&self) -> Result<Option<Area>, ContextError> {
        let current = self.current.read().map_err(|_| ContextError::Poisoned)?;
        Ok(*current)
    }

    /// Set the area for the rest of the process. Fails if one is already set.
    pub fn set_area_code(&self, area: Area) -> Result<(), ContextError> {
        let mut current = self.current.write().map_err(|_| ContextError::Poisoned)?;
        if let Some(existing) = *current {
            return Err(ContextError::AreaAlreadySet(existing));
        }
        *current = Some(area);
        tracing::debug!(area = %area, "area code set");
        Ok(())
    }

    /// Context for the currently active area.
    pub fn context(&self) -> Result<ExecutionContext, ContextError> {
        self.area_code()?
            .map(ExecutionContext::new)
            .ok_or(ContextError::AreaNotSet)
    }

    /// Switch to `area` until the returned guard is dropped.
    pub fn enter(&self, area: Area) -> Result<AreaGuard<'_>, ContextError> {
        let mut current = self.current.write().map_err(|_| ContextError::Poisoned)?;
        let previous = current.replace(area);
        let context = ExecutionContext::new(area);
        tracing::debug!(area = %area, context_id = %context.id(), "entered area scope");
        Ok(AreaGuard {
            state: self,
            previous,
            context,
        })
    }

    /// Run `f` exactly once inside an `area` scope.
    ///
    /// The previous area is restored when `f` returns, including on error.
    pub fn emulate<T, E, F>(&self, area: Area, f: F) -> Result<T, E>
    where
        F: FnOnce(&ExecutionContext) -> Result<T, E>,
        E: From<ContextError>,
    {
        let guard = self.enter(area)?;
        f(guard.context())
    }
}

/// Restores the previous area on drop.
#[derive(Debug)]
pub struct AreaGuard<'a> {
    state: &'a AreaState,
    previous: Option<Area>,
    context: ExecutionContext,
}

impl AreaGuard<'_> {
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }
}

impl Drop for AreaGuard<'_> {
    fn drop(&mut self) {
        match self.state.current.write() {
            Ok(mut current) => {
                *current = self.previous;
                tracing::debug!(context_id = %self.context.id(), "left area scope");
            }
            Err(_) => {
                tracing::warn!(context_id = %self.context.id(), "area state poisoned; scope not restored");
            }
        }
    }
}
