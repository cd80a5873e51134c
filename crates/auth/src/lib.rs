//! `shopseed-auth` — execution-context boundary for setup writes.
//!
//! Catalog and inventory writes must happen inside an area scope (e.g.
//! `adminhtml`). This crate models the areas, the permissions they grant and
//! the scoped state that hands out an [`ExecutionContext`]. It is decoupled
//! from storage.

pub mod area;
pub mod authorize;
pub mod context;
pub mod permissions;

pub use area::Area;
pub use authorize::{authorize, AuthzError};
pub use context::{AreaGuard, AreaState, ContextError, ExecutionContext};
pub use permissions::Permission;
