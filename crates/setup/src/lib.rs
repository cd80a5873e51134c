//! `shopseed-setup` — install-time data patches.
//!
//! A [`DataPatch`] is one named, run-once installation step. The
//! [`Installer`] orders patches by their declared dependencies, skips the ones
//! already recorded in the patch history and applies the rest.
//! [`SeedProductTask`] is the patch that makes sure the demo product exists.

pub mod config;
pub mod error;
pub mod installer;
pub mod patch;
pub mod seed_product;

pub use config::{AttributeSetSource, ConfigError, ContextMode, InstallerConfig, SeedProductConfig};
pub use error::{Compensation, SeedStep, SetupError};
pub use installer::{InstallError, InstallReport, Installer, PatchReport, PatchStatus};
pub use patch::{DataPatch, PatchOutcome};
pub use seed_product::{SeedOutcome, SeedProductTask, SEED_PRODUCT_PATCH};
