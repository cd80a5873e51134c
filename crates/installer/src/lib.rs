//! Demo installer wiring.
//!
//! Builds the in-memory catalog, inventory and patch history, registers the
//! data patches and runs them against a fresh area state.

use std::sync::Arc;

use serde::Serialize;

use shopseed_auth::AreaState;
use shopseed_catalog::ProductRecord;
use shopseed_infra::{
    InMemoryAttributeSetStore, InMemoryCategoryStore, InMemoryPatchHistory, InMemoryProductStore,
    InMemorySourceItemStore,
};
use shopseed_inventory::SourceItem;
use shopseed_setup::{InstallError, InstallReport, Installer, InstallerConfig, SeedProductTask};

/// Environment variable with the number of installer passes to run.
pub const RUNS_VAR: &str = "SHOPSEED_RUNS";

/// State of the stores after one installer pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub report: InstallReport,
    pub products: Vec<ProductRecord>,
    pub source_items: Vec<SourceItem>,
}

/// Wired installer plus handles on every store it writes to.
pub struct App {
    pub products: Arc<InMemoryProductStore>,
    pub source_items: Arc<InMemorySourceItemStore>,
    pub history: Arc<InMemoryPatchHistory>,
    state: AreaState,
    installer: Installer<Arc<InMemoryPatchHistory>>,
}

/// Build the demo installer from `config`.
pub fn build_app(config: &InstallerConfig) -> Result<App, InstallError> {
    let products = Arc::new(InMemoryProductStore::new());
    let source_items = Arc::new(InMemorySourceItemStore::linked_to(products.clone()));
    let history = Arc::new(InMemoryPatchHistory::new());

    let mut installer = Installer::new(history.clone());
    installer.register(SeedProductTask::new(
        config.seed_product.clone(),
        products.clone(),
        Arc::new(InMemoryCategoryStore::with_defaults()),
        Arc::new(InMemoryAttributeSetStore::with_defaults()),
        source_items.clone(),
    ))?;

    Ok(App {
        products,
        source_items,
        history,
        state: AreaState::new(),
        installer,
    })
}

impl App {
    /// Run one installer pass and snapshot the stores.
    pub fn install(&self) -> Result<RunSummary, InstallError> {
        let report = self.installer.run(&self.state)?;
        Ok(RunSummary {
            report,
            products: self.products.list()?,
            source_items: self.source_items.list()?,
        })
    }
}
