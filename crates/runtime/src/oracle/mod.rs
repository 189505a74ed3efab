//! Runtime wrappers around static ledger content.
//!
//! These implementations expose the `ledger-core` oracle traits and bundle them
//! into an [`OracleManager`] shared by every engine operation. The data is
//! immutable at runtime; dynamic state lives in repositories.
mod items;
mod resources;

use std::sync::Arc;

use ledger_content::ContentBundle;

pub use items::ItemOracleImpl;
pub use resources::ResourceRegistryImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) resources: Arc<ResourceRegistryImpl>,
    pub(crate) items: Arc<ItemOracleImpl>,
}

impl OracleManager {
    pub fn new(resources: Arc<ResourceRegistryImpl>, items: Arc<ItemOracleImpl>) -> Self {
        Self { resources, items }
    }

    /// Builds both oracles from loaded content.
    pub fn from_content(bundle: &ContentBundle) -> Self {
        let resources = ResourceRegistryImpl::from_definitions(bundle.resources.iter().cloned());
        let items = ItemOracleImpl::from_definitions(bundle.items.iter().cloned());
        Self::new(Arc::new(resources), Arc::new(items))
    }

    pub fn resources(&self) -> &ResourceRegistryImpl {
        &self.resources
    }

    pub fn items(&self) -> &ItemOracleImpl {
        &self.items
    }
}
