//! Content loaders for reading ledger data from files.
//!
//! Every loader offers `load(path)` for files and `parse(&str)` for inline
//! content; both go through the same deserialization path.

pub mod config;
pub mod item;
pub mod resource;

pub use config::ConfigLoader;
pub use item::ItemLoader;
pub use resource::ResourceLoader;

use std::path::Path;

use ledger_core::{ItemDefinition, LedgerConfig, ResourceDefinition};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Everything a runtime needs from a content directory.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: LedgerConfig,
    pub resources: Vec<ResourceDefinition>,
    pub items: Vec<ItemDefinition>,
}

impl ContentBundle {
    /// Loads `ledger.toml`, `resources.ron` and `items.ron` from `dir`.
    ///
    /// A missing `ledger.toml` falls back to [`LedgerConfig::default`]; the
    /// catalogs are required.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        let config_path = dir.join("ledger.toml");
        let config = if config_path.exists() {
            ConfigLoader::load(&config_path)?
        } else {
            LedgerConfig::default()
        };
        let resources = ResourceLoader::load(&dir.join("resources.ron"))?;
        let items = ItemLoader::load(&dir.join("items.ron"))?;

        if !resources.iter().any(|r| r.id == config.attack_resource) {
            anyhow::bail!(
                "attack resource {} is not defined in {}",
                config.attack_resource,
                dir.join("resources.ron").display()
            );
        }

        Ok(Self {
            config,
            resources,
            items,
        })
    }
}
