//! Resource catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use ledger_core::ResourceDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Resource catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCatalog {
    pub resources: Vec<ResourceDefinition>,
}

/// Loader for resource definitions from RON files.
pub struct ResourceLoader;

impl ResourceLoader {
    /// Load resource definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ResourceDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse resource definitions from RON text.
    ///
    /// Ids and names must be unique; names are how content files and logs
    /// refer to resources, so two resources sharing one is rejected.
    pub fn parse(content: &str) -> LoadResult<Vec<ResourceDefinition>> {
        let catalog: ResourceCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse resource catalog RON: {}", e))?;

        let mut ids = BTreeSet::new();
        let mut names = BTreeSet::new();
        for resource in &catalog.resources {
            if !ids.insert(resource.id) {
                anyhow::bail!("Duplicate resource id {} in resource catalog", resource.id);
            }
            if !names.insert(resource.name.to_ascii_lowercase()) {
                anyhow::bail!("Duplicate resource name '{}' in resource catalog", resource.name);
            }
        }

        Ok(catalog.resources)
    }
}
