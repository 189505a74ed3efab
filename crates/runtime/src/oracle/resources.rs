//! [`ledger_core::ResourceRegistry`] backed by an ordered map.
use std::collections::BTreeMap;

use ledger_core::{ResourceDefinition, ResourceId, ResourceRegistry};

#[derive(Debug, Default)]
pub struct ResourceRegistryImpl {
    definitions: BTreeMap<ResourceId, ResourceDefinition>,
}

impl ResourceRegistryImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ResourceDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Register a definition, replacing any previous one with the same id.
    pub fn register(&mut self, definition: ResourceDefinition) {
        self.definitions.insert(definition.id, definition);
    }

    pub fn contains(&self, resource: ResourceId) -> bool {
        self.definitions.contains_key(&resource)
    }
}

impl ResourceRegistry for ResourceRegistryImpl {
    fn definition(&self, resource: ResourceId) -> Option<ResourceDefinition> {
        self.definitions.get(&resource).cloned()
    }

    fn all_definitions(&self) -> Vec<ResourceDefinition> {
        self.definitions.values().cloned().collect()
    }
}
