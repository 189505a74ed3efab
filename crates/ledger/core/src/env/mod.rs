//! Read-only collaborators: resource registry and item catalog.
//!
//! Oracles expose static configuration. They never change while an operation
//! runs and never appear in the persisted guild state.

mod items;

pub use items::{ItemDefinition, ItemModifier, ItemOracle};

use crate::resource::ResourceDefinition;
use crate::state::ResourceId;

/// Typed registry of resource definitions.
///
/// Unknown ids are a configuration error at the boundary; callers must not
/// substitute a default definition.
pub trait ResourceRegistry: Send + Sync {
    fn definition(&self, resource: ResourceId) -> Option<ResourceDefinition>;

    /// Returns all registered definitions, ordered by id.
    fn all_definitions(&self) -> Vec<ResourceDefinition>;
}
