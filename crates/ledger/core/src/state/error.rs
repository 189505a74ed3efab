//! Ledger state errors.

use crate::error::{ErrorSeverity, LedgerError};
use crate::state::{EntityId, ResourceId};

/// Errors raised when reading or writing entries of a guild ledger.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// The entity has never been initialized in this ledger.
    #[error("entity {0} has no ledger entry")]
    EntityNotFound(EntityId),

    /// The entity exists but has no stored state for the resource yet.
    #[error("entity {entity} has no state for {resource}")]
    ResourceNotTracked {
        entity: EntityId,
        resource: ResourceId,
    },
}

impl LedgerError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::EntityNotFound(_) => ErrorSeverity::Validation,
            // The engine materializes missing resources from the registry, so
            // seeing this outside of it points at a wiring problem.
            StateError::ResourceNotTracked { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::EntityNotFound(_) => "STATE_ENTITY_NOT_FOUND",
            StateError::ResourceNotTracked { .. } => "STATE_RESOURCE_NOT_TRACKED",
        }
    }
}
