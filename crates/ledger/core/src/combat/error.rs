//! Errors raised while scheduling attacks and consuming items.

use crate::error::{ErrorSeverity, LedgerError};
use crate::state::{EntityId, ItemId, ResourceId, StateError};

/// Reasons an attack cannot be scheduled.
///
/// Every variant is raised before any state is touched: a failed schedule
/// leaves charges, inventories and queues exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleError {
    #[error("attack quantity {quantity} is outside 1..={max}")]
    InvalidQuantity { quantity: u32, max: u32 },

    #[error("entity {0} cannot attack itself")]
    SelfTarget(EntityId),

    #[error("{0} is not in the item catalog")]
    UnknownItem(ItemId),

    #[error("{0} has no attack value")]
    NotAnAttackItem(ItemId),

    /// `committed` counts consumable units already queued in unresolved rounds.
    #[error("{attacker} owns {owned} of {item} with {committed} already queued, needs {requested}")]
    InsufficientItems {
        attacker: EntityId,
        item: ItemId,
        owned: u32,
        committed: u32,
        requested: u32,
    },

    #[error("{attacker} has {available} of {requested} {resource} charges available")]
    InsufficientCharges {
        attacker: EntityId,
        resource: ResourceId,
        available: u32,
        requested: u32,
    },

    #[error("{0} has no registered definition")]
    InvalidConfig(ResourceId),

    #[error(transparent)]
    State(#[from] StateError),
}

impl LedgerError for ScheduleError {
    fn severity(&self) -> ErrorSeverity {
        use ScheduleError::*;
        match self {
            // Waiting for regeneration or acquiring items fixes these
            InsufficientCharges { .. } | InsufficientItems { .. } => ErrorSeverity::Recoverable,

            InvalidQuantity { .. }
            | SelfTarget(_)
            | UnknownItem(_)
            | NotAnAttackItem(_)
            | InvalidConfig(_) => ErrorSeverity::Validation,

            State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ScheduleError::*;
        match self {
            InvalidQuantity { .. } => "SCHEDULE_INVALID_QUANTITY",
            SelfTarget(_) => "SCHEDULE_SELF_TARGET",
            UnknownItem(_) => "SCHEDULE_UNKNOWN_ITEM",
            NotAnAttackItem(_) => "SCHEDULE_NOT_AN_ATTACK_ITEM",
            InsufficientItems { .. } => "SCHEDULE_INSUFFICIENT_ITEMS",
            InsufficientCharges { .. } => "SCHEDULE_INSUFFICIENT_CHARGES",
            InvalidConfig(_) => "SCHEDULE_INVALID_CONFIG",
            State(error) => error.error_code(),
        }
    }
}

/// Reasons a single consumption step was skipped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumptionError {
    #[error("{0} is not in the item catalog")]
    UnknownItem(ItemId),

    #[error("entity {0} has no inventory")]
    NoInventory(EntityId),
}

impl LedgerError for ConsumptionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConsumptionError::UnknownItem(_) => "CONSUMPTION_UNKNOWN_ITEM",
            ConsumptionError::NoInventory(_) => "CONSUMPTION_NO_INVENTORY",
        }
    }
}
