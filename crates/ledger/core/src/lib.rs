//! Deterministic resource ledger and deferred combat resolution.
//!
//! `ledger-core` defines the canonical rules for regenerating resources,
//! inventory-derived modifiers, attack scheduling and round resolution. Every
//! API here is pure: state, definitions and timestamps are passed in, results
//! come back out. Persistence, clocks and logging live in the runtime crate.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod modifiers;
pub mod resource;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use combat::{
    AttackQueue, AttackRecord, AttackRequest, AttackerContribution, CombatResult, ConsumedItem,
    ConsumptionError, ConsumptionFailure, ConsumptionReport, DefenderFailure, RoundOutcome,
    RoundScope, ScheduleError, consume_items, net_damage, resolve_round, schedule_attack,
    total_damage,
};
pub use config::{BalancePolicy, LedgerConfig};
pub use env::{ItemDefinition, ItemModifier, ItemOracle, ResourceRegistry};
pub use error::{ErrorSeverity, LedgerError};
pub use modifiers::{
    Modifier, ModifierKind, derive_modifiers, permanent_boost, sum_inventory, sum_modifiers,
};
pub use resource::{
    ChargeSlot, ChargeState, PoolState, RegenMode, ResourceCategory, ResourceDefinition,
    ResourceState, next_ready_at, regenerate, resize,
};
pub use state::{
    EntityId, EntityRecord, GuildId, GuildState, Inventory, InventoryProvider, InventoryStore,
    ItemId, ResourceId, ResourceLedger, RoundId, StateError, Timestamp,
};
