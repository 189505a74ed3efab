//! Regenerating resources: definitions, stored state and the lazy
//! regeneration rules applied on every read.
//!
//! Nothing in this module runs on a timer. A stored [`ResourceState`] is only
//! meaningful together with the current time: [`regenerate`] turns
//! `(stored state, now, definition)` into the fresh view, and callers invoke it
//! before every read and every mutation.

mod regen;
mod state;

pub use regen::{next_ready_at, regenerate, resize};
pub use state::{ChargeSlot, ChargeState, PoolState, ResourceState};

use crate::state::ResourceId;

/// Whether a resource is spendable capacity or a passive stat.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceCategory {
    /// Spent by actions (attack uses, stamina, mana).
    #[default]
    Resource,
    /// Tracked value that is not spent by scheduling (HP-like stats).
    Stat,
}

/// How a resource comes back after use.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RegenMode {
    /// One timer for the whole pool: any use restarts it, and once it elapses
    /// the pool refills completely.
    FullReset,
    /// Each charge carries its own timer and regenerates independently.
    #[default]
    PerCharge,
}

/// Immutable configuration of a resource, looked up by id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceDefinition {
    pub id: ResourceId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: ResourceCategory,
    /// Capacity before permanent modifiers.
    pub default_max: u32,
    /// Elapsed time after which a used charge (or the whole pool) is available again.
    pub regen_interval_ms: u64,
    pub regen_mode: RegenMode,
}

impl ResourceDefinition {
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        default_max: u32,
        regen_interval_ms: u64,
        regen_mode: RegenMode,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: ResourceCategory::Resource,
            default_max,
            regen_interval_ms,
            regen_mode,
        }
    }

    pub fn per_charge(
        id: ResourceId,
        name: impl Into<String>,
        default_max: u32,
        regen_interval_ms: u64,
    ) -> Self {
        Self::new(id, name, default_max, regen_interval_ms, RegenMode::PerCharge)
    }

    pub fn full_reset(
        id: ResourceId,
        name: impl Into<String>,
        default_max: u32,
        regen_interval_ms: u64,
    ) -> Self {
        Self::new(id, name, default_max, regen_interval_ms, RegenMode::FullReset)
    }

    pub fn with_category(mut self, category: ResourceCategory) -> Self {
        self.category = category;
        self
    }
}
