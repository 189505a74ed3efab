//! Stored resource state in its two regeneration representations.

use super::{RegenMode, ResourceDefinition};
use crate::config::LedgerConfig;
use crate::state::Timestamp;

/// `max + bonus`, capped at [`LedgerConfig::MAX_CAPACITY`].
const fn bounded_capacity(max: u32, bonus: u32) -> u32 {
    let capacity = max.saturating_add(bonus);
    if capacity > LedgerConfig::MAX_CAPACITY {
        LedgerConfig::MAX_CAPACITY
    } else {
        capacity
    }
}

/// One independently regenerating unit of a per-charge resource.
///
/// `None` means available. A stamp older than the regeneration interval is
/// logically available too, until the next [`regenerate`](super::regenerate)
/// rewrites it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeSlot {
    pub last_used_at: Option<Timestamp>,
}

impl ChargeSlot {
    pub const AVAILABLE: Self = Self { last_used_at: None };

    pub const fn used_at(at: Timestamp) -> Self {
        Self {
            last_used_at: Some(at),
        }
    }

    pub const fn is_available(&self) -> bool {
        self.last_used_at.is_none()
    }
}

/// Full-reset pool: a single counter and a single timer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolState {
    pub max: u32,
    /// Permanent boost last applied from inventory.
    pub bonus: u32,
    pub current: u32,
    pub last_use: Option<Timestamp>,
    pub last_regeneration: Option<Timestamp>,
}

impl PoolState {
    pub const fn capacity(&self) -> u32 {
        bounded_capacity(self.max, self.bonus)
    }
}

/// Per-charge state: one slot per unit of capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeState {
    pub max: u32,
    /// Permanent boost last applied from inventory.
    pub bonus: u32,
    pub slots: Vec<ChargeSlot>,
}

impl ChargeState {
    pub const fn capacity(&self) -> u32 {
        bounded_capacity(self.max, self.bonus)
    }

    /// Derived, never stored: number of slots with no pending timer.
    pub fn available(&self) -> u32 {
        self.slots.iter().filter(|slot| slot.is_available()).count() as u32
    }
}

/// Stored state of one resource for one entity.
///
/// The variant mirrors the definition's [`RegenMode`]; [`ResourceState::conform`]
/// converts a state stored under one mode into the other when the registry
/// changes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceState {
    Pool(PoolState),
    Charges(ChargeState),
}

impl ResourceState {
    /// Full, unused state for `definition` with `bonus` permanent capacity.
    pub fn for_definition(definition: &ResourceDefinition, bonus: u32) -> Self {
        let max = definition.default_max;
        let capacity = bounded_capacity(max, bonus);
        match definition.regen_mode {
            RegenMode::FullReset => Self::Pool(PoolState {
                max,
                bonus,
                current: capacity,
                last_use: None,
                last_regeneration: None,
            }),
            RegenMode::PerCharge => Self::Charges(ChargeState {
                max,
                bonus,
                slots: vec![ChargeSlot::AVAILABLE; capacity as usize],
            }),
        }
    }

    pub const fn mode(&self) -> RegenMode {
        match self {
            Self::Pool(_) => RegenMode::FullReset,
            Self::Charges(_) => RegenMode::PerCharge,
        }
    }

    pub const fn max(&self) -> u32 {
        match self {
            Self::Pool(pool) => pool.max,
            Self::Charges(charges) => charges.max,
        }
    }

    pub const fn bonus(&self) -> u32 {
        match self {
            Self::Pool(pool) => pool.bonus,
            Self::Charges(charges) => charges.bonus,
        }
    }

    pub const fn capacity(&self) -> u32 {
        bounded_capacity(self.max(), self.bonus())
    }

    /// Units usable right now, as stored. Call after regeneration.
    pub fn available(&self) -> u32 {
        match self {
            Self::Pool(pool) => pool.current.min(pool.capacity()),
            Self::Charges(charges) => charges.available(),
        }
    }

    /// Pool view of this state.
    ///
    /// Charges collapse into a counter of available slots; the most recent
    /// slot stamp becomes the pool's single timer.
    pub fn to_pool(&self) -> PoolState {
        match self {
            Self::Pool(pool) => pool.clone(),
            Self::Charges(charges) => PoolState {
                max: charges.max,
                bonus: charges.bonus,
                current: charges.available(),
                last_use: charges
                    .slots
                    .iter()
                    .filter_map(|slot| slot.last_used_at)
                    .max(),
                last_regeneration: None,
            },
        }
    }

    /// Charge view of this state.
    ///
    /// Available pool units become free slots; the missing units become slots
    /// stamped with the pool's last use, so they return together when the
    /// pool's timer would have fired.
    pub fn to_charges(&self) -> ChargeState {
        match self {
            Self::Charges(charges) => charges.clone(),
            Self::Pool(pool) => {
                let capacity = pool.capacity();
                let current = pool.current.min(capacity);
                let stamp = pool.last_use.unwrap_or(Timestamp::ZERO);
                let mut slots = vec![ChargeSlot::AVAILABLE; current as usize];
                slots.resize(capacity as usize, ChargeSlot::used_at(stamp));
                ChargeState {
                    max: pool.max,
                    bonus: pool.bonus,
                    slots,
                }
            }
        }
    }

    /// Brings a stored state in line with its definition: converts between
    /// modes if the definition's mode differs and adopts the definition's
    /// base capacity.
    pub fn conform(&self, definition: &ResourceDefinition) -> Self {
        let converted = match (definition.regen_mode, self) {
            (RegenMode::FullReset, Self::Charges(_)) => Self::Pool(self.to_pool()),
            (RegenMode::PerCharge, Self::Pool(_)) => Self::Charges(self.to_charges()),
            _ => self.clone(),
        };
        if converted.max() == definition.default_max {
            return converted;
        }
        let bonus = converted.bonus();
        let rebased = match converted {
            Self::Pool(mut pool) => {
                pool.max = definition.default_max;
                Self::Pool(pool)
            }
            Self::Charges(mut charges) => {
                charges.max = definition.default_max;
                Self::Charges(charges)
            }
        };
        super::resize(&rebased, bonus)
    }

    /// Spends `quantity` units at `now`.
    ///
    /// All-or-nothing: if fewer than `quantity` units are available the state
    /// is left untouched and the available count is returned as the error.
    /// Per-charge reservations stamp only the slots they take; every other
    /// slot keeps its own timer.
    pub fn reserve(&mut self, quantity: u32, now: Timestamp) -> Result<(), u32> {
        let available = self.available();
        if available < quantity {
            return Err(available);
        }
        match self {
            Self::Pool(pool) => {
                pool.current = pool.current.min(pool.capacity()) - quantity;
                pool.last_use = Some(now);
            }
            Self::Charges(charges) => {
                charges
                    .slots
                    .iter_mut()
                    .filter(|slot| slot.is_available())
                    .take(quantity as usize)
                    .for_each(|slot| *slot = ChargeSlot::used_at(now));
            }
        }
        Ok(())
    }
}
