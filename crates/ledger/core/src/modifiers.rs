//! Inventory-derived modifiers.
//!
//! Modifiers are never stored. They are recomputed from the current inventory
//! snapshot on every query, so a sale or purchase between two reads can never
//! leave a stale bonus behind.

use crate::config::LedgerConfig;
use crate::env::ItemOracle;
use crate::state::{EntityId, Inventory, InventoryProvider, ItemId, ResourceId};

/// What a modifier adds to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    /// Permanent capacity of a resource.
    AddMax,
    /// Permanent flat value of a stat.
    AddValue,
    /// Mitigation applied to incoming attack damage.
    AddDefense,
    /// Bonus attack value.
    AddAttack,
}

impl ModifierKind {
    /// Permanent kinds may only come from non-consumable items.
    pub const fn is_permanent(self) -> bool {
        matches!(self, Self::AddMax | Self::AddValue)
    }
}

/// A modifier contributed by a possessed item, already scaled by quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub source_item: ItemId,
    pub attribute: Option<ResourceId>,
    pub amount: i64,
    pub kind: ModifierKind,
}

/// Expands an inventory snapshot into its modifiers.
///
/// Each item contributes its explicit modifiers plus one `AddAttack` for its
/// `attack_value` and one `AddDefense` for its `defense_value`, every amount
/// multiplied by the owned quantity. Consumables only contribute combat kinds.
/// Items missing from the catalog contribute nothing.
pub fn derive_modifiers(
    inventory: &Inventory,
    items: &(impl ItemOracle + ?Sized),
) -> Vec<Modifier> {
    let mut modifiers = Vec::new();
    for (item, quantity) in inventory.iter() {
        let Some(definition) = items.definition(item) else {
            continue;
        };
        let quantity = i64::from(quantity);
        let mut push = |attribute, kind: ModifierKind, per_unit: i64| {
            if definition.consumable && kind.is_permanent() {
                return;
            }
            modifiers.push(Modifier {
                source_item: item,
                attribute,
                amount: per_unit.saturating_mul(quantity),
                kind,
            });
        };

        if let Some(attack) = definition.attack_value {
            push(None, ModifierKind::AddAttack, i64::from(attack));
        }
        if let Some(defense) = definition.defense_value {
            push(None, ModifierKind::AddDefense, i64::from(defense));
        }
        for modifier in &definition.modifiers {
            push(modifier.attribute, modifier.kind, modifier.amount);
        }
    }
    modifiers
}

/// Sums the modifiers of `kind` in one inventory snapshot.
///
/// `attribute = None` matches modifiers of that kind on any attribute.
pub fn sum_inventory(
    inventory: &Inventory,
    items: &(impl ItemOracle + ?Sized),
    attribute: Option<ResourceId>,
    kind: ModifierKind,
) -> i64 {
    derive_modifiers(inventory, items)
        .into_iter()
        .filter(|modifier| modifier.kind == kind)
        .filter(|modifier| attribute.is_none() || modifier.attribute == attribute)
        .fold(0i64, |total, modifier| total.saturating_add(modifier.amount))
}

/// Sums the modifiers of `kind` contributed by `entity`'s current possessions.
///
/// Entities without an inventory contribute zero.
pub fn sum_modifiers(
    inventories: &(impl InventoryProvider + ?Sized),
    items: &(impl ItemOracle + ?Sized),
    entity: EntityId,
    attribute: Option<ResourceId>,
    kind: ModifierKind,
) -> i64 {
    inventories
        .snapshot(entity)
        .map_or(0, |inventory| sum_inventory(&inventory, items, attribute, kind))
}

/// Permanent capacity boost of `resource` for `entity`, within
/// `0..=LedgerConfig::MAX_CAPACITY`.
pub fn permanent_boost(
    inventories: &(impl InventoryProvider + ?Sized),
    items: &(impl ItemOracle + ?Sized),
    entity: EntityId,
    resource: ResourceId,
) -> u32 {
    let total = sum_modifiers(inventories, items, entity, Some(resource), ModifierKind::AddMax);
    let cap = i64::from(LedgerConfig::MAX_CAPACITY);
    u32::try_from(total.clamp(0, cap)).unwrap_or(LedgerConfig::MAX_CAPACITY)
}
