//! Per-entity item holdings.

use std::collections::BTreeMap;

use crate::state::{EntityId, ItemId};

/// Quantities owned by one entity, keyed by item.
///
/// Zero quantities are not stored, so iteration only yields possessed items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from `(item, quantity)` pairs, summing duplicates.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ItemId, u32)>) -> Self {
        let mut inventory = Self::new();
        for (item, quantity) in pairs {
            let total = inventory.quantity(item).saturating_add(quantity);
            inventory.set(item, total);
        }
        inventory
    }

    pub fn quantity(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn set(&mut self, item: ItemId, quantity: u32) {
        if quantity == 0 {
            self.items.remove(&item);
        } else {
            self.items.insert(item, quantity);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.items.iter().map(|(item, quantity)| (*item, *quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read access to inventory snapshots.
///
/// Snapshots are owned copies: callers must not expect later inventory
/// changes to show up in a snapshot they already hold.
pub trait InventoryProvider {
    /// Returns the entity's holdings, or `None` if it has no inventory at all.
    fn snapshot(&self, entity: EntityId) -> Option<Inventory>;
}

/// Write access used by consumption and inventory updates.
pub trait InventoryStore: InventoryProvider {
    fn set_quantity(&mut self, entity: EntityId, item: ItemId, quantity: u32);
}
