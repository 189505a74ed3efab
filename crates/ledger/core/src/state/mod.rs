//! Canonical guild state and the ledger contract over it.
//!
//! A [`GuildState`] is the unit the storage collaborator loads and saves: every
//! entity's balance and resource states, every inventory, and every pending
//! attack queue of one guild. Operations mutate a working copy and the caller
//! persists it afterwards, so a failed save commits nothing.

mod error;
mod inventory;
mod types;

use std::collections::BTreeMap;

use crate::combat::AttackQueue;
use crate::resource::ResourceState;

pub use error::StateError;
pub use inventory::{Inventory, InventoryProvider, InventoryStore};
pub use types::{EntityId, GuildId, ItemId, ResourceId, RoundId, Timestamp};

/// Canonical per-entity, per-resource state store.
///
/// No validation beyond shape: numeric invariants are enforced by the callers
/// (regeneration, scheduling, resolution).
pub trait ResourceLedger {
    fn get(&self, entity: EntityId, resource: ResourceId) -> Result<ResourceState, StateError>;

    fn set(
        &mut self,
        entity: EntityId,
        resource: ResourceId,
        state: ResourceState,
    ) -> Result<(), StateError>;

    /// Economic currency pool, separate from resource charges.
    fn balance(&self, entity: EntityId) -> Result<i64, StateError>;

    fn set_balance(&mut self, entity: EntityId, balance: i64) -> Result<(), StateError>;
}

/// Ledger entry of a single entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRecord {
    pub balance: i64,
    pub resources: BTreeMap<ResourceId, ResourceState>,
}

impl EntityRecord {
    pub fn new(balance: i64) -> Self {
        Self {
            balance,
            resources: BTreeMap::new(),
        }
    }
}

/// All mutable data of one guild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuildState {
    pub entities: BTreeMap<EntityId, EntityRecord>,
    pub inventories: BTreeMap<EntityId, Inventory>,
    pub queues: BTreeMap<RoundId, AttackQueue>,
}

impl GuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Creates the entity's ledger entry if it does not exist yet.
    ///
    /// Returns `true` when a new entry was created. Existing entries are never
    /// overwritten, so repeated initialization is harmless.
    pub fn initialize_entity(
        &mut self,
        entity: EntityId,
        balance: i64,
        resources: impl IntoIterator<Item = (ResourceId, ResourceState)>,
    ) -> bool {
        if self.entities.contains_key(&entity) {
            return false;
        }
        let mut record = EntityRecord::new(balance);
        record.resources.extend(resources);
        self.entities.insert(entity, record);
        true
    }

    pub fn inventory(&self, entity: EntityId) -> Option<&Inventory> {
        self.inventories.get(&entity)
    }

    pub fn queue(&self, round: RoundId) -> Option<&AttackQueue> {
        self.queues.get(&round)
    }

    /// Returns the queue for `round`, creating an empty one on first use.
    pub fn queue_mut(&mut self, round: RoundId) -> &mut AttackQueue {
        self.queues
            .entry(round)
            .or_insert_with(|| AttackQueue::new(round))
    }

    /// Removes and returns the queue for `round`.
    pub fn take_queue(&mut self, round: RoundId) -> Option<AttackQueue> {
        self.queues.remove(&round)
    }

    /// Units of `item` that `attacker` has queued across all unresolved rounds.
    pub fn queued_quantity(&self, attacker: EntityId, item: ItemId) -> u32 {
        self.queues
            .values()
            .flat_map(|queue| queue.records())
            .filter(|record| record.attacker == attacker && record.item == item)
            .fold(0u32, |total, record| total.saturating_add(record.quantity))
    }

    fn record(&self, entity: EntityId) -> Result<&EntityRecord, StateError> {
        self.entities
            .get(&entity)
            .ok_or(StateError::EntityNotFound(entity))
    }

    fn record_mut(&mut self, entity: EntityId) -> Result<&mut EntityRecord, StateError> {
        self.entities
            .get_mut(&entity)
            .ok_or(StateError::EntityNotFound(entity))
    }
}

impl ResourceLedger for GuildState {
    fn get(&self, entity: EntityId, resource: ResourceId) -> Result<ResourceState, StateError> {
        self.record(entity)?
            .resources
            .get(&resource)
            .cloned()
            .ok_or(StateError::ResourceNotTracked { entity, resource })
    }

    fn set(
        &mut self,
        entity: EntityId,
        resource: ResourceId,
        state: ResourceState,
    ) -> Result<(), StateError> {
        self.record_mut(entity)?.resources.insert(resource, state);
        Ok(())
    }

    fn balance(&self, entity: EntityId) -> Result<i64, StateError> {
        Ok(self.record(entity)?.balance)
    }

    fn set_balance(&mut self, entity: EntityId, balance: i64) -> Result<(), StateError> {
        self.record_mut(entity)?.balance = balance;
        Ok(())
    }
}

impl InventoryProvider for GuildState {
    fn snapshot(&self, entity: EntityId) -> Option<Inventory> {
        self.inventories.get(&entity).cloned()
    }
}

impl InventoryStore for GuildState {
    fn set_quantity(&mut self, entity: EntityId, item: ItemId, quantity: u32) {
        let inventory = self.inventories.entry(entity).or_default();
        inventory.set(item, quantity);
        if inventory.is_empty() {
            self.inventories.remove(&entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_entity_is_not_found() {
        let state = GuildState::new();
        assert_eq!(
            state.balance(EntityId(7)),
            Err(StateError::EntityNotFound(EntityId(7)))
        );
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut state = GuildState::new();
        assert!(state.initialize_entity(EntityId(1), 500, []));
        state.set_balance(EntityId(1), 320).unwrap();

        assert!(!state.initialize_entity(EntityId(1), 500, []));
        assert_eq!(state.balance(EntityId(1)), Ok(320));
    }

    #[test]
    fn missing_resource_is_reported_separately() {
        let mut state = GuildState::new();
        state.initialize_entity(EntityId(1), 0, []);

        let result = state.get(EntityId(1), ResourceId(3));
        assert!(matches!(
            result,
            Err(StateError::ResourceNotTracked { resource: ResourceId(3), .. })
        ));
    }

    #[test]
    fn zero_quantity_removes_inventory_entry() {
        let mut state = GuildState::new();
        state.set_quantity(EntityId(1), ItemId(4), 2);
        assert_eq!(state.snapshot(EntityId(1)).unwrap().quantity(ItemId(4)), 2);

        state.set_quantity(EntityId(1), ItemId(4), 0);
        assert!(state.snapshot(EntityId(1)).is_none());
    }
}
