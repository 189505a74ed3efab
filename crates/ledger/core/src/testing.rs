//! Fixtures shared by unit tests.

use std::collections::BTreeMap;

use crate::env::{ItemDefinition, ItemOracle, ResourceRegistry};
use crate::resource::ResourceDefinition;
use crate::state::{EntityId, GuildState, InventoryStore, ItemId, ResourceId};

pub const HOUR: u64 = 60 * 60 * 1000;

pub const ATTACKS: ResourceId = ResourceId(0);
pub const SWORD: ItemId = ItemId(1);
pub const SHIELD: ItemId = ItemId(2);
pub const BOMB: ItemId = ItemId(3);

pub const ALICE: EntityId = EntityId(1);
pub const BOB: EntityId = EntityId(2);
pub const CAROL: EntityId = EntityId(3);

#[derive(Default)]
pub struct Fixtures {
    pub resources: BTreeMap<ResourceId, ResourceDefinition>,
    pub items: BTreeMap<ItemId, ItemDefinition>,
}

impl Fixtures {
    pub fn new() -> Self {
        let mut fixtures = Self::default();
        fixtures.add_resource(ResourceDefinition::per_charge(ATTACKS, "attacks", 3, HOUR));
        fixtures.add_item(ItemDefinition::new(SWORD, "sword").with_attack(50));
        fixtures.add_item(ItemDefinition::new(SHIELD, "shield").with_defense(30));
        fixtures.add_item(ItemDefinition::new(BOMB, "bomb").as_consumable().with_attack(120));
        fixtures
    }

    pub fn add_resource(&mut self, definition: ResourceDefinition) {
        self.resources.insert(definition.id, definition);
    }

    pub fn add_item(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.id, definition);
    }
}

impl ResourceRegistry for Fixtures {
    fn definition(&self, resource: ResourceId) -> Option<ResourceDefinition> {
        self.resources.get(&resource).cloned()
    }

    fn all_definitions(&self) -> Vec<ResourceDefinition> {
        self.resources.values().cloned().collect()
    }
}

impl ItemOracle for Fixtures {
    fn definition(&self, item: ItemId) -> Option<ItemDefinition> {
        self.items.get(&item).cloned()
    }
}

/// Guild with the given entities initialized at `balance` and no resource state.
pub fn guild(entities: &[EntityId], balance: i64) -> GuildState {
    let mut state = GuildState::new();
    for entity in entities {
        state.initialize_entity(*entity, balance, []);
    }
    state
}

pub fn give(state: &mut GuildState, entity: EntityId, item: ItemId, quantity: u32) {
    state.set_quantity(entity, item, quantity);
}
