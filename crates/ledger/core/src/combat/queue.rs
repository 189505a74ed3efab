//! Attack scheduling: validation, charge reservation and round queues.

use crate::config::LedgerConfig;
use crate::env::{ItemOracle, ResourceRegistry};
use crate::modifiers::permanent_boost;
use crate::resource::{ResourceState, regenerate};
use crate::state::{
    EntityId, GuildState, InventoryProvider, ItemId, ResourceLedger, RoundId, StateError,
    Timestamp,
};

use super::ScheduleError;

/// Caller intent for one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRequest {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub item: ItemId,
    pub quantity: u32,
    pub round: RoundId,
}

impl AttackRequest {
    pub fn new(
        attacker: EntityId,
        defender: EntityId,
        item: ItemId,
        quantity: u32,
        round: RoundId,
    ) -> Self {
        Self {
            attacker,
            defender,
            item,
            quantity,
            round,
        }
    }
}

/// A scheduled attack. Immutable once queued; owned by its round's queue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRecord {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub item: ItemId,
    pub quantity: u32,
    pub unit_attack_value: u32,
    /// `quantity * unit_attack_value`, fixed at schedule time.
    pub total_damage: u64,
    pub round: RoundId,
    pub scheduled_at: Timestamp,
}

/// Ordered attack records of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackQueue {
    round: RoundId,
    records: Vec<AttackRecord>,
}

impl AttackQueue {
    pub fn new(round: RoundId) -> Self {
        Self {
            round,
            records: Vec::new(),
        }
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn records(&self) -> &[AttackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: AttackRecord) {
        self.records.push(record);
    }

    pub(crate) fn into_records(self) -> Vec<AttackRecord> {
        self.records
    }

    pub(crate) fn from_records(round: RoundId, records: Vec<AttackRecord>) -> Self {
        Self { round, records }
    }
}

/// Validates `request`, reserves the attacker's charges and queues the attack.
///
/// This is the commit point: once it returns `Ok`, the charges are spent no
/// matter how the round later resolves. On `Err` nothing was changed.
///
/// The attacker must have at least `quantity` charges of
/// [`LedgerConfig::attack_resource`] available after regeneration and must own
/// at least `quantity` of the item. For consumables, units already queued in
/// any unresolved round do not count as owned. An attacker without stored state for the
/// attack resource starts from a full state sized by its current permanent
/// boost.
pub fn schedule_attack(
    state: &mut GuildState,
    resources: &(impl ResourceRegistry + ?Sized),
    items: &(impl ItemOracle + ?Sized),
    config: &LedgerConfig,
    request: &AttackRequest,
    now: Timestamp,
) -> Result<AttackRecord, ScheduleError> {
    let AttackRequest {
        attacker,
        defender,
        item,
        quantity,
        round,
    } = *request;

    if quantity == 0 || quantity > LedgerConfig::MAX_QUANTITY_PER_ATTACK {
        return Err(ScheduleError::InvalidQuantity {
            quantity,
            max: LedgerConfig::MAX_QUANTITY_PER_ATTACK,
        });
    }
    if attacker == defender {
        return Err(ScheduleError::SelfTarget(attacker));
    }

    let item_definition = items
        .definition(item)
        .ok_or(ScheduleError::UnknownItem(item))?;
    let unit_attack_value = item_definition
        .attack_value
        .ok_or(ScheduleError::NotAnAttackItem(item))?;

    let owned = state
        .snapshot(attacker)
        .map_or(0, |inventory| inventory.quantity(item));
    // Consumables leave the inventory only at resolution, so units already
    // queued are spoken for.
    let committed = if item_definition.consumable {
        state.queued_quantity(attacker, item)
    } else {
        0
    };
    if owned.saturating_sub(committed) < quantity {
        return Err(ScheduleError::InsufficientItems {
            attacker,
            item,
            owned,
            committed,
            requested: quantity,
        });
    }

    let resource = config.attack_resource;
    let definition = resources
        .definition(resource)
        .ok_or(ScheduleError::InvalidConfig(resource))?;

    let stored = match state.get(attacker, resource) {
        Ok(stored) => stored,
        Err(StateError::ResourceNotTracked { .. }) => {
            let bonus = permanent_boost(&*state, items, attacker, resource);
            ResourceState::for_definition(&definition, bonus)
        }
        Err(error) => return Err(error.into()),
    };

    let mut fresh = regenerate(&stored, now, &definition);
    fresh
        .reserve(quantity, now)
        .map_err(|available| ScheduleError::InsufficientCharges {
            attacker,
            resource,
            available,
            requested: quantity,
        })?;

    state.set(attacker, resource, fresh)?;

    let record = AttackRecord {
        attacker,
        defender,
        item,
        quantity,
        unit_attack_value,
        total_damage: u64::from(quantity) * u64::from(unit_attack_value),
        round,
        scheduled_at: now,
    };
    state.queue_mut(round).push(record.clone());

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ChargeSlot, ChargeState, ResourceDefinition};
    use crate::testing::*;

    fn request(quantity: u32) -> AttackRequest {
        AttackRequest::new(ALICE, BOB, SWORD, quantity, RoundId(1))
    }

    #[test]
    fn schedules_and_reserves_charges() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[ALICE, BOB], 100);
        give(&mut state, ALICE, SWORD, 2);

        let record = schedule_attack(
            &mut state,
            &fixtures,
            &fixtures,
            &LedgerConfig::default(),
            &request(2),
            Timestamp(10),
        )
        .unwrap();

        assert_eq!(record.total_damage, 100);
        assert_eq!(record.unit_attack_value, 50);
        assert_eq!(state.get(ALICE, ATTACKS).unwrap().available(), 1);
        assert_eq!(state.queue(RoundId(1)).unwrap().records(), &[record]);
    }

    #[test]
    fn insufficient_charges_leave_state_untouched() {
        let mut fixtures = Fixtures::new();
        fixtures.add_resource(ResourceDefinition::per_charge(ATTACKS, "attacks", 2, HOUR));
        let mut state = guild(&[ALICE, BOB], 100);
        give(&mut state, ALICE, SWORD, 5);
        state
            .set(
                ALICE,
                ATTACKS,
                ResourceState::Charges(ChargeState {
                    max: 2,
                    bonus: 0,
                    slots: vec![ChargeSlot::AVAILABLE, ChargeSlot::used_at(Timestamp(5))],
                }),
            )
            .unwrap();
        let before = state.clone();

        let result = schedule_attack(
            &mut state,
            &fixtures,
            &fixtures,
            &LedgerConfig::default(),
            &request(2),
            Timestamp(10),
        );

        assert_eq!(
            result,
            Err(ScheduleError::InsufficientCharges {
                attacker: ALICE,
                resource: ATTACKS,
                available: 1,
                requested: 2,
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn rejects_invalid_requests_before_touching_state() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[ALICE, BOB], 100);
        give(&mut state, ALICE, SWORD, 1);
        give(&mut state, ALICE, SHIELD, 1);
        let before = state.clone();
        let config = LedgerConfig::default();
        let now = Timestamp(0);
        let attack = |attacker, defender, item| {
            AttackRequest::new(attacker, defender, item, 1, RoundId(1))
        };

        let cases = [
            (request(0), "SCHEDULE_INVALID_QUANTITY"),
            (attack(ALICE, ALICE, SWORD), "SCHEDULE_SELF_TARGET"),
            (attack(ALICE, BOB, ItemId(77)), "SCHEDULE_UNKNOWN_ITEM"),
            (attack(ALICE, BOB, SHIELD), "SCHEDULE_NOT_AN_ATTACK_ITEM"),
            (request(2), "SCHEDULE_INSUFFICIENT_ITEMS"),
        ];
        for (request, code) in cases {
            let error = schedule_attack(&mut state, &fixtures, &fixtures, &config, &request, now)
                .unwrap_err();
            assert_eq!(crate::LedgerError::error_code(&error), code);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn unknown_attack_resource_is_a_config_error() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[ALICE, BOB], 100);
        give(&mut state, ALICE, SWORD, 1);
        let config = LedgerConfig::default().with_attack_resource(crate::ResourceId(9));

        let result = schedule_attack(
            &mut state,
            &fixtures,
            &fixtures,
            &config,
            &request(1),
            Timestamp(0),
        );
        assert_eq!(result, Err(ScheduleError::InvalidConfig(crate::ResourceId(9))));
    }

    #[test]
    fn uninitialized_attacker_is_not_found() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[BOB], 100);
        give(&mut state, ALICE, SWORD, 1);

        let result = schedule_attack(
            &mut state,
            &fixtures,
            &fixtures,
            &LedgerConfig::default(),
            &request(1),
            Timestamp(0),
        );
        assert_eq!(result, Err(ScheduleError::State(StateError::EntityNotFound(ALICE))));
    }

    #[test]
    fn spent_charges_return_after_interval() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[ALICE, BOB], 100);
        give(&mut state, ALICE, SWORD, 3);
        let config = LedgerConfig::default();
        let mut schedule_at = |quantity, now| {
            schedule_attack(
                &mut state,
                &fixtures,
                &fixtures,
                &config,
                &request(quantity),
                Timestamp(now),
            )
        };

        schedule_at(3, 0).unwrap();
        assert!(schedule_at(1, HOUR - 1).is_err());
        schedule_at(3, HOUR).unwrap();
        assert_eq!(state.queue(RoundId(1)).unwrap().len(), 2);
    }

    #[test]
    fn queued_consumables_are_not_available_again() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[ALICE, BOB, CAROL], 100);
        give(&mut state, ALICE, BOMB, 1);
        let config = LedgerConfig::default();
        let bomb = |defender, round| AttackRequest::new(ALICE, defender, BOMB, 1, RoundId(round));

        schedule_attack(&mut state, &fixtures, &fixtures, &config, &bomb(BOB, 1), Timestamp(0))
            .unwrap();
        let before = state.clone();

        for request in [bomb(BOB, 1), bomb(CAROL, 2)] {
            let result =
                schedule_attack(&mut state, &fixtures, &fixtures, &config, &request, Timestamp(0));
            assert_eq!(
                result,
                Err(ScheduleError::InsufficientItems {
                    attacker: ALICE,
                    item: BOMB,
                    owned: 1,
                    committed: 1,
                    requested: 1,
                })
            );
        }
        assert_eq!(state, before);
        assert_eq!(state.queued_quantity(ALICE, BOMB), 1);
    }

    #[test]
    fn reusable_items_may_back_several_attacks() {
        let fixtures = Fixtures::new();
        let mut state = guild(&[ALICE, BOB], 100);
        give(&mut state, ALICE, SWORD, 1);
        let config = LedgerConfig::default();

        for now in [0, 1] {
            schedule_attack(&mut state, &fixtures, &fixtures, &config, &request(1), Timestamp(now))
                .unwrap();
        }
        assert_eq!(state.queue(RoundId(1)).unwrap().len(), 2);
    }
}
