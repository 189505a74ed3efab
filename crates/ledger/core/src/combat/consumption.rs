//! Depletes consumable items spent in resolved attacks.

use crate::env::ItemOracle;
use crate::state::{EntityId, InventoryStore, ItemId};

use super::{AttackRecord, ConsumptionError};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumedItem {
    pub attacker: EntityId,
    pub item: ItemId,
    pub before: u32,
    pub after: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumptionFailure {
    pub attacker: EntityId,
    pub item: ItemId,
    pub reason: ConsumptionError,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumptionReport {
    pub consumed: Vec<ConsumedItem>,
    pub failures: Vec<ConsumptionFailure>,
}

/// For every record whose item is consumable, lowers the attacker's quantity
/// by `record.quantity`, floored at zero. Non-consumables are never touched.
///
/// Best effort: a record that cannot be processed is reported and the
/// remaining records still go through.
pub fn consume_items(
    store: &mut (impl InventoryStore + ?Sized),
    items: &(impl ItemOracle + ?Sized),
    records: &[AttackRecord],
) -> ConsumptionReport {
    let mut report = ConsumptionReport::default();
    for record in records {
        let failure = |reason| ConsumptionFailure {
            attacker: record.attacker,
            item: record.item,
            reason,
        };

        let Some(definition) = items.definition(record.item) else {
            report
                .failures
                .push(failure(ConsumptionError::UnknownItem(record.item)));
            continue;
        };
        if !definition.consumable {
            continue;
        }
        let Some(inventory) = store.snapshot(record.attacker) else {
            report
                .failures
                .push(failure(ConsumptionError::NoInventory(record.attacker)));
            continue;
        };

        let before = inventory.quantity(record.item);
        let after = before.saturating_sub(record.quantity);
        store.set_quantity(record.attacker, record.item, after);
        report.consumed.push(ConsumedItem {
            attacker: record.attacker,
            item: record.item,
            before,
            after,
        });
    }
    report
}
