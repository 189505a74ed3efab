//! Round resolution: aggregate queued attacks per defender, mitigate, and
//! apply the net damage to balances.

use std::collections::BTreeMap;

use crate::config::BalancePolicy;
use crate::env::ItemOracle;
use crate::modifiers::{ModifierKind, sum_modifiers};
use crate::state::{EntityId, GuildState, ItemId, ResourceLedger, RoundId, StateError};

use super::consumption::{ConsumptionReport, consume_items};
use super::damage::{net_damage, total_damage};
use super::queue::{AttackQueue, AttackRecord};

/// Which queued records a resolution pass processes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundScope {
    /// Every record of the round; the queue is deleted afterwards.
    #[default]
    All,
    /// Only records scheduled by this attacker. Other records stay queued and
    /// the queue is deleted once it is empty.
    Attacker(EntityId),
}

impl RoundScope {
    pub fn includes(&self, record: &AttackRecord) -> bool {
        match self {
            RoundScope::All => true,
            RoundScope::Attacker(attacker) => record.attacker == *attacker,
        }
    }
}

/// One attacker's share of the damage a defender received.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackerContribution {
    pub attacker: EntityId,
    pub item: ItemId,
    pub quantity: u32,
    pub damage: u64,
}

/// Outcome for one defender. Transient: returned to the caller, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub defender: EntityId,
    pub total_attack_damage: u64,
    pub total_defense: u64,
    pub net_damage: u64,
    pub balance_before: i64,
    pub balance_after: i64,
    /// Contributing attacks in queue order.
    pub attackers: Vec<AttackerContribution>,
}

/// A defender that could not be resolved; its records were dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefenderFailure {
    pub defender: EntityId,
    pub reason: StateError,
    pub dropped_records: usize,
}

/// Everything a resolution pass produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    pub results: Vec<CombatResult>,
    pub failures: Vec<DefenderFailure>,
    pub consumption: ConsumptionReport,
}

impl RoundOutcome {
    /// True when nothing was queued for the scope, i.e. the pass was a no-op.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.failures.is_empty()
    }
}

/// Resolves the queued attacks of `round` that fall within `scope`.
///
/// Defenders are processed independently, ordered by id:
///
/// ```text
/// total_attack  = Σ record.total_damage
/// total_defense = Σ defense_value × owned   (AddDefense, any attribute)
/// net           = max(0, total_attack - total_defense)
/// balance_after = policy(balance_before - net)
/// ```
///
/// A defender without a ledger entry is reported in
/// [`RoundOutcome::failures`] and skipped; the others still resolve. Records of
/// resolved defenders go through [`consume_items`]. The processed records are
/// removed from the queue in every case, so a second pass over the same round
/// is a no-op.
///
/// `state` is a working copy: callers persist it only after this returns.
pub fn resolve_round(
    state: &mut GuildState,
    items: &(impl ItemOracle + ?Sized),
    round: RoundId,
    scope: RoundScope,
    policy: BalancePolicy,
) -> RoundOutcome {
    let Some(queue) = state.take_queue(round) else {
        return RoundOutcome::default();
    };

    let (processed, retained): (Vec<_>, Vec<_>) = queue
        .into_records()
        .into_iter()
        .partition(|record| scope.includes(record));
    if !retained.is_empty() {
        state
            .queues
            .insert(round, AttackQueue::from_records(round, retained));
    }

    let mut by_defender: BTreeMap<EntityId, Vec<AttackRecord>> = BTreeMap::new();
    for record in processed {
        by_defender.entry(record.defender).or_default().push(record);
    }

    let mut outcome = RoundOutcome::default();
    let mut resolved_records = Vec::new();
    for (defender, records) in by_defender {
        match resolve_defender(state, items, defender, &records, policy) {
            Ok(result) => {
                outcome.results.push(result);
                resolved_records.extend(records);
            }
            Err(reason) => outcome.failures.push(DefenderFailure {
                defender,
                reason,
                dropped_records: records.len(),
            }),
        }
    }

    outcome.consumption = consume_items(state, items, &resolved_records);
    outcome
}

fn resolve_defender(
    state: &mut GuildState,
    items: &(impl ItemOracle + ?Sized),
    defender: EntityId,
    records: &[AttackRecord],
    policy: BalancePolicy,
) -> Result<CombatResult, StateError> {
    let balance_before = state.balance(defender)?;

    let total_attack_damage = total_damage(records);
    let defense = sum_modifiers(&*state, items, defender, None, ModifierKind::AddDefense);
    let total_defense = u64::try_from(defense.max(0)).unwrap_or(0);
    let net = net_damage(total_attack_damage, total_defense);

    let balance_after = policy.apply(balance_before, net);
    state.set_balance(defender, balance_after)?;

    Ok(CombatResult {
        defender,
        total_attack_damage,
        total_defense,
        net_damage: net,
        balance_before,
        balance_after,
        attackers: records
            .iter()
            .map(|record| AttackerContribution {
                attacker: record.attacker,
                item: record.item,
                quantity: record.quantity,
                damage: record.total_damage,
            })
            .collect(),
    })
}
