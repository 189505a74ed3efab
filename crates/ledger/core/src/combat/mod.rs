//! Deferred combat: scheduling attacks into round queues and resolving a
//! round into balance changes and item consumption.
//!
//! ```text
//! schedule_attack ──▶ AttackQueue[round] ──▶ resolve_round ──▶ consume_items
//!   (reserve charges)                          (per defender)     (consumables)
//! ```
//!
//! Charges are spent at schedule time and never touched again; resolution only
//! changes balances and inventories.

mod consumption;
mod damage;
mod error;
mod queue;
mod resolver;

pub use consumption::{ConsumedItem, ConsumptionFailure, ConsumptionReport, consume_items};
pub use damage::{net_damage, total_damage};
pub use error::{ConsumptionError, ScheduleError};
pub use queue::{AttackQueue, AttackRecord, AttackRequest, schedule_attack};
pub use resolver::{
    AttackerContribution, CombatResult, DefenderFailure, RoundOutcome, RoundScope, resolve_round,
};
