//! Damage aggregation and mitigation.

use super::AttackRecord;

/// Sum of `total_damage` over `records`.
pub fn total_damage<'a>(records: impl IntoIterator<Item = &'a AttackRecord>) -> u64 {
    records
        .into_iter()
        .fold(0u64, |total, record| total.saturating_add(record.total_damage))
}

/// Damage left after mitigation, never negative.
///
/// # Formula
///
/// ```text
/// net = max(0, total_attack - total_defense)
/// ```
pub fn net_damage(total_attack: u64, total_defense: u64) -> u64 {
    total_attack.saturating_sub(total_defense)
}
