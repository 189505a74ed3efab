//! Timer-free regeneration.
//!
//! [`regenerate`] is a pure function of `(stored state, now, definition)`.
//! There is no scheduler: every read and every mutation passes the stored
//! state through it first, so state is never stale for longer than one read.

use super::{ChargeSlot, ChargeState, PoolState, ResourceDefinition, ResourceState};
use crate::state::Timestamp;

/// Computes the fresh view of `state` at `now`.
///
/// - **FullReset**: if the interval has elapsed since the last use and the pool
///   is below capacity, it refills to `max + bonus` and records `now` as the
///   regeneration time. A pool that was never used refills immediately.
/// - **PerCharge**: every slot whose own stamp is at least one interval old is
///   cleared. Slots never influence each other.
///
/// The state is first conformed to the definition, so a registry that switched
/// modes is honoured on the next read.
pub fn regenerate(
    state: &ResourceState,
    now: Timestamp,
    definition: &ResourceDefinition,
) -> ResourceState {
    let interval = definition.regen_interval_ms;
    match state.conform(definition) {
        ResourceState::Pool(mut pool) => {
            let capacity = pool.capacity();
            let elapsed = pool
                .last_use
                .is_none_or(|used| now.elapsed_since(used) >= interval);
            if elapsed && pool.current < capacity {
                pool.current = capacity;
                pool.last_regeneration = Some(now);
            }
            ResourceState::Pool(pool)
        }
        ResourceState::Charges(mut charges) => {
            for slot in &mut charges.slots {
                if let Some(used) = slot.last_used_at
                    && now.elapsed_since(used) >= interval
                {
                    *slot = ChargeSlot::AVAILABLE;
                }
            }
            ResourceState::Charges(charges)
        }
    }
}

/// Applies a new permanent boost to `state`.
///
/// Per-charge states grow by appending available slots. When they shrink,
/// available slots are dropped first, then the slots whose cooldown started
/// earliest; the remaining slots keep their timers. Pools clamp `current` to
/// the new capacity and otherwise wait for regeneration to fill the headroom.
pub fn resize(state: &ResourceState, bonus: u32) -> ResourceState {
    match state {
        ResourceState::Pool(pool) => {
            let mut pool = PoolState {
                bonus,
                ..pool.clone()
            };
            pool.current = pool.current.min(pool.capacity());
            ResourceState::Pool(pool)
        }
        ResourceState::Charges(charges) => {
            let mut charges = ChargeState {
                bonus,
                ..charges.clone()
            };
            let target = charges.capacity() as usize;
            if charges.slots.len() < target {
                charges.slots.resize(target, ChargeSlot::AVAILABLE);
            } else {
                while charges.slots.len() > target {
                    let victim = charges
                        .slots
                        .iter()
                        .rposition(ChargeSlot::is_available)
                        .or_else(|| {
                            charges
                                .slots
                                .iter()
                                .enumerate()
                                .min_by_key(|(_, slot)| slot.last_used_at)
                                .map(|(index, _)| index)
                        });
                    match victim {
                        Some(index) => {
                            charges.slots.remove(index);
                        }
                        None => break,
                    }
                }
            }
            ResourceState::Charges(charges)
        }
    }
}

/// When the next unit becomes available, if anything is pending.
///
/// For pools this is the moment the whole pool refills. Pass a regenerated
/// state; a stale one may report a time already in the past.
pub fn next_ready_at(state: &ResourceState, definition: &ResourceDefinition) -> Option<Timestamp> {
    let interval = definition.regen_interval_ms;
    match state {
        ResourceState::Pool(pool) => {
            if pool.current >= pool.capacity() {
                return None;
            }
            Some(pool.last_use.map_or(Timestamp::ZERO, |used| used + interval))
        }
        ResourceState::Charges(charges) => charges
            .slots
            .iter()
            .filter_map(|slot| slot.last_used_at)
            .min()
            .map(|used| used + interval),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResourceId;

    const HOUR: u64 = 60 * 60 * 1000;
    const HALF_DAY: u64 = 12 * HOUR;

    fn charges(max: u32, bonus: u32, slots: Vec<ChargeSlot>) -> ResourceState {
        ResourceState::Charges(ChargeState { max, bonus, slots })
    }

    fn slots_of(state: &ResourceState) -> &[ChargeSlot] {
        match state {
            ResourceState::Charges(charges) => &charges.slots,
            ResourceState::Pool(_) => panic!("expected per-charge state"),
        }
    }

    #[test]
    fn boosted_charges_all_return_after_one_interval() {
        let definition = ResourceDefinition::per_charge(ResourceId(0), "attacks", 1, HALF_DAY);
        let t = Timestamp(1_000);
        let mut state = ResourceState::for_definition(&definition, 3);
        state.reserve(4, t).unwrap();
        assert_eq!(state.available(), 0);

        let fresh = regenerate(&state, t + HALF_DAY, &definition);
        assert_eq!(fresh.capacity(), 4);
        assert_eq!(fresh.available(), 4);
    }

    #[test]
    fn full_reset_waits_for_the_whole_interval() {
        let definition = ResourceDefinition::full_reset(ResourceId(1), "stamina", 5, HOUR);
        let t = Timestamp(50_000);
        let state = ResourceState::Pool(PoolState {
            max: 5,
            bonus: 2,
            current: 0,
            last_use: Some(t),
            last_regeneration: None,
        });

        let early = regenerate(&state, t + (HOUR - 1), &definition);
        assert_eq!(early.available(), 0);

        let on_time = regenerate(&state, t + HOUR, &definition);
        assert_eq!(on_time.available(), 7);
        match on_time {
            ResourceState::Pool(pool) => assert_eq!(pool.last_regeneration, Some(t + HOUR)),
            ResourceState::Charges(_) => panic!("mode changed"),
        }
    }

    #[test]
    fn full_reset_timer_restarts_on_any_use() {
        let definition = ResourceDefinition::full_reset(ResourceId(1), "stamina", 5, HOUR);
        let mut state = ResourceState::for_definition(&definition, 0);
        state.reserve(1, Timestamp(0)).unwrap();
        state.reserve(1, Timestamp(HOUR / 2)).unwrap();

        let fresh = regenerate(&state, Timestamp(HOUR), &definition);
        assert_eq!(fresh.available(), 3);
        let fresh = regenerate(&state, Timestamp(HOUR / 2 + HOUR), &definition);
        assert_eq!(fresh.available(), 5);
    }

    #[test]
    fn charges_regenerate_independently() {
        let definition = ResourceDefinition::per_charge(ResourceId(0), "attacks", 3, HOUR);
        let state = charges(
            3,
            0,
            vec![
                ChargeSlot::used_at(Timestamp(0)),
                ChargeSlot::used_at(Timestamp(HOUR / 2)),
                ChargeSlot::AVAILABLE,
            ],
        );

        let fresh = regenerate(&state, Timestamp(HOUR), &definition);
        let slots = slots_of(&fresh);
        assert_eq!(slots[0], ChargeSlot::AVAILABLE);
        assert_eq!(slots[1], ChargeSlot::used_at(Timestamp(HOUR / 2)));
        assert_eq!(fresh.available(), 2);
    }

    #[test]
    fn regenerate_does_not_mutate_input() {
        let definition = ResourceDefinition::per_charge(ResourceId(0), "attacks", 1, HOUR);
        let state = charges(1, 0, vec![ChargeSlot::used_at(Timestamp(0))]);
        let _ = regenerate(&state, Timestamp(HOUR * 2), &definition);
        assert_eq!(slots_of(&state)[0], ChargeSlot::used_at(Timestamp(0)));
    }

    #[test]
    fn growing_appends_available_slots() {
        let state = charges(1, 0, vec![ChargeSlot::used_at(Timestamp(5))]);
        let grown = resize(&state, 2);
        assert_eq!(grown.capacity(), 3);
        assert_eq!(grown.available(), 2);
        assert_eq!(slots_of(&grown)[0], ChargeSlot::used_at(Timestamp(5)));
    }

    #[test]
    fn growth_stops_at_the_capacity_cap() {
        let state = charges(1, 0, vec![ChargeSlot::used_at(Timestamp(5))]);
        let grown = resize(&state, u32::MAX - 1);
        assert_eq!(grown.capacity(), crate::LedgerConfig::MAX_CAPACITY);
        assert_eq!(slots_of(&grown).len(), crate::LedgerConfig::MAX_CAPACITY as usize);
        assert_eq!(slots_of(&grown)[0], ChargeSlot::used_at(Timestamp(5)));
    }

    #[test]
    fn shrinking_drops_available_then_oldest_cooldowns() {
        let state = charges(
            1,
            3,
            vec![
                ChargeSlot::used_at(Timestamp(30)),
                ChargeSlot::AVAILABLE,
                ChargeSlot::used_at(Timestamp(10)),
                ChargeSlot::used_at(Timestamp(20)),
            ],
        );

        let shrunk = resize(&state, 1);
        assert_eq!(
            slots_of(&shrunk),
            &[
                ChargeSlot::used_at(Timestamp(30)),
                ChargeSlot::used_at(Timestamp(20)),
            ]
        );
    }

    #[test]
    fn shrinking_pool_clamps_current() {
        let state = ResourceState::Pool(PoolState {
            max: 2,
            bonus: 3,
            current: 5,
            last_use: None,
            last_regeneration: None,
        });
        assert_eq!(resize(&state, 0).available(), 2);
    }

    #[test]
    fn next_ready_reports_earliest_pending_charge() {
        let definition = ResourceDefinition::per_charge(ResourceId(0), "attacks", 3, HOUR);
        let state = charges(
            3,
            0,
            vec![
                ChargeSlot::used_at(Timestamp(40)),
                ChargeSlot::used_at(Timestamp(10)),
                ChargeSlot::AVAILABLE,
            ],
        );
        assert_eq!(next_ready_at(&state, &definition), Some(Timestamp(10 + HOUR)));

        let idle = ResourceState::for_definition(&definition, 0);
        assert_eq!(next_ready_at(&idle, &definition), None);
    }
}
