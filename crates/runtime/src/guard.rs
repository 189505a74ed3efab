//! Single-flight guard for round resolution.
//!
//! Resolving the same round of the same guild twice at once would apply the
//! damage twice. The guard admits one resolution per `(guild, round)` and
//! rejects the rest with [`RuntimeError::ConcurrentModification`]; the permit
//! releases the key when dropped, including on early returns and errors.
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use ledger_core::{GuildId, RoundId};

use crate::api::{Result, RuntimeError};

type Key = (GuildId, RoundId);

#[derive(Debug, Clone, Default)]
pub struct RoundGuard {
    in_flight: Arc<Mutex<HashSet<Key>>>,
}

impl RoundGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, guild: GuildId, round: RoundId) -> Result<RoundPermit> {
        // The set stays consistent even if a holder panicked.
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert((guild, round)) {
            return Err(RuntimeError::ConcurrentModification { guild, round });
        }
        Ok(RoundPermit {
            key: (guild, round),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_held(&self, guild: GuildId, round: RoundId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(guild, round))
    }
}

/// Exclusive right to resolve one round of one guild.
#[derive(Debug)]
pub struct RoundPermit {
    key: Key,
    in_flight: Arc<Mutex<HashSet<Key>>>,
}

impl Drop for RoundPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_rejected_until_release() {
        let guard = RoundGuard::new();
        let permit = guard.try_acquire(GuildId(1), RoundId(5)).unwrap();

        let err = guard.try_acquire(GuildId(1), RoundId(5)).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::ConcurrentModification {
                guild: GuildId(1),
                round: RoundId(5)
            }
        ));

        drop(permit);
        assert!(!guard.is_held(GuildId(1), RoundId(5)));
        assert!(guard.try_acquire(GuildId(1), RoundId(5)).is_ok());
    }

    #[test]
    fn keys_are_independent() {
        let guard = RoundGuard::new();
        let _a = guard.try_acquire(GuildId(1), RoundId(5)).unwrap();
        let _b = guard.try_acquire(GuildId(1), RoundId(6)).unwrap();
        let _c = guard.try_acquire(GuildId(2), RoundId(5)).unwrap();
        assert!(guard.is_held(GuildId(2), RoundId(5)));
    }
}
