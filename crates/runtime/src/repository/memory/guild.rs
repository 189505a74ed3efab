//! In-memory GuildRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use ledger_core::{GuildId, GuildState};

use crate::repository::{GuildRepository, RepositoryError, Result};

/// In-memory implementation of [`GuildRepository`].
///
/// Stores one cloned state per guild. Locks are never held across an await.
pub struct InMemoryGuildRepo {
    guilds: RwLock<HashMap<GuildId, GuildState>>,
}

impl InMemoryGuildRepo {
    pub fn new() -> Self {
        Self {
            guilds: RwLock::new(HashMap::new()),
        }
    }

    /// Create with an initial state for `guild`.
    pub fn with_guild(guild: GuildId, state: GuildState) -> Self {
        let mut guilds = HashMap::new();
        guilds.insert(guild, state);
        Self {
            guilds: RwLock::new(guilds),
        }
    }
}

impl Default for InMemoryGuildRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GuildRepository for InMemoryGuildRepo {
    async fn load(&self, guild: GuildId) -> Result<Option<GuildState>> {
        let guilds = self
            .guilds
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(guilds.get(&guild).cloned())
    }

    async fn save(&self, guild: GuildId, state: &GuildState) -> Result<()> {
        let mut guilds = self
            .guilds
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        guilds.insert(guild, state.clone());
        Ok(())
    }

    async fn delete(&self, guild: GuildId) -> Result<()> {
        let mut guilds = self
            .guilds
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        guilds.remove(&guild);
        Ok(())
    }

    async fn exists(&self, guild: GuildId) -> Result<bool> {
        let guilds = self
            .guilds
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(guilds.contains_key(&guild))
    }

    async fn list_guilds(&self) -> Result<Vec<GuildId>> {
        let guilds = self
            .guilds
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<_> = guilds.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
