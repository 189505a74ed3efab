//! Repository contract for saving and loading guild state.

use async_trait::async_trait;
use ledger_core::{GuildId, GuildState};

use super::Result;

/// Persistence for guild state, keyed by guild.
///
/// Each guild is one independent unit of storage. `save` replaces the whole
/// state, so a caller that computes on a working copy and saves it at the end
/// either commits everything or nothing.
#[async_trait]
pub trait GuildRepository: Send + Sync {
    /// Load a guild's state, `None` if nothing was saved yet.
    async fn load(&self, guild: GuildId) -> Result<Option<GuildState>>;

    /// Replace a guild's state.
    async fn save(&self, guild: GuildId, state: &GuildState) -> Result<()>;

    /// Delete a guild's state. Deleting a missing guild is not an error.
    async fn delete(&self, guild: GuildId) -> Result<()>;

    async fn exists(&self, guild: GuildId) -> Result<bool>;

    /// List all stored guilds.
    async fn list_guilds(&self) -> Result<Vec<GuildId>> {
        Ok(vec![])
    }
}
