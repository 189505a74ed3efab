//! File-based GuildRepository implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ledger_core::{GuildId, GuildState};
use tokio::fs;

use crate::repository::{GuildRepository, RepositoryError, Result};

/// File-based implementation of [`GuildRepository`].
///
/// Stores each guild as `guild_{id}.bin` in bincode format. Writes go to a
/// temporary file first and are renamed into place, so a reader never sees a
/// half-written state.
pub struct FileGuildRepository {
    base_dir: PathBuf,
}

impl FileGuildRepository {
    /// Create a repository rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn guild_path(&self, guild: GuildId) -> PathBuf {
        self.base_dir.join(format!("guild_{}.bin", guild.0))
    }
}

#[async_trait]
impl GuildRepository for FileGuildRepository {
    async fn load(&self, guild: GuildId) -> Result<Option<GuildState>> {
        let path = self.guild_path(guild);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepositoryError::Io(e)),
        };
        let state: GuildState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded {} from {}", guild, path.display());

        Ok(Some(state))
    }

    async fn save(&self, guild: GuildId, state: &GuildState) -> Result<()> {
        let path = self.guild_path(guild);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved {} to {}", guild, path.display());

        Ok(())
    }

    async fn delete(&self, guild: GuildId) -> Result<()> {
        let path = self.guild_path(guild);

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Deleted {}", guild);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepositoryError::Io(e)),
        }
    }

    async fn exists(&self, guild: GuildId) -> Result<bool> {
        Ok(fs::try_exists(self.guild_path(guild)).await?)
    }

    async fn list_guilds(&self) -> Result<Vec<GuildId>> {
        let mut guilds = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("guild_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = id.parse::<u64>()
            {
                guilds.push(GuildId(id));
            }
        }

        guilds.sort_unstable();
        Ok(guilds)
    }
}
