//! Ledger configuration loader.

use std::path::Path;

use ledger_core::LedgerConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for ledger configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<LedgerConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config data from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> LoadResult<LedgerConfig> {
        let config: LedgerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{BalancePolicy, ResourceId};

    #[test]
    fn parses_partial_config() {
        let config = ConfigLoader::parse(
            r#"
            attack_resource = 3
            balance_policy = "allow_debt"
            "#,
        )
        .unwrap();

        assert_eq!(config.attack_resource, ResourceId(3));
        assert_eq!(config.balance_policy, BalancePolicy::AllowDebt);
        assert_eq!(config.starting_balance, LedgerConfig::DEFAULT_STARTING_BALANCE);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(ConfigLoader::parse(r#"balance_policy = "bankrupt""#).is_err());
    }
}
