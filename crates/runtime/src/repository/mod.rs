//! Repository layer for guild state.
//!
//! Repositories hold the data that CHANGES while the ledger runs: one
//! [`GuildState`](ledger_core::GuildState) per guild, holding balances, resource
//! states, inventories and attack queues.
//!
//! Static content (resource definitions, items) is handled by oracles, not
//! repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileGuildRepository;
pub use memory::InMemoryGuildRepo;
pub use traits::GuildRepository;
