//! Runtime orchestration for the resource ledger.
//!
//! This crate wires the pure rules of `ledger-core` to storage, clocks and
//! static content. Consumers build a [`LedgerEngine`] and call its async
//! operations; every operation loads a guild's state, computes on a working
//! copy and saves it back, so a failed save commits nothing.
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the facade and its builder
//! - [`api`] exposes errors and the clock abstraction
//! - [`guard`] provides the single-flight guard for round resolution
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod engine;
pub mod guard;
pub mod oracle;
pub mod repository;

pub use api::{Clock, ManualClock, Result, RuntimeError, SystemClock};
pub use engine::{LedgerEngine, LedgerEngineBuilder, RuntimeConfig};
pub use guard::{RoundGuard, RoundPermit};
pub use oracle::{ItemOracleImpl, OracleManager, ResourceRegistryImpl};
pub use repository::{FileGuildRepository, GuildRepository, InMemoryGuildRepo, RepositoryError};
