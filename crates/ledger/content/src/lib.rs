//! Data-driven content definitions and loaders.
//!
//! This crate reads the static configuration the ledger runs against:
//! - Resource catalogs (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//! - Ledger configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in guild state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentBundle, ItemLoader, LoadResult, ResourceLoader};
