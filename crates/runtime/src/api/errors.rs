//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from scheduling, ledger access and repositories so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use ledger_core::{
    ErrorSeverity, GuildId, ItemId, LedgerError, ResourceId, RoundId, ScheduleError, StateError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0} has no registered definition")]
    InvalidConfig(ResourceId),

    #[error("{0} is not in the item catalog")]
    UnknownItem(ItemId),

    #[error("{round} of {guild} is already being resolved")]
    ConcurrentModification { guild: GuildId, round: RoundId },

    #[error("engine requires a guild repository to be configured before building")]
    MissingRepository,

    #[error("engine requires oracles to be configured before building")]
    MissingOracles,
}

impl LedgerError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Schedule(error) => error.severity(),
            RuntimeError::State(error) => error.severity(),
            // Storage failures abort the operation; nothing was committed.
            RuntimeError::Repository(_) => ErrorSeverity::Fatal,
            RuntimeError::InvalidConfig(_) | RuntimeError::UnknownItem(_) => {
                ErrorSeverity::Validation
            }
            RuntimeError::ConcurrentModification { .. } => ErrorSeverity::Recoverable,
            RuntimeError::MissingRepository | RuntimeError::MissingOracles => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Schedule(error) => error.error_code(),
            RuntimeError::State(error) => error.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            RuntimeError::UnknownItem(_) => "RUNTIME_UNKNOWN_ITEM",
            RuntimeError::ConcurrentModification { .. } => "RUNTIME_CONCURRENT_MODIFICATION",
            RuntimeError::MissingRepository => "RUNTIME_MISSING_REPOSITORY",
            RuntimeError::MissingOracles => "RUNTIME_MISSING_ORACLES",
        }
    }
}
