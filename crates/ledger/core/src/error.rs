//! Common error infrastructure for ledger-core.
//!
//! Domain-specific errors (`StateError`, `ScheduleError`) live next to the
//! operations that raise them. This module provides the classification shared
//! by all of them so callers can decide between retrying, rejecting input, or
//! escalating.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: may succeed on retry (wait for regeneration, back off)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency that requires investigation
/// - **Fatal**: the operation cannot continue and nothing was committed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later or with a smaller request.
    ///
    /// Examples: not enough charges, round already being resolved
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown resource id, zero quantity
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Unrecoverable for this call.
    ///
    /// Examples: storage write failed during round commit
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or a failed commit.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all ledger errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers suitable for metrics and tests
pub trait LedgerError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
