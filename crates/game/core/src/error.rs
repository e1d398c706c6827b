//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g., `CombatantError`, `SkillError`) are defined in
//! their respective modules alongside the transforms they validate. This module
//! provides the shared classification used by callers to decide how to react.
//!
//! # Error Taxonomy
//!
//! - **Contract violations** (negative xp, negative action cost, max HP below 1)
//!   are programming errors and surface as `Err` values classified as
//!   [`ErrorSeverity::Validation`].
//! - **Domain no-ops** (removing an absent effect, springing a triggered hazard)
//!   are never errors; they are reported through ordinary return values.
//! - **Lookup misses** (an absent skill) default to level 0.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with an alternative action.
    ///
    /// Examples: combatant not ready to act yet
    Recoverable,

    /// Validation error - a caller broke an operation's contract.
    ///
    /// Examples: negative experience grant, zero max HP
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: scheduler references an unknown combatant
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
