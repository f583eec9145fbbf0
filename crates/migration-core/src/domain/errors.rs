//! Domain error types
//!
//! [`DomainError`] covers newtype/entity construction failures.
//! [`ToolError`] is the six-member taxonomy that every tool-surface call
//! returns — the only error type that ever crosses a port or tool boundary.

use thiserror::Error;

/// Errors raised while constructing or validating domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("invalid enum value: {0}")]
    InvalidEnumValue(String),

    #[error("invalid state transition from {from} to {to}")]
    InvalidState { from: String, to: String },

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

/// The tool-facing error taxonomy. Every operation in `migration-tools`
/// converts its result into `{success, error, message}` using [`ToolError::kind`]
/// and `Display`; nothing ever panics or propagates past the tool boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Argument failed schema or enumeration validation.
    #[error("{0}")]
    InvalidArgument(String),

    /// Referenced migration/member/transfer absent.
    #[error("{0}")]
    NotFound(String),

    /// An update would break a domain invariant.
    #[error("{0}")]
    InvariantViolation(String),

    /// `initialize_migration` called while a migration is already active.
    #[error("a migration is already active")]
    AlreadyActive,

    /// The Browser or Device Collaborator failed or timed out.
    #[error("{0}")]
    CollaboratorUnavailable(String),

    /// Uncategorized failure.
    #[error("{0}")]
    Unknown(String),
}

impl ToolError {
    /// The wire-level error kind string used in tool responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::InvariantViolation(_) => "invariant_violation",
            Self::AlreadyActive => "already_active",
            Self::CollaboratorUnavailable(_) => "collaborator_unavailable",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<DomainError> for ToolError {
    fn from(err: DomainError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Errors raised by `IStateRepository` (C1). The store classifies failures
/// itself rather than returning an opaque error: `invariant_violation` and
/// `already_active` are part of the tool-facing error taxonomy, and the
/// repository is where the old/new row comparison that detects them
/// actually happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvariantViolation(String),

    #[error("a migration is already active")]
    AlreadyActive,

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::InvariantViolation(msg) => Self::InvariantViolation(msg),
            StoreError::AlreadyActive => Self::AlreadyActive,
            StoreError::Backend(msg) => Self::Unknown(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_taxonomy_strings() {
        assert_eq!(ToolError::InvalidArgument("x".into()).kind(), "invalid_argument");
        assert_eq!(ToolError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(
            ToolError::InvariantViolation("x".into()).kind(),
            "invariant_violation"
        );
        assert_eq!(ToolError::AlreadyActive.kind(), "already_active");
        assert_eq!(
            ToolError::CollaboratorUnavailable("x".into()).kind(),
            "collaborator_unavailable"
        );
        assert_eq!(ToolError::Unknown("x".into()).kind(), "unknown");
    }

    #[test]
    fn domain_error_converts_to_invalid_argument() {
        let domain = DomainError::InvalidEnumValue("bogus".into());
        let tool: ToolError = domain.into();
        assert_eq!(tool.kind(), "invalid_argument");
    }

    #[test]
    fn store_error_maps_to_matching_tool_error_kind() {
        assert_eq!(ToolError::from(StoreError::AlreadyActive).kind(), "already_active");
        assert_eq!(
            ToolError::from(StoreError::InvariantViolation("x".into())).kind(),
            "invariant_violation"
        );
        assert_eq!(ToolError::from(StoreError::NotFound("x".into())).kind(), "not_found");
        assert_eq!(ToolError::from(StoreError::Backend("x".into())).kind(), "unknown");
    }
}
