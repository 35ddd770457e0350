//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// uniqueness, missing references, storage-detected races). Transport concerns
/// belong to whoever calls the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A case-insensitive name uniqueness rule was violated.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// A value violated a constraint (non-positive amount, missing field,
    /// activation without recipe lines, inactive category assignment).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The storage collaborator detected a concurrent write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate_name(msg: impl Into<String>) -> Self {
        Self::DuplicateName(msg.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::DuplicateName(_) => "duplicate_name",
            DomainError::InvalidValue(_) => "invalid_value",
            DomainError::Conflict(_) => "conflict",
            DomainError::InvalidId(_) => "invalid_id",
        }
    }
}
