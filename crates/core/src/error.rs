//! Domain error model.

use thiserror::Error;

use crate::entity::EntityKind;

/// Result type used across the workspace.
pub type DomainResult<T> = Result<T, DomainError>;

/// The key a failed lookup was performed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(String),
    Name(String),
}

impl LookupKey {
    pub fn id(id: impl core::fmt::Display) -> Self {
        Self::Id(id.to_string())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl core::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id={id}"),
            LookupKey::Name(name) => write!(f, "name={name}"),
        }
    }
}

/// Domain-level error.
///
/// Registries surface these to their callers unchanged. The authenticator is
/// the only place that collapses variants (into `Authentication`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, malformed email).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A unique name (permission name, role name, username) is already taken.
    #[error("{entity} '{name}' already exists")]
    DuplicateName { entity: EntityKind, name: String },

    /// A referenced entity does not exist.
    #[error("{entity} not found ({key})")]
    NotFound { entity: EntityKind, key: LookupKey },

    /// Credentials were rejected. Deliberately carries no detail.
    #[error("bad credentials")]
    Authentication,

    /// The persistence gateway failed.
    #[error("gateway failure: {0}")]
    Gateway(String),

    /// The credential hasher failed.
    #[error("credential hashing failed: {0}")]
    Credential(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(entity: EntityKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            entity,
            name: name.into(),
        }
    }

    pub fn not_found(entity: EntityKind, key: LookupKey) -> Self {
        Self::NotFound { entity, key }
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
