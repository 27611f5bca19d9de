//! Persistence gateway: durable storage for permissions, roles and users.
//!
//! The storage engine itself is an external collaborator. This module fixes
//! the contract the registries rely on and ships an in-memory implementation
//! for tests/dev.
//!
//! ## Records vs entities
//!
//! The gateway stores **records**. Associations are owned sets of foreign-key
//! ids (`RoleRecord::permission_ids`, `UserRecord::role_ids`), never embedded
//! object graphs. Registries resolve those ids into hydrated entities inside
//! a single read scope.
//!
//! ## Scoping
//!
//! - `read` gives a consistent view for lookups and hydration.
//! - `transaction` is all-or-nothing: if the closure returns `Err`, none of
//!   its writes become visible.

pub mod in_memory;
mod records;

pub use in_memory::InMemoryGateway;
pub use records::{NewPermission, NewRole, NewUser, PermissionRecord, Record, RoleRecord, UserRecord};

use std::sync::Arc;

use thiserror::Error;

use warden_core::{DomainError, EntityKind, LookupKey};

/// Gateway operation error.
///
/// These are storage-level failures. Registries convert them into
/// `DomainError` through the `From` impl below.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("unique constraint violated: {entity} '{value}'")]
    UniqueViolation { entity: EntityKind, value: String },

    #[error("{entity} row {id} does not exist")]
    MissingRow { entity: EntityKind, id: String },

    /// Failure inside a storage backend (connection, IO, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<GatewayError> for DomainError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::UniqueViolation { entity, value } => DomainError::duplicate(entity, value),
            GatewayError::MissingRow { entity, id } => DomainError::not_found(entity, LookupKey::Id(id)),
            GatewayError::Backend(msg) => DomainError::gateway(msg),
        }
    }
}

/// Repository-style access to one record type.
pub trait Table<R: Record> {
    /// Persist a new record; the gateway assigns its id.
    fn insert(&mut self, new: R::New) -> Result<R, GatewayError>;

    /// Overwrite an existing record (matched by id).
    fn update(&mut self, record: R) -> Result<R, GatewayError>;

    fn find_by_id(&self, id: &R::Id) -> Option<R>;

    /// Lookup by the record's unique field (name / username).
    fn find_by_unique(&self, value: &str) -> Option<R>;

    /// All records, in a stable order for a given implementation.
    fn find_all(&self) -> Vec<R>;
}

/// The set of tables visible inside a read or transaction scope.
pub trait Session {
    fn permissions(&self) -> &dyn Table<PermissionRecord>;
    fn permissions_mut(&mut self) -> &mut dyn Table<PermissionRecord>;

    fn roles(&self) -> &dyn Table<RoleRecord>;
    fn roles_mut(&mut self) -> &mut dyn Table<RoleRecord>;

    fn users(&self) -> &dyn Table<UserRecord>;
    fn users_mut(&mut self) -> &mut dyn Table<UserRecord>;
}

/// Durable storage for the access-control entities.
///
/// Implementations own identity assignment and uniqueness enforcement.
pub trait PersistenceGateway: Send + Sync {
    type Session: Session;

    /// Run `work` against a consistent snapshot.
    fn read<T>(&self, work: impl FnOnce(&Self::Session) -> T) -> Result<T, GatewayError>;

    /// Run `work` atomically. Writes are published only if `work` returns `Ok`.
    fn transaction<T, E>(&self, work: impl FnOnce(&mut Self::Session) -> Result<T, E>) -> Result<T, E>
    where
        E: From<GatewayError>;
}

impl<G> PersistenceGateway for Arc<G>
where
    G: PersistenceGateway,
{
    type Session = G::Session;

    fn read<T>(&self, work: impl FnOnce(&Self::Session) -> T) -> Result<T, GatewayError> {
        (**self).read(work)
    }

    fn transaction<T, E>(&self, work: impl FnOnce(&mut Self::Session) -> Result<T, E>) -> Result<T, E>
    where
        E: From<GatewayError>,
    {
        (**self).transaction(work)
    }
}
