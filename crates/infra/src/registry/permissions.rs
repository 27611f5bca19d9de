use tracing::{debug, info};

use warden_auth::{Authority, Permission, ROLE_PREFIX};
use warden_core::{DomainError, DomainResult, EntityKind};

use crate::gateway::{NewPermission, PersistenceGateway, Session};

use super::{hydrate_permission, validate_name};

/// CRUD over permissions, keyed by unique name.
pub struct PermissionRegistry<G> {
    gateway: G,
}

impl<G> PermissionRegistry<G>
where
    G: PersistenceGateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Persist a new permission.
    ///
    /// Name collisions surface from the gateway's unique constraint as
    /// `DomainError::DuplicateName`. A name whose authority would start with
    /// `ROLE_` is rejected: it would be indistinguishable from a role grant.
    pub fn create_permission(&self, name: &str) -> DomainResult<Permission> {
        let name = validate_name(EntityKind::Permission, name)?;
        if Authority::for_permission(&name).is_role() {
            return Err(DomainError::validation(format!(
                "permission name '{name}' must not start with {ROLE_PREFIX}"
            )));
        }

        let record = self.gateway.transaction(|session| {
            session
                .permissions_mut()
                .insert(NewPermission { name })
                .map_err(DomainError::from)
        })?;

        info!(permission_id = %record.id, name = %record.name, "permission created");
        Ok(hydrate_permission(record))
    }

    pub fn find_all_permissions(&self) -> DomainResult<Vec<Permission>> {
        let records = self.gateway.read(|session| session.permissions().find_all())?;
        Ok(records.into_iter().map(hydrate_permission).collect())
    }

    /// Absent is `Ok(None)`, not an error.
    pub fn find_permission_by_name(&self, name: &str) -> DomainResult<Option<Permission>> {
        let record = self
            .gateway
            .read(|session| session.permissions().find_by_unique(name.trim()))?;

        debug!(name, found = record.is_some(), "permission lookup by name");
        Ok(record.map(hydrate_permission))
    }
}
