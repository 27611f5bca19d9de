use std::collections::BTreeSet;

use tracing::{debug, info};

use warden_auth::Role;
use warden_core::{DomainError, DomainResult, EntityKind, LookupKey, PermissionId, RoleId};

use crate::gateway::{NewRole, PersistenceGateway, Session};

use super::{hydrate_role, validate_name};

/// CRUD over roles plus the role → permission association.
pub struct RoleRegistry<G> {
    gateway: G,
}

impl<G> RoleRegistry<G>
where
    G: PersistenceGateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Persist a new role with an empty permission set.
    pub fn create_role(&self, name: &str) -> DomainResult<Role> {
        let name = validate_name(EntityKind::Role, name)?;

        let record = self.gateway.transaction(|session| {
            session.roles_mut().insert(NewRole { name }).map_err(DomainError::from)
        })?;

        info!(role_id = %record.id, name = %record.name, "role created");
        Ok(Role::new(record.id, record.name))
    }

    pub fn find_all_roles(&self) -> DomainResult<Vec<Role>> {
        let roles = self.gateway.read(|session| {
            session
                .roles()
                .find_all()
                .into_iter()
                .map(|record| hydrate_role(session, record))
                .collect()
        })?;
        Ok(roles)
    }

    pub fn find_role_by_id(&self, role_id: RoleId) -> DomainResult<Role> {
        self.gateway
            .read(|session| {
                session
                    .roles()
                    .find_by_id(&role_id)
                    .map(|record| hydrate_role(session, record))
            })?
            .ok_or_else(|| DomainError::not_found(EntityKind::Role, LookupKey::id(role_id)))
    }

    /// Absent is `Ok(None)`, not an error.
    pub fn find_role_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        let role = self.gateway.read(|session| {
            session
                .roles()
                .find_by_unique(name.trim())
                .map(|record| hydrate_role(session, record))
        })?;

        debug!(name, found = role.is_some(), "role lookup by name");
        Ok(role)
    }

    /// Replace a role's permission set with exactly `permission_ids`.
    ///
    /// Runs as one transaction: load the role, resolve every id, replace,
    /// persist. The first unknown id aborts the whole operation and the role
    /// keeps its previous set. Ids are resolved in ascending order, so the
    /// reported id is the smallest unknown one.
    pub fn assign_permissions_to_role(
        &self,
        role_id: RoleId,
        permission_ids: impl IntoIterator<Item = PermissionId>,
    ) -> DomainResult<()> {
        let requested: BTreeSet<PermissionId> = permission_ids.into_iter().collect();
        let count = requested.len();

        self.gateway.transaction(|session| {
            let mut role = session
                .roles()
                .find_by_id(&role_id)
                .ok_or_else(|| DomainError::not_found(EntityKind::Role, LookupKey::id(role_id)))?;

            let mut resolved = BTreeSet::new();
            for id in requested {
                let permission = session.permissions().find_by_id(&id).ok_or_else(|| {
                    DomainError::not_found(EntityKind::Permission, LookupKey::id(id))
                })?;
                resolved.insert(permission.id);
            }

            role.permission_ids = resolved;
            session.roles_mut().update(role)?;
            Ok::<_, DomainError>(())
        })?;

        info!(role_id = %role_id, permissions = count, "permissions assigned to role");
        Ok(())
    }
}
