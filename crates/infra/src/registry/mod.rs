//! Permission, role and user registries.
//!
//! Registries are the only callers of the gateway. They validate input,
//! translate gateway failures into `DomainError`, and hydrate stored records
//! (which hold foreign-key id sets) into entity graphs.

pub mod permissions;
pub mod roles;
pub mod users;

pub use permissions::PermissionRegistry;
pub use roles::RoleRegistry;
pub use users::UserRegistry;

use warden_auth::{Permission, Role, User};
use warden_core::{DomainError, DomainResult, EntityKind};

use crate::gateway::{PermissionRecord, RoleRecord, Session, UserRecord};

/// Trim a unique name and reject empty values.
pub(crate) fn validate_name(entity: EntityKind, raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(format!("{entity} name cannot be empty")));
    }
    Ok(name.to_string())
}

pub(crate) fn hydrate_permission(record: PermissionRecord) -> Permission {
    Permission::new(record.id, record.name)
}

/// Resolve a role's permission ids. Ids that no longer resolve are skipped.
pub(crate) fn hydrate_role<S: Session + ?Sized>(session: &S, record: RoleRecord) -> Role {
    let permissions = record
        .permission_ids
        .iter()
        .filter_map(|id| session.permissions().find_by_id(id))
        .map(hydrate_permission)
        .collect();

    Role::new(record.id, record.name).with_permissions(permissions)
}

/// Resolve a user's role ids, and each role's permission ids, in one scope.
pub(crate) fn hydrate_user<S: Session + ?Sized>(session: &S, record: UserRecord) -> User {
    let roles = record
        .role_ids
        .iter()
        .filter_map(|id| session.roles().find_by_id(id))
        .map(|role| hydrate_role(session, role))
        .collect();

    User::new(record.id, record.username, record.email, record.password_hash).with_roles(roles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(validate_name(EntityKind::Role, "  admin ").unwrap(), "admin");
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = validate_name(EntityKind::Permission, "   ").unwrap_err();
        assert_eq!(err, DomainError::validation("permission name cannot be empty"));
    }
}
