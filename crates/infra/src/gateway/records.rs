//! Explicit schema for what the gateway persists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use warden_auth::PasswordHash;
use warden_core::{Entity, EntityKind, PermissionId, RoleId, UserId};

/// A persisted row type.
pub trait Record: Entity + Clone + Send + Sync + 'static {
    /// Insert payload (everything but the id).
    type New;

    fn fresh_id() -> Self::Id;

    fn from_new(id: Self::Id, new: Self::New) -> Self;

    /// Value of the column carrying the unique constraint.
    fn unique_key(&self) -> &str;
}

// ─────────────────────────────────────────────────────────────────────────────
// permissions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    pub name: String,
}

impl Entity for PermissionRecord {
    type Id = PermissionId;
    const KIND: EntityKind = EntityKind::Permission;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for PermissionRecord {
    type New = NewPermission;

    fn fresh_id() -> Self::Id {
        PermissionId::new()
    }

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        Self { id, name: new.name }
    }

    fn unique_key(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// roles (+ role_permissions association)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name: String,
    pub permission_ids: BTreeSet<PermissionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
}

impl Entity for RoleRecord {
    type Id = RoleId;
    const KIND: EntityKind = EntityKind::Role;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for RoleRecord {
    type New = NewRole;

    fn fresh_id() -> Self::Id {
        RoleId::new()
    }

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        Self {
            id,
            name: new.name,
            permission_ids: BTreeSet::new(),
        }
    }

    fn unique_key(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// users (+ user_roles association)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub role_ids: BTreeSet<RoleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
}

impl Entity for UserRecord {
    type Id = UserId;
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for UserRecord {
    type New = NewUser;

    fn fresh_id() -> Self::Id {
        UserId::new()
    }

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        Self {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role_ids: BTreeSet::new(),
        }
    }

    fn unique_key(&self) -> &str {
        &self.username
    }
}
