//! Serializable response shapes.
//!
//! These mirror what an API layer hands to clients. They never include the
//! password hash.

use serde::{Deserialize, Serialize};

use warden_core::{PermissionId, RoleId, UserId};

use crate::{Permission, Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionView {
    pub id: PermissionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub id: RoleId,
    pub name: String,
    pub permissions: Vec<PermissionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub roles: Vec<RoleView>,
}

impl From<&Permission> for PermissionView {
    fn from(value: &Permission) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}

impl From<&Role> for RoleView {
    fn from(value: &Role) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            permissions: value.permissions.iter().map(PermissionView::from).collect(),
        }
    }
}

impl From<&User> for UserView {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            username: value.username.clone(),
            email: value.email.clone(),
            roles: value.roles.iter().map(RoleView::from).collect(),
        }
    }
}
