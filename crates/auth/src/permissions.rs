use serde::{Deserialize, Serialize};

use warden_core::{Entity, EntityKind, PermissionId};

/// A named capability that can be granted to roles.
///
/// Permissions are leaf entities: they reference nothing and are immutable
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
}

impl Permission {
    pub fn new(id: PermissionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Entity for Permission {
    type Id = PermissionId;
    const KIND: EntityKind = EntityKind::Permission;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
