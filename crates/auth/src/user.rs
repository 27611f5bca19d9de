//! User entity and its opaque credential.

use serde::{Deserialize, Serialize};

use warden_core::{Entity, EntityKind, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Password Hash
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque one-way password hash as produced by a `CredentialHasher`.
///
/// Never compare two hashes for equality to check a password; salted hashers
/// produce different strings for the same plaintext. Use
/// `CredentialHasher::verify`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A registered user with its hydrated role graph.
///
/// # Invariants
/// - `username` is unique across all users.
/// - `password_hash` is written once at registration and never holds plaintext.
/// - `roles` only contains roles that existed when they were assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub roles: Vec<Role>,
}

impl User {
    /// A freshly registered user has no roles.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash,
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    pub fn has_no_roles(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Entity for User {
    type Id = UserId;
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
