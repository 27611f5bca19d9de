use std::collections::BTreeSet;

use tracing::{debug, info};

use warden_auth::{CredentialHasher, User};
use warden_core::{DomainError, DomainResult, EntityKind, LookupKey, RoleId, UserId};

use crate::gateway::{NewUser, PersistenceGateway, Session};

use super::{hydrate_user, validate_name};

/// CRUD over users plus the user → role association. Owns registration.
pub struct UserRegistry<G, H> {
    gateway: G,
    hasher: H,
}

impl<G, H> UserRegistry<G, H>
where
    G: PersistenceGateway,
    H: CredentialHasher,
{
    pub fn new(gateway: G, hasher: H) -> Self {
        Self { gateway, hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Register a user: validate, reject taken usernames, hash, persist with
    /// no roles.
    ///
    /// Only the hash is stored; the plaintext never reaches the gateway.
    pub fn register_user(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        let username = validate_name(EntityKind::User, username)?;
        let email = validate_email(email)?;
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        let taken = self
            .gateway
            .read(|session| session.users().find_by_unique(&username).is_some())?;
        if taken {
            return Err(DomainError::duplicate(EntityKind::User, username));
        }

        let password_hash = self.hasher.hash(password)?;

        // The unique constraint still guards against a concurrent registration
        // that won the race after the pre-check.
        let record = self.gateway.transaction(|session| {
            session
                .users_mut()
                .insert(NewUser {
                    username,
                    email,
                    password_hash,
                })
                .map_err(DomainError::from)
        })?;

        info!(user_id = %record.id, username = %record.username, "user registered");
        Ok(User::new(record.id, record.username, record.email, record.password_hash))
    }

    /// Usernames are stored trimmed, so the lookup key is trimmed too.
    pub fn find_by_username(&self, username: &str) -> DomainResult<User> {
        let username = username.trim();
        let user = self.gateway.read(|session| {
            session
                .users()
                .find_by_unique(username)
                .map(|record| hydrate_user(session, record))
        })?;

        debug!(username, found = user.is_some(), "user lookup by username");
        user.ok_or_else(|| DomainError::not_found(EntityKind::User, LookupKey::name(username)))
    }

    pub fn find_user_by_id(&self, user_id: UserId) -> DomainResult<User> {
        self.gateway
            .read(|session| {
                session
                    .users()
                    .find_by_id(&user_id)
                    .map(|record| hydrate_user(session, record))
            })?
            .ok_or_else(|| DomainError::not_found(EntityKind::User, LookupKey::id(user_id)))
    }

    pub fn find_all_users(&self) -> DomainResult<Vec<User>> {
        let users = self.gateway.read(|session| {
            session
                .users()
                .find_all()
                .into_iter()
                .map(|record| hydrate_user(session, record))
                .collect()
        })?;
        Ok(users)
    }

    /// Replace a user's role set with exactly `role_ids`.
    ///
    /// Same all-or-nothing contract as `RoleRegistry::assign_permissions_to_role`.
    pub fn assign_roles_to_user(
        &self,
        user_id: UserId,
        role_ids: impl IntoIterator<Item = RoleId>,
    ) -> DomainResult<()> {
        let requested: BTreeSet<RoleId> = role_ids.into_iter().collect();
        let count = requested.len();

        self.gateway.transaction(|session| {
            let mut user = session
                .users()
                .find_by_id(&user_id)
                .ok_or_else(|| DomainError::not_found(EntityKind::User, LookupKey::id(user_id)))?;

            let mut resolved = BTreeSet::new();
            for id in requested {
                let role = session
                    .roles()
                    .find_by_id(&id)
                    .ok_or_else(|| DomainError::not_found(EntityKind::Role, LookupKey::id(id)))?;
                resolved.insert(role.id);
            }

            user.role_ids = resolved;
            session.users_mut().update(user)?;
            Ok::<_, DomainError>(())
        })?;

        info!(user_id = %user_id, roles = count, "roles assigned to user");
        Ok(())
    }
}

fn validate_email(raw: &str) -> DomainResult<String> {
    let email = raw.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email.to_string())
}
