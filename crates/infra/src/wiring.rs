//! Composition root: builds every registry and the authenticator from one
//! gateway and one hasher, passed in explicitly.

use std::sync::Arc;

use warden_auth::CredentialHasher;

use crate::authenticator::Authenticator;
use crate::config::{ConfigError, WardenConfig};
use crate::gateway::{InMemoryGateway, PersistenceGateway};
use crate::hasher::Argon2Hasher;
use crate::registry::{PermissionRegistry, RoleRegistry, UserRegistry};

pub struct AccessControl<G, H> {
    pub permissions: PermissionRegistry<G>,
    pub roles: RoleRegistry<G>,
    pub users: Arc<UserRegistry<G, H>>,
    pub authenticator: Authenticator<G, H>,
}

impl<G, H> AccessControl<G, H>
where
    G: PersistenceGateway + Clone,
    H: CredentialHasher,
{
    pub fn new(gateway: G, hasher: H) -> Self {
        let users = Arc::new(UserRegistry::new(gateway.clone(), hasher));

        Self {
            permissions: PermissionRegistry::new(gateway.clone()),
            roles: RoleRegistry::new(gateway),
            authenticator: Authenticator::new(users.clone()),
            users,
        }
    }
}

impl AccessControl<Arc<InMemoryGateway>, Argon2Hasher> {
    /// In-memory storage plus an Argon2 hasher tuned by `config`.
    pub fn in_memory(config: &WardenConfig) -> Result<Self, ConfigError> {
        let hasher = Argon2Hasher::from_config(&config.hasher)?;
        Ok(Self::new(Arc::new(InMemoryGateway::new()), hasher))
    }
}
