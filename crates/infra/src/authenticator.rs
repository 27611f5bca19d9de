//! Credential check: username + password in, authenticated principal out.
//!
//! Every rejection is the same `DomainError::Authentication`, whether the
//! username is unknown, the password is wrong, or the stored hash cannot be
//! verified. Callers cannot use it to enumerate usernames.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use warden_auth::{derive_authorities, AuthenticatedPrincipal, CredentialHasher};
use warden_core::{DomainError, DomainResult};

use crate::gateway::PersistenceGateway;
use crate::registry::UserRegistry;

pub struct Authenticator<G, H> {
    users: Arc<UserRegistry<G, H>>,
}

impl<G, H> Authenticator<G, H>
where
    G: PersistenceGateway,
    H: CredentialHasher,
{
    pub fn new(users: Arc<UserRegistry<G, H>>) -> Self {
        Self { users }
    }

    pub fn authenticate(&self, username: &str, password: &str) -> DomainResult<AuthenticatedPrincipal> {
        let user = match self.users.find_by_username(username) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                warn!(username, "authentication rejected");
                return Err(DomainError::Authentication);
            }
            Err(e) => return Err(e),
        };

        match self.users.hasher().verify(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(username, "authentication rejected");
                return Err(DomainError::Authentication);
            }
            Err(e) => {
                warn!(username, error = %e, "stored credential could not be verified");
                return Err(DomainError::Authentication);
            }
        }

        let authorities = derive_authorities(&user);
        info!(user_id = %user.id, username, authorities = authorities.len(), "user authenticated");

        Ok(AuthenticatedPrincipal {
            user_id: user.id,
            username: user.username,
            email: user.email,
            authorities,
            authenticated_at: Utc::now(),
        })
    }
}
